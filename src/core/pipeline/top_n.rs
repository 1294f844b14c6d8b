use crate::errors::{AppError, AppResult};
use crate::models::{DatasetKind, EventRecord, TopEntry};
use std::collections::HashMap;

/// Largest Top-N a report offers.
pub const MAX_TOP_N: usize = 10;

/// Resolve the Top-N size against the number of distinct categories.
///
/// An explicit request must lie in `1..=min(10, distinct)`; the default is
/// clamped into that range. Returns 0 when there is no category to rank.
pub fn clamp_top_n(requested: Option<usize>, default: usize, distinct: usize) -> AppResult<usize> {
    let max = distinct.min(MAX_TOP_N);
    if max == 0 {
        return Ok(0);
    }
    match requested {
        Some(n) if (1..=max).contains(&n) => Ok(n),
        Some(n) => Err(AppError::InvalidTopN(n, max)),
        None => Ok(default.clamp(1, max)),
    }
}

/// The `n` categories with the largest summed duration.
///
/// Ties keep the order in which categories first appear in `rows`.
pub fn top_categories(rows: &[&EventRecord], kind: DatasetKind, n: usize) -> Vec<TopEntry> {
    let mut order: Vec<TopEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for ev in rows {
        let Some(category) = ev.category(kind) else {
            continue;
        };
        let i = *index.entry(category).or_insert_with(|| {
            order.push(TopEntry {
                category: category.to_string(),
                total_duration: 0,
            });
            order.len() - 1
        });
        order[i].total_duration += ev.duration_minutes;
    }

    order.sort_by(|a, b| b.total_duration.cmp(&a.total_duration));
    order.truncate(n);
    order
}
