use crate::models::{AggregateRow, DatasetKind, EventRecord, SessionKey};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// Running mean over the values that are present.
#[derive(Default)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn push(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.sum += v;
            self.n += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

#[derive(Default)]
struct Acc<'a> {
    count: usize,
    categories: HashSet<&'a str>,
    sessions: HashSet<&'a str>,
    sum_duration: i64,
    latitude: Mean,
    longitude: Mean,
    rating: Mean,
    composite: Mean,
}

/// Group rows by (calendar date, category) and aggregate each group.
///
/// Rows without a category value are left out of the groups. Output is
/// ordered by date then category, whatever the input order.
pub fn group_by_date_category(rows: &[&EventRecord], kind: DatasetKind) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<(NaiveDate, &str), Acc> = BTreeMap::new();

    for ev in rows {
        let Some(category) = ev.category(kind) else {
            continue;
        };
        let acc = groups.entry((ev.date(), category)).or_default();
        acc.count += 1;
        acc.categories.insert(category);
        if let Some(s) = ev.session(SessionKey::Short) {
            acc.sessions.insert(s);
        }
        acc.sum_duration += ev.duration_minutes;
        acc.latitude.push(ev.latitude);
        acc.longitude.push(ev.longitude);
        acc.rating.push(ev.rating);
        acc.composite.push(ev.composite_score);
    }

    groups
        .into_iter()
        .map(|((date, category), acc)| AggregateRow {
            date,
            category: category.to_string(),
            count: acc.count,
            distinct_categories: acc.categories.len(),
            distinct_sessions: acc.sessions.len(),
            sum_duration: acc.sum_duration,
            mean_latitude: acc.latitude.value(),
            mean_longitude: acc.longitude.value(),
            mean_rating: acc.rating.value(),
            mean_composite_score: acc.composite.value(),
        })
        .collect()
}

/// Stable sort by summed duration, largest first.
pub fn sort_by_duration_desc(groups: &mut [AggregateRow]) {
    groups.sort_by(|a, b| b.sum_duration.cmp(&a.sum_duration));
}
