use crate::models::{EventRecord, RollupRow, Rollups, SessionKey};
use crate::utils::date::{month_end, week_ending, year_end};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

/// Distinct-session counts per day, week (ending Sunday), month and year.
///
/// Days appear only when they have rows; week, month and year series are
/// continuous from the first to the last bucket, with zero-filled gaps.
pub fn build_rollups(rows: &[&EventRecord]) -> Rollups {
    Rollups {
        daily: bucket(rows, |d| d, None),
        weekly: bucket(rows, week_ending, Some(|d| week_ending(d + Duration::days(1)))),
        monthly: bucket(rows, month_end, Some(|d| month_end(d + Duration::days(1)))),
        yearly: bucket(rows, year_end, Some(|d| year_end(d + Duration::days(1)))),
    }
}

/// `period_end` maps a date to the last day of its bucket; `next` steps
/// from one bucket end to the following one when gaps must be filled.
fn bucket(
    rows: &[&EventRecord],
    period_end: fn(NaiveDate) -> NaiveDate,
    next: Option<fn(NaiveDate) -> NaiveDate>,
) -> Vec<RollupRow> {
    let mut buckets: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
    for ev in rows {
        let sessions = buckets.entry(period_end(ev.date())).or_default();
        if let Some(s) = ev.session(SessionKey::Full) {
            sessions.insert(s);
        }
    }

    let (Some(first), Some(last)) = (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    match next {
        None => buckets
            .into_iter()
            .map(|(period_end, s)| RollupRow {
                period_end,
                unique_sessions: s.len(),
            })
            .collect(),
        Some(next) => {
            let mut out = Vec::new();
            let mut cur = first;
            while cur <= last {
                out.push(RollupRow {
                    period_end: cur,
                    unique_sessions: buckets.get(&cur).map_or(0, HashSet::len),
                });
                cur = next(cur);
            }
            out
        }
    }
}
