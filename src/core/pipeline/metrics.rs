//! Headline numbers over the filtered rows.

use crate::models::{DatasetKind, EventRecord, SessionKey};
use std::collections::HashSet;

pub fn total_duration(rows: &[&EventRecord]) -> i64 {
    rows.iter().map(|e| e.duration_minutes).sum()
}

pub fn unique_categories(rows: &[&EventRecord], kind: DatasetKind) -> usize {
    rows.iter()
        .filter_map(|e| e.category(kind))
        .collect::<HashSet<_>>()
        .len()
}

pub fn unique_sessions(rows: &[&EventRecord], key: SessionKey) -> usize {
    rows.iter()
        .filter_map(|e| e.session(key))
        .collect::<HashSet<_>>()
        .len()
}

/// Mean of the values present; `None` when there are none.
pub fn mean_of(rows: &[&EventRecord], field: fn(&EventRecord) -> Option<f64>) -> Option<f64> {
    let values: Vec<f64> = rows.iter().filter_map(|e| field(e)).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::parse_timestamp;
    use crate::utils::format_duration;

    #[test]
    fn total_time_in_nature() {
        let mk = |m| {
            let mut e = EventRecord::new(parse_timestamp("2024-01-01").unwrap(), "a@x.com");
            e.duration_minutes = m;
            e
        };
        let events = [mk(30), mk(20), mk(10)];
        let rows: Vec<&EventRecord> = events.iter().collect();
        assert_eq!(total_duration(&rows), 60);
        assert_eq!(format_duration(total_duration(&rows)), "1h 0m");
    }

    #[test]
    fn mean_of_absent_field_is_none() {
        let events = [EventRecord::new(parse_timestamp("2024-01-01").unwrap(), "a@x.com")];
        let rows: Vec<&EventRecord> = events.iter().collect();
        assert_eq!(mean_of(&rows, |e| e.rating), None);
        assert_eq!(mean_of(&[], |e| e.rating), None);
    }

    #[test]
    fn session_counts_use_the_requested_id() {
        let mk = |long: &str, short: &str| {
            let mut e = EventRecord::new(parse_timestamp("2024-01-01").unwrap(), "a@x.com");
            e.session_id = Some(long.to_string());
            e.short_session_id = Some(short.to_string());
            e
        };
        let events = [mk("S-1", "100001"), mk("S-2", "100001")];
        let rows: Vec<&EventRecord> = events.iter().collect();
        assert_eq!(unique_sessions(&rows, SessionKey::Full), 2);
        assert_eq!(unique_sessions(&rows, SessionKey::Short), 1);
    }

    #[test]
    fn missing_id_form_falls_back_to_the_other() {
        let mut e = EventRecord::new(parse_timestamp("2024-01-01").unwrap(), "a@x.com");
        e.short_session_id = Some("100001".into());
        let rows = [&e];
        assert_eq!(unique_sessions(&rows, SessionKey::Full), 1);
    }
}
