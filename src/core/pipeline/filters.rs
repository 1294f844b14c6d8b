use crate::errors::{AppError, AppResult};
use crate::models::permission::normalize_email;
use crate::models::{Capability, EventRecord, Session};
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Upper bound on multi-select filters (emails, indicators).
pub const MAX_SELECTIONS: usize = 3;

/// User-supplied filters for one report run.
#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub emails: Vec<String>,
    pub indicators: Vec<String>,
    pub top_n: Option<usize>,
}

impl ReportFilters {
    /// Reject oversized selections, and selections the session may not make.
    pub fn validate(&self, session: &Session) -> AppResult<()> {
        check_count("emails", self.emails.len())?;
        check_count("indicators", self.indicators.len())?;

        let selects = !self.emails.is_empty() || !self.indicators.is_empty();
        if selects && !session.can(Capability::CategoryFilters) {
            return Err(AppError::PermissionDenied(
                "email and indicator filters are available to admins only".into(),
            ));
        }
        Ok(())
    }
}

fn check_count(what: &'static str, count: usize) -> AppResult<()> {
    if count > MAX_SELECTIONS {
        return Err(AppError::TooManySelections {
            what,
            count,
            max: MAX_SELECTIONS,
        });
    }
    Ok(())
}

/// Result of the filter stage.
#[derive(Debug)]
pub enum FilterOutcome<'a> {
    Rows {
        rows: Vec<&'a EventRecord>,
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    /// Nothing left to aggregate (including an empty scoped dataset).
    NoData,
}

/// Keep only the caller's rows unless the session may see everyone's.
pub fn scope<'a>(events: &'a [EventRecord], session: &Session) -> Vec<&'a EventRecord> {
    if session.can(Capability::ViewAllUsers) {
        events.iter().collect()
    } else {
        events
            .iter()
            .filter(|e| e.user_email == session.email)
            .collect()
    }
}

/// Earliest and latest timestamp, used as the default date range.
pub fn default_bounds(rows: &[&EventRecord]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let min = rows.iter().map(|e| e.timestamp).min()?;
    let max = rows.iter().map(|e| e.timestamp).max()?;
    Some((min, max))
}

/// Inclusive on both ends; `from > to` keeps nothing.
pub fn by_date<'a>(
    rows: &[&'a EventRecord],
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Vec<&'a EventRecord> {
    rows.iter()
        .copied()
        .filter(|e| from <= e.timestamp && e.timestamp <= to)
        .collect()
}

/// Restrict to the selected emails and/or indicators. Empty selections keep everything.
pub fn by_selection<'a>(
    rows: &[&'a EventRecord],
    emails: &[String],
    indicators: &[String],
) -> Vec<&'a EventRecord> {
    let emails: HashSet<String> = emails.iter().map(|e| normalize_email(e)).collect();
    let indicators: HashSet<&str> = indicators.iter().map(|i| i.trim()).collect();

    rows.iter()
        .copied()
        .filter(|e| emails.is_empty() || emails.contains(&e.user_email))
        .filter(|e| {
            indicators.is_empty()
                || e.indicator
                    .as_deref()
                    .is_some_and(|i| indicators.contains(i))
        })
        .collect()
}

/// Scope, date range and categorical filters, in that order.
pub fn apply_filters<'a>(
    events: &'a [EventRecord],
    session: &Session,
    filters: &ReportFilters,
) -> AppResult<FilterOutcome<'a>> {
    filters.validate(session)?;

    let scoped = scope(events, session);
    let Some((min, max)) = default_bounds(&scoped) else {
        return Ok(FilterOutcome::NoData);
    };

    let from = filters.from.unwrap_or(min);
    let to = filters.to.unwrap_or(max);

    let dated = by_date(&scoped, from, to);
    let rows = by_selection(&dated, &filters.emails, &filters.indicators);

    if rows.is_empty() {
        return Ok(FilterOutcome::NoData);
    }
    Ok(FilterOutcome::Rows { rows, from, to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PermissionRecord, Role};
    use crate::utils::date::parse_timestamp;
    use chrono::Utc;

    fn ev(ts: &str, email: &str, indicator: Option<&str>) -> EventRecord {
        let mut e = EventRecord::new(parse_timestamp(ts).unwrap(), email);
        e.indicator = indicator.map(str::to_string);
        e
    }

    fn session(email: &str, role: Role) -> Session {
        Session::from_record(
            &PermissionRecord::new(email, role, None),
            Utc::now().into(),
        )
    }

    fn dataset() -> Vec<EventRecord> {
        vec![
            ev("2024-01-01 09:00:00", "a@x.com", Some("Calm")),
            ev("2024-01-02 09:00:00", "b@x.com", Some("Joy")),
            ev("2024-01-03 09:00:00", "a@x.com", Some("Joy")),
            ev("2024-01-04 09:00:00", "c@x.com", None),
        ]
    }

    #[test]
    fn non_admin_only_ever_sees_own_rows() {
        let events = dataset();
        let s = session("a@x.com", Role::User);
        let filters = ReportFilters {
            from: parse_timestamp("2023-01-01"),
            to: parse_timestamp("2025-01-01"),
            ..Default::default()
        };
        match apply_filters(&events, &s, &filters).unwrap() {
            FilterOutcome::Rows { rows, .. } => {
                assert_eq!(rows.len(), 2);
                assert!(rows.iter().all(|e| e.user_email == "a@x.com"));
            }
            FilterOutcome::NoData => panic!("expected rows"),
        }
    }

    #[test]
    fn non_admin_cannot_use_category_filters() {
        let events = dataset();
        let s = session("a@x.com", Role::User);
        let filters = ReportFilters {
            emails: vec!["b@x.com".into()],
            ..Default::default()
        };
        assert!(matches!(
            apply_filters(&events, &s, &filters),
            Err(AppError::PermissionDenied(_))
        ));
    }

    #[test]
    fn admin_sees_all_and_can_select() {
        let events = dataset();
        let s = session("root@x.com", Role::Admin);

        let all = scope(&events, &s);
        assert_eq!(all.len(), 4);

        let filters = ReportFilters {
            emails: vec![" A@x.com".into(), "b@x.com".into()],
            indicators: vec!["Joy".into()],
            ..Default::default()
        };
        match apply_filters(&events, &s, &filters).unwrap() {
            FilterOutcome::Rows { rows, .. } => {
                assert_eq!(rows.len(), 2);
                assert!(rows.iter().all(|e| e.indicator.as_deref() == Some("Joy")));
            }
            FilterOutcome::NoData => panic!("expected rows"),
        }
    }

    #[test]
    fn more_than_three_selections_is_rejected() {
        let events = dataset();
        let s = session("root@x.com", Role::Admin);
        let filters = ReportFilters {
            indicators: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            ..Default::default()
        };
        assert!(matches!(
            apply_filters(&events, &s, &filters),
            Err(AppError::TooManySelections { count: 4, .. })
        ));
    }

    #[test]
    fn date_range_is_inclusive_and_inverted_range_is_empty() {
        let events = dataset();
        let all: Vec<&EventRecord> = events.iter().collect();
        let a = parse_timestamp("2024-01-02 09:00:00").unwrap();
        let b = parse_timestamp("2024-01-03 09:00:00").unwrap();

        let kept = by_date(&all, a, b);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| a <= e.timestamp && e.timestamp <= b));

        assert!(by_date(&all, b, a).is_empty());
    }

    #[test]
    fn defaults_to_full_span_of_scoped_rows() {
        let events = dataset();
        let s = session("a@x.com", Role::User);
        match apply_filters(&events, &s, &ReportFilters::default()).unwrap() {
            FilterOutcome::Rows { from, to, rows } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(from, parse_timestamp("2024-01-01 09:00:00").unwrap());
                assert_eq!(to, parse_timestamp("2024-01-03 09:00:00").unwrap());
            }
            FilterOutcome::NoData => panic!("expected rows"),
        }
    }

    #[test]
    fn empty_result_is_no_data() {
        let events = dataset();
        let stranger = session("z@x.com", Role::User);
        assert!(matches!(
            apply_filters(&events, &stranger, &ReportFilters::default()).unwrap(),
            FilterOutcome::NoData
        ));

        let s = session("a@x.com", Role::User);
        let filters = ReportFilters {
            from: parse_timestamp("2030-01-01"),
            ..Default::default()
        };
        assert!(matches!(
            apply_filters(&events, &s, &filters).unwrap(),
            FilterOutcome::NoData
        ));
    }
}
