//! High-level report building: one call per report page.

use crate::core::pipeline::grouping::sort_by_duration_desc;
use crate::core::pipeline::metrics::{mean_of, total_duration, unique_categories, unique_sessions};
use crate::core::pipeline::{
    FilterOutcome, ReportFilters, apply_filters, build_rollups, clamp_top_n,
    group_by_date_category, top_categories,
};
use crate::errors::AppResult;
use crate::models::{AggregateRow, DatasetKind, EventRecord, Rollups, Session, SessionKey, TopEntry};
use chrono::NaiveDateTime;
use tracing::debug;

/// Either an aggregate, or the "no data for the selected filters" state.
#[derive(Debug)]
pub enum ReportOutcome<T> {
    Ready(T),
    NoData,
}

/// Everything the report pages display, computed once from the filtered rows.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    pub kind: DatasetKind,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub filtered: Vec<EventRecord>,
    pub total_duration: i64,
    pub unique_categories: usize,
    /// Distinct `Session id` values
    pub unique_sessions: usize,
    /// Distinct `sess6digit` values
    pub unique_short_sessions: usize,
    pub mean_rating: Option<f64>,
    pub mean_composite_score: Option<f64>,
    pub groups: Vec<AggregateRow>,
    pub top_n: usize,
    pub top: Vec<TopEntry>,
    pub rollups: Rollups,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Scope, filter, group and rank `events` for `session`.
    ///
    /// `default_top_n` applies when the filters do not request a size.
    pub fn build(
        events: &[EventRecord],
        session: &Session,
        filters: &ReportFilters,
        kind: DatasetKind,
        default_top_n: usize,
    ) -> AppResult<ReportOutcome<AggregateReport>> {
        let (rows, from, to) = match apply_filters(events, session, filters)? {
            FilterOutcome::Rows { rows, from, to } => (rows, from, to),
            FilterOutcome::NoData => {
                debug!(dataset = kind.label(), "no rows left after filtering");
                return Ok(ReportOutcome::NoData);
            }
        };

        let distinct = unique_categories(&rows, kind);
        let top_n = clamp_top_n(filters.top_n, default_top_n, distinct)?;

        let report = AggregateReport {
            kind,
            from,
            to,
            total_duration: total_duration(&rows),
            unique_categories: distinct,
            unique_sessions: unique_sessions(&rows, SessionKey::Full),
            unique_short_sessions: unique_sessions(&rows, SessionKey::Short),
            mean_rating: mean_of(&rows, |e| e.rating),
            mean_composite_score: mean_of(&rows, |e| e.composite_score),
            groups: group_by_date_category(&rows, kind),
            top_n,
            top: top_categories(&rows, kind, top_n),
            rollups: build_rollups(&rows),
            filtered: rows.into_iter().cloned().collect(),
        };

        debug!(
            dataset = kind.label(),
            rows = report.filtered.len(),
            groups = report.groups.len(),
            "report built"
        );
        Ok(ReportOutcome::Ready(report))
    }
}

impl AggregateReport {
    /// Groups ordered by summed duration, largest first (journal page).
    pub fn groups_by_duration(&self) -> Vec<AggregateRow> {
        let mut g = self.groups.clone();
        sort_by_duration_desc(&mut g);
        g
    }
}
