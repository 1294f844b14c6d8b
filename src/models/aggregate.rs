use chrono::NaiveDate;
use serde::Serialize;

/// Statistics for one (date, category) group of the filtered rows.
///
/// Means are `None` when no row of the group carries the field, so an
/// aggregate never holds NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub date: NaiveDate,
    pub category: String,
    pub count: usize,
    pub distinct_categories: usize,
    pub distinct_sessions: usize,
    pub sum_duration: i64,
    pub mean_latitude: Option<f64>,
    pub mean_longitude: Option<f64>,
    pub mean_rating: Option<f64>,
    pub mean_composite_score: Option<f64>,
}

/// A category ranked by its summed duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopEntry {
    pub category: String,
    pub total_duration: i64,
}

/// Distinct-session count for one time bucket, labelled by the bucket's last day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupRow {
    pub period_end: NaiveDate,
    pub unique_sessions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rollups {
    pub daily: Vec<RollupRow>,
    pub weekly: Vec<RollupRow>,
    pub monthly: Vec<RollupRow>,
    pub yearly: Vec<RollupRow>,
}
