use crate::core::report::AggregateReport;
use crate::models::{RollupRow, Rollups};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// A typed export cell, so XLSX gets real numbers and dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    fn opt_float(v: Option<f64>) -> Self {
        v.map_or(Cell::Empty, Cell::Float)
    }

    /// Plain-text form used by CSV.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// A titled table ready to be written in any export format.
#[derive(Debug, Clone)]
pub struct ExportTable {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl ExportTable {
    /// Journal aggregate: one row per (date, place), largest SumMin first.
    pub fn journal(report: &AggregateReport) -> Self {
        let rows = report
            .groups_by_duration()
            .into_iter()
            .map(|g| {
                vec![
                    Cell::Date(g.date),
                    Cell::Text(g.category),
                    Cell::Int(g.count as i64),
                    Cell::Int(g.distinct_categories as i64),
                    Cell::Int(g.sum_duration),
                    Cell::opt_float(g.mean_latitude),
                    Cell::opt_float(g.mean_longitude),
                ]
            })
            .collect();

        Self {
            title: "Aggregated Counts of Nature Places".into(),
            headers: vec![
                "Date",
                "Place",
                "Count",
                "Unique_places",
                "SumMin",
                "Latitude",
                "Longitude",
            ],
            rows,
        }
    }

    /// Ratings aggregate: one row per (date, indicator).
    pub fn ratings(report: &AggregateReport) -> Self {
        let rows = report
            .groups
            .iter()
            .map(|g| {
                vec![
                    Cell::Date(g.date),
                    Cell::Text(g.category.clone()),
                    Cell::Int(g.distinct_sessions as i64),
                    Cell::opt_float(g.mean_composite_score),
                    Cell::opt_float(g.mean_rating),
                ]
            })
            .collect();

        Self {
            title: "Aggregated Rating and Composite-Score Statistics".into(),
            headers: vec!["Date", "Indicator", "Count", "Compscore", "Nrating"],
            rows,
        }
    }

    /// Unique-session rollups, all buckets in one table.
    pub fn rollups(rollups: &Rollups) -> Self {
        let series: [(&str, &Vec<RollupRow>); 4] = [
            ("day", &rollups.daily),
            ("week", &rollups.weekly),
            ("month", &rollups.monthly),
            ("year", &rollups.yearly),
        ];

        let rows = series
            .iter()
            .flat_map(|(bucket, rows)| {
                rows.iter().map(move |r| {
                    vec![
                        Cell::Text(bucket.to_string()),
                        Cell::Date(r.period_end),
                        Cell::Int(r.unique_sessions as i64),
                    ]
                })
            })
            .collect();

        Self {
            title: "Unique Check-in Sessions".into(),
            headers: vec!["Bucket", "PeriodEnd", "UniqueSessions"],
            rows,
        }
    }

    /// Rows as JSON objects keyed by header.
    pub fn to_json_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let obj: Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(h, c)| (h.to_string(), serde_json::to_value(c).unwrap_or(Value::Null)))
                    .collect();
                Value::Object(obj)
            })
            .collect()
    }
}
