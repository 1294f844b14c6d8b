//! Terminal rendering of the three report pages.

use crate::core::report::AggregateReport;
use crate::models::{DatasetKind, RollupRow, Session};
use crate::ui::messages::{header, info, metric, warning};
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_mean, format_duration};

pub const NO_DATA: &str = "No data found for the selected filters.";

pub fn banner(session: &Session) {
    info(session.banner());
}

pub fn no_data() {
    warning(NO_DATA);
}

fn window(report: &AggregateReport) {
    metric(
        "Period",
        format!(
            "{} .. {}",
            report.from.format("%Y-%m-%d"),
            report.to.format("%Y-%m-%d")
        ),
    );
}

pub fn journal(report: &AggregateReport) {
    header("Journal");
    window(report);
    metric("Total Unique Places", report.unique_categories);
    metric("Total Time in Nature", format_duration(report.total_duration));

    header("Aggregated Counts of Nature Places");
    let mut t = Table::new(vec![
        Column::left("Date"),
        Column::left(DatasetKind::Journal.category_header()),
        Column::right("Count"),
        Column::right("Unique places"),
        Column::right("SumMin"),
        Column::right("Latitude"),
        Column::right("Longitude"),
    ]);
    for g in report.groups_by_duration() {
        t.add_row(vec![
            g.date.format("%Y-%m-%d").to_string(),
            g.category,
            g.count.to_string(),
            g.distinct_categories.to_string(),
            g.sum_duration.to_string(),
            fmt_mean(g.mean_latitude),
            fmt_mean(g.mean_longitude),
        ]);
    }
    print!("{}", t.render());

    header(format!("Top {} Places by Time Spent", report.top_n));
    let mut top = Table::new(vec![
        Column::right("#"),
        Column::left("Place"),
        Column::right("SumMin"),
        Column::right("Time"),
    ]);
    for (i, e) in report.top.iter().enumerate() {
        top.add_row(vec![
            (i + 1).to_string(),
            e.category.clone(),
            e.total_duration.to_string(),
            format_duration(e.total_duration),
        ]);
    }
    print!("{}", top.render());
}

pub fn checkins(report: &AggregateReport) {
    header("Check-in Sessions");
    window(report);
    metric("Check-ins", report.filtered.len());
    metric("Total Unique Sessions", report.unique_sessions);

    let series: [(&str, &[RollupRow]); 4] = [
        ("Unique Sessions per Day", report.rollups.daily.as_slice()),
        ("Unique Sessions per Week", report.rollups.weekly.as_slice()),
        ("Unique Sessions per Month", report.rollups.monthly.as_slice()),
        ("Unique Sessions per Year", report.rollups.yearly.as_slice()),
    ];

    for (title, rows) in series {
        header(title);
        let mut t = Table::new(vec![Column::left("Period end"), Column::right("Sessions")]);
        for r in rows {
            t.add_row(vec![
                r.period_end.format("%Y-%m-%d").to_string(),
                r.unique_sessions.to_string(),
            ]);
        }
        print!("{}", t.render());
    }
}

pub fn ratings(report: &AggregateReport) {
    header("Ratings");
    window(report);
    metric("Total Unique Sessions", report.unique_short_sessions);
    metric("Average Rating", fmt_or_dash(report.mean_rating));
    metric("Average Composite Score", fmt_or_dash(report.mean_composite_score));

    header("Aggregated Rating and Composite-Score Statistics");
    let mut t = Table::new(vec![
        Column::left("Date"),
        Column::left(DatasetKind::CheckIn.category_header()),
        Column::right("Count"),
        Column::right("Compscore"),
        Column::right("Nrating"),
    ]);
    for g in &report.groups {
        t.add_row(vec![
            g.date.format("%Y-%m-%d").to_string(),
            g.category.clone(),
            g.distinct_sessions.to_string(),
            fmt_mean(g.mean_composite_score),
            fmt_mean(g.mean_rating),
        ]);
    }
    print!("{}", t.render());
}

fn fmt_or_dash(v: Option<f64>) -> String {
    let s = fmt_mean(v);
    if s.is_empty() { "-".to_string() } else { s }
}
