//! `journal`, `checkins` and `ratings`: the three report pages.

use crate::cli::parser::ReportArgs;
use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::pipeline::ReportFilters;
use crate::core::report::{AggregateReport, ReportLogic, ReportOutcome};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportLogic, ExportTable};
use crate::models::DatasetKind;
use crate::sources::load_events;
use crate::ui::messages::warning;
use crate::ui::render;
use crate::utils::date::{end_of_day, parse_date, parse_range, start_of_day};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Journal,
    Checkins,
    Ratings,
}

impl Page {
    fn dataset(&self) -> DatasetKind {
        match self {
            Page::Journal => DatasetKind::Journal,
            Page::Checkins | Page::Ratings => DatasetKind::CheckIn,
        }
    }

    fn render(&self, report: &AggregateReport) {
        match self {
            Page::Journal => render::journal(report),
            Page::Checkins => render::checkins(report),
            Page::Ratings => render::ratings(report),
        }
    }

    fn export_table(&self, report: &AggregateReport) -> ExportTable {
        match self {
            Page::Journal => ExportTable::journal(report),
            Page::Checkins => ExportTable::rollups(&report.rollups),
            Page::Ratings => ExportTable::ratings(report),
        }
    }
}

pub fn handle(
    page: Page,
    args: &ReportArgs,
    emails: &[String],
    indicators: &[String],
    top_n: Option<usize>,
    cfg: &Config,
) -> AppResult<()> {
    let mut ctx = AppContext::open(cfg)?;
    let session = ctx.require_session()?;
    render::banner(&session);

    let filters = build_filters(args, emails, indicators, top_n)?;
    filters.validate(&session)?;

    let kind = page.dataset();
    let (file, header_row) = match kind {
        DatasetKind::Journal => (&cfg.journal_file, cfg.journal_header_row),
        DatasetKind::CheckIn => (&cfg.checkin_file, cfg.checkin_header_row),
    };

    let loaded = load_events(Path::new(file), kind, header_row)?;
    if loaded.rejected > 0 {
        warning(format!(
            "{} {} row(s) skipped (missing timestamp, email or malformed numbers)",
            loaded.rejected,
            kind.label()
        ));
    }

    let report = match ReportLogic::build(
        &loaded.records,
        &session,
        &filters,
        kind,
        cfg.default_top_n,
    )? {
        ReportOutcome::Ready(r) => r,
        ReportOutcome::NoData => {
            render::no_data();
            return Ok(());
        }
    };

    info!(page = ?page, rows = report.filtered.len(), "report ready");
    page.render(&report);

    if let (Some(format), Some(path)) = (args.export, args.file.as_deref()) {
        let table = page.export_table(&report);
        ExportLogic::export(&ctx.pool, &table, format, path, args.force, &session.email)?;
    }

    Ok(())
}

/// Turn `--from/--to` or `--range` into inclusive timestamp bounds.
///
/// A date-only upper bound covers that whole day. A reversed window is
/// passed through and simply matches nothing.
pub fn build_filters(
    args: &ReportArgs,
    emails: &[String],
    indicators: &[String],
    top_n: Option<usize>,
) -> AppResult<ReportFilters> {
    let (from, to) = match &args.range {
        Some(r) => {
            let (f, t) = parse_range(r)?;
            (Some(f), Some(t))
        }
        None => (
            args.from.as_deref().map(date_arg).transpose()?,
            args.to.as_deref().map(date_arg).transpose()?,
        ),
    };

    Ok(ReportFilters {
        from: from.map(start_of_day),
        to: to.map(end_of_day),
        emails: emails.to_vec(),
        indicators: indicators.to_vec(),
        top_n,
    })
}

fn date_arg(s: &str) -> AppResult<chrono::NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bound_covers_the_whole_day() {
        let args = ReportArgs {
            from: Some("2024-01-01".into()),
            to: Some("2024-01-02".into()),
            ..ReportArgs::default()
        };
        let f = build_filters(&args, &[], &[], None).unwrap();
        assert_eq!(f.from.unwrap().to_string(), "2024-01-01 00:00:00");
        assert_eq!(f.to.unwrap().format("%H:%M:%S").to_string(), "23:59:59");
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let bad = ReportArgs {
            from: Some("01/02/2024".into()),
            ..ReportArgs::default()
        };
        assert!(matches!(
            build_filters(&bad, &[], &[], None),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn range_sets_both_bounds() {
        let args = ReportArgs {
            range: Some("2024-02".into()),
            ..ReportArgs::default()
        };
        let f = build_filters(&args, &[], &[], Some(3)).unwrap();
        assert_eq!(f.from.unwrap().date().to_string(), "2024-02-01");
        assert_eq!(f.to.unwrap().date().to_string(), "2024-02-29");
        assert_eq!(f.top_n, Some(3));
    }
}
