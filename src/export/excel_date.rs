use chrono::NaiveDate;

pub(crate) const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Excel serial for a calendar date (1900 date system, epoch 1899-12-30).
pub(crate) fn date_to_excel_serial(d: NaiveDate) -> f64 {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(|epoch| (d - epoch).num_days() as f64)
        .unwrap_or_default()
}
