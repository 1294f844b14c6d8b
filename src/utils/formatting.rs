//! Formatting utilities used for CLI metrics and export outputs.

/// Render a minute total as hours and minutes, e.g. `60` → `"1h 0m"`.
pub fn format_duration(total_minutes: i64) -> String {
    let sign = if total_minutes < 0 { "-" } else { "" };
    let abs_m = total_minutes.abs();
    format!("{}{}h {}m", sign, abs_m / 60, abs_m % 60)
}

/// Round to 2 decimal places. Display only: aggregates keep full precision.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Format an optional mean for a table cell (2 dp, empty when absent).
pub fn fmt_mean(v: Option<f64>) -> String {
    v.map(|x| format!("{:.2}", round2(x))).unwrap_or_default()
}
