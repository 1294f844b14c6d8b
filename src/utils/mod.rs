pub mod date;
pub mod formatting;
pub mod path;
pub mod table;

pub use formatting::{fmt_mean, format_duration, round2};
