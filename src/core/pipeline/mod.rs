//! Filter → group → rank → roll up. Every step is a pure function over
//! borrowed rows; the loaded dataset is never mutated.

pub mod filters;
pub mod grouping;
pub mod metrics;
pub mod rollup;
pub mod top_n;

pub use filters::{FilterOutcome, ReportFilters, apply_filters};
pub use grouping::group_by_date_category;
pub use rollup::build_rollups;
pub use top_n::{clamp_top_n, top_categories};
