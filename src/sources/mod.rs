//! Loaders for the tabular exports of the spreadsheets.
//!
//! Rows are validated into strongly-typed records here; nothing untyped
//! leaves this module.

pub mod events;
pub mod permissions;
mod sheet;

pub use events::{LoadedEvents, load_events};
pub use permissions::read_permissions;
