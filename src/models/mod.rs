pub mod aggregate;
pub mod event;
pub mod permission;
pub mod role;
pub mod session;

pub use aggregate::{AggregateRow, RollupRow, Rollups, TopEntry};
pub use event::{DatasetKind, EventRecord, SessionKey};
pub use permission::PermissionRecord;
pub use role::{Capability, Role};
pub use session::Session;
