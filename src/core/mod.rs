pub mod auth;
pub mod context;
pub mod log;
pub mod permissions;
pub mod pipeline;
pub mod report;
