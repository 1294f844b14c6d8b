//! Unified application error type.
//! Loaders, the permission cache, the report pipeline and the CLI handlers
//! all return AppError so every failure reaches the terminal as one message.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("Unable to load permissions: {0}. Please contact your administrator.")]
    StoreUnavailable(String),

    #[error("Email not found: {0}. Access denied.")]
    NotFound(String),

    #[error("Please log in first (ncdash login <EMAIL>).")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // ---------------------------
    // Data sources
    // ---------------------------
    #[error("Failed to load data: {0}")]
    LoadError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Parsing / filters
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Too many {what} selected: {count} (at most {max})")]
    TooManySelections {
        what: &'static str,
        count: usize,
        max: usize,
    },

    #[error("Invalid Top N value {0}: must be between 1 and {1}")]
    InvalidTopN(usize, usize),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
