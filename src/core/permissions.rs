//! Permission list loading with a time-to-live cache.
//!
//! A successful fetch is reused for `ttl`; a failed or empty fetch is
//! never cached and leaves any previous entry untouched.

use crate::errors::{AppError, AppResult};
use crate::models::PermissionRecord;
use crate::sources::read_permissions;
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the permission list comes from.
pub trait PermissionSource {
    fn fetch(&self) -> AppResult<Vec<PermissionRecord>>;
}

/// Permission sheet exported as CSV.
pub struct CsvPermissionSource {
    path: PathBuf,
}

impl CsvPermissionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PermissionSource for CsvPermissionSource {
    fn fetch(&self) -> AppResult<Vec<PermissionRecord>> {
        read_permissions(&self.path)
    }
}

/// A loaded permission list and the instant it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Vec<PermissionRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Refresh policy: an entry older than `ttl` must be re-fetched.
pub fn is_stale(fetched_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - fetched_at > ttl
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Cached,
    Fetched,
}

pub struct PermissionCache<S: PermissionSource> {
    source: S,
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl<S: PermissionSource> PermissionCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: None,
        }
    }

    /// Start from a previously persisted entry.
    pub fn with_entry(mut self, entry: Option<CacheEntry>) -> Self {
        self.entry = entry;
        self
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    /// Return the permission list, re-fetching it when the cached entry is stale.
    ///
    /// An empty list is reported as an error: no permissions means deny all.
    pub fn load(&mut self, now: DateTime<Utc>) -> AppResult<(&[PermissionRecord], Freshness)> {
        let fresh = self
            .entry
            .as_ref()
            .is_some_and(|e| !is_stale(e.fetched_at, now, self.ttl));

        if !fresh {
            let value = self.source.fetch()?;
            if value.is_empty() {
                return Err(AppError::LoadError("permission list is empty".into()));
            }
            info!(count = value.len(), "permission list refreshed");
            self.entry = Some(CacheEntry {
                value,
                fetched_at: now,
            });
        } else {
            debug!("permission list served from cache");
        }

        match &self.entry {
            Some(e) => Ok((
                &e.value,
                if fresh {
                    Freshness::Cached
                } else {
                    Freshness::Fetched
                },
            )),
            None => Err(AppError::LoadError("permission list unavailable".into())),
        }
    }
}
