//! Login gate: an email listed in the permission sheet is the whole proof of identity.

use crate::core::permissions::{PermissionCache, PermissionSource};
use crate::errors::{AppError, AppResult};
use crate::models::permission::normalize_email;
use crate::models::{PermissionRecord, Session};
use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

/// Holder of the current session for one user context.
pub trait SessionStore {
    fn current(&self) -> AppResult<Option<Session>>;
    fn establish(&mut self, session: &Session) -> AppResult<()>;
    /// Remove the session. Returns whether one existed.
    fn clear(&mut self) -> AppResult<bool>;
}

/// Any failure to obtain the permission list denies access.
pub(crate) fn store_unavailable(e: AppError) -> AppError {
    match e {
        AppError::LoadError(msg) | AppError::StoreUnavailable(msg) => {
            AppError::StoreUnavailable(msg)
        }
        other => AppError::StoreUnavailable(other.to_string()),
    }
}

pub struct Authenticator;

impl Authenticator {
    /// Look up the record matching `email` after normalization.
    pub fn find<'a>(email: &str, records: &'a [PermissionRecord]) -> Option<&'a PermissionRecord> {
        let email = normalize_email(email);
        records.iter().find(|r| r.email == email)
    }

    /// Match `email` against the permission list and build a session.
    ///
    /// - `StoreUnavailable`: the list could not be loaded (or is empty)
    /// - `NotFound`: no record for the normalized email
    pub fn authenticate<S: PermissionSource>(
        email: &str,
        cache: &mut PermissionCache<S>,
        now: DateTime<Utc>,
    ) -> AppResult<Session> {
        let normalized = normalize_email(email);
        if normalized.is_empty() {
            return Err(AppError::NotFound("<empty>".into()));
        }

        let (records, _) = cache.load(now).map_err(store_unavailable)?;

        let record = Self::find(&normalized, records).ok_or_else(|| {
            warn!(email = %normalized, "login refused: email not in permission list");
            AppError::NotFound(normalized.clone())
        })?;

        Ok(Session::from_record(record, now.with_timezone(&Local)))
    }

    /// Authenticate and make the session current.
    pub fn login<S: PermissionSource, T: SessionStore>(
        email: &str,
        cache: &mut PermissionCache<S>,
        store: &mut T,
        now: DateTime<Utc>,
    ) -> AppResult<Session> {
        let session = Self::authenticate(email, cache, now)?;
        store.establish(&session)?;
        info!(email = %session.email, role = %session.role, "session established");
        Ok(session)
    }

    /// Clear the current session. Logging out twice is not an error.
    pub fn logout<T: SessionStore>(store: &mut T) -> AppResult<bool> {
        let existed = store.clear()?;
        if existed {
            info!("session cleared");
        }
        Ok(existed)
    }

    /// Check a stored session against the current permission list.
    ///
    /// Returns the session refreshed with the current role and name, or
    /// `None` when its email has been removed from the list.
    pub fn revalidate<S: PermissionSource>(
        session: &Session,
        cache: &mut PermissionCache<S>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Session>> {
        let (records, _) = cache.load(now).map_err(store_unavailable)?;

        Ok(Self::find(&session.email, records).map(|r| Session {
            role: r.role,
            name: r.name.clone(),
            ..session.clone()
        }))
    }
}
