//! Per-invocation application context: configuration, database and the
//! current session. Session lifecycle: established at login, read while
//! building reports, torn down at logout (or when the user is removed from
//! the permission list).

use crate::config::Config;
use crate::core::auth::{Authenticator, SessionStore, store_unavailable};
use crate::core::permissions::{CsvPermissionSource, Freshness, PermissionCache};
use crate::db::cache_store;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::session_store::SqliteSessionStore;
use crate::errors::{AppError, AppResult};
use crate::models::{PermissionRecord, Session};
use chrono::Utc;
use tracing::{debug, warn};

pub struct AppContext {
    pub cfg: Config,
    pub pool: DbPool,
}

impl AppContext {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::open(&cfg.database)?;
        Ok(Self {
            cfg: cfg.clone(),
            pool,
        })
    }

    /// Permission cache seeded with the persisted entry.
    fn permission_cache(&self) -> AppResult<PermissionCache<CsvPermissionSource>> {
        let ttl = self.cfg.permission_ttl()?;
        let entry = cache_store::load_entry(&self.pool.conn)?;
        Ok(
            PermissionCache::new(CsvPermissionSource::new(&self.cfg.permissions_file), ttl)
                .with_entry(entry),
        )
    }

    /// Persist the cache entry when the last load re-fetched it.
    fn persist_cache(
        &self,
        cache: &PermissionCache<CsvPermissionSource>,
        freshness: Freshness,
    ) -> AppResult<()> {
        if freshness == Freshness::Fetched
            && let Some(entry) = cache.entry()
        {
            cache_store::save_entry(&self.pool.conn, entry)?;
        }
        Ok(())
    }

    /// Current permission list (cached for the configured time-to-live).
    pub fn permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        let mut cache = self.permission_cache()?;
        let (records, freshness) = cache
            .load(Utc::now())
            .map(|(r, f)| (r.to_vec(), f))
            .map_err(store_unavailable)?;
        self.persist_cache(&cache, freshness)?;
        Ok(records)
    }

    pub fn login(&mut self, email: &str) -> AppResult<Session> {
        let mut cache = self.permission_cache()?;
        let mut store = SqliteSessionStore::new(&self.pool.conn);
        let previous_fetch = cache.entry().map(|e| e.fetched_at);

        let result = Authenticator::login(email, &mut cache, &mut store, Utc::now());

        if cache.entry().map(|e| e.fetched_at) != previous_fetch {
            self.persist_cache(&cache, Freshness::Fetched)?;
        }

        match &result {
            Ok(s) => ttlog(&self.pool.conn, "login", &s.email, &format!("role={}", s.role))?,
            Err(e) => {
                if let Err(log_err) =
                    ttlog(&self.pool.conn, "login_failed", email.trim(), &e.to_string())
                {
                    warn!(error = %log_err, "could not record failed login");
                }
            }
        }
        result
    }

    /// Returns whether a session was cleared.
    pub fn logout(&mut self) -> AppResult<bool> {
        let mut store = SqliteSessionStore::new(&self.pool.conn);
        let email = store.current()?.map(|s| s.email);
        let cleared = Authenticator::logout(&mut store)?;
        if let Some(email) = email {
            ttlog(&self.pool.conn, "logout", &email, "session cleared")?;
        }
        Ok(cleared)
    }

    /// The stored session, without checking it against the permission list.
    pub fn stored_session(&self) -> AppResult<Option<Session>> {
        SqliteSessionStore::new(&self.pool.conn).current()
    }

    /// The current session, re-validated against the permission list.
    ///
    /// A session whose email has been removed is torn down and the caller
    /// must log in again.
    pub fn require_session(&mut self) -> AppResult<Session> {
        let Some(session) = self.stored_session()?.filter(|s| s.authenticated) else {
            return Err(AppError::NotAuthenticated);
        };

        let mut cache = self.permission_cache()?;
        let previous_fetch = cache.entry().map(|e| e.fetched_at);
        let checked = Authenticator::revalidate(&session, &mut cache, Utc::now())?;
        if cache.entry().map(|e| e.fetched_at) != previous_fetch {
            self.persist_cache(&cache, Freshness::Fetched)?;
        }

        match checked {
            Some(current) => {
                if current != session {
                    debug!(email = %current.email, "session refreshed from permission list");
                    SqliteSessionStore::new(&self.pool.conn).establish(&current)?;
                }
                Ok(current)
            }
            None => {
                warn!(email = %session.email, "session expired: email no longer listed");
                SqliteSessionStore::new(&self.pool.conn).clear()?;
                ttlog(
                    &self.pool.conn,
                    "session_expired",
                    &session.email,
                    "email removed from permission list",
                )?;
                Err(AppError::NotAuthenticated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn context(dir: &std::path::Path) -> AppContext {
        let perm = dir.join("perm.csv");
        fs::write(&perm, "email,role,name\nada@nc.org,admin,Ada\nbob@nc.org,user,\n").unwrap();
        let cfg = Config {
            database: dir.join("db.sqlite").to_string_lossy().to_string(),
            permissions_file: perm.to_string_lossy().to_string(),
            ..Config::default()
        };
        AppContext::open(&cfg).unwrap()
    }

    #[test]
    fn login_persists_session_and_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());

        let s = ctx.login(" BOB@nc.org").unwrap();
        assert_eq!(s.email, "bob@nc.org");
        assert_eq!(ctx.require_session().unwrap().email, "bob@nc.org");
        assert!(cache_store::load_entry(&ctx.pool.conn).unwrap().is_some());
    }

    #[test]
    fn cached_list_survives_source_removal_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.login("ada@nc.org").unwrap();

        fs::remove_file(dir.path().join("perm.csv")).unwrap();
        assert_eq!(ctx.permissions().unwrap().len(), 2);
    }

    #[test]
    fn missing_source_without_cache_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        fs::remove_file(dir.path().join("perm.csv")).unwrap();

        assert!(matches!(
            ctx.login("ada@nc.org"),
            Err(AppError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn removed_user_session_expires() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.login("bob@nc.org").unwrap();

        fs::write(dir.path().join("perm.csv"), "email,role\nada@nc.org,admin\n").unwrap();
        cache_store::invalidate(&ctx.pool.conn).unwrap();

        assert!(matches!(ctx.require_session(), Err(AppError::NotAuthenticated)));
        assert!(ctx.stored_session().unwrap().is_none());
    }

    #[test]
    fn logout_without_session_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        assert!(!ctx.logout().unwrap());
        ctx.login("ada@nc.org").unwrap();
        assert!(ctx.logout().unwrap());
        assert!(matches!(ctx.require_session(), Err(AppError::NotAuthenticated)));
    }

    #[test]
    fn failed_audit_write_keeps_the_login_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.pool.conn.execute_batch("DROP TABLE log;").unwrap();

        assert!(matches!(ctx.login("eve@nc.org"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn oversized_ttl_fails_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.cfg.permission_ttl_secs = u64::MAX;

        assert!(matches!(ctx.login("ada@nc.org"), Err(AppError::Config(_))));
    }
}
