//! Persistence of the permission cache entry, so its time-to-live spans
//! separate CLI invocations.

use crate::core::permissions::CacheEntry;
use crate::errors::{AppError, AppResult};
use crate::models::{PermissionRecord, Role};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

const FETCHED_AT_KEY: &str = "permissions_fetched_at";

pub fn load_entry(conn: &Connection) -> AppResult<Option<CacheEntry>> {
    let fetched_at: Option<String> = conn
        .query_row(
            "SELECT value FROM cache_meta WHERE key = ?1",
            [FETCHED_AT_KEY],
            |row| row.get(0),
        )
        .optional()?;

    let Some(raw) = fetched_at else {
        return Ok(None);
    };
    let fetched_at = DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Other(format!("corrupt cache timestamp: {e}")))?;

    let mut stmt =
        conn.prepare_cached("SELECT email, role, name FROM permission_cache ORDER BY position")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut value = Vec::new();
    for r in rows {
        let (email, role, name) = r?;
        let role = Role::from_cell(&role).unwrap_or(Role::User);
        value.push(PermissionRecord::new(&email, role, Some(&name)));
    }

    Ok(Some(CacheEntry { value, fetched_at }))
}

/// Replace the stored entry wholesale.
pub fn save_entry(conn: &Connection, entry: &CacheEntry) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM permission_cache", [])?;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO permission_cache (position, email, role, name) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (i, r) in entry.value.iter().enumerate() {
            stmt.execute(params![i as i64, r.email, r.role.as_str(), r.name])?;
        }
    }
    tx.execute(
        "INSERT OR REPLACE INTO cache_meta (key, value) VALUES (?1, ?2)",
        params![FETCHED_AT_KEY, entry.fetched_at.to_rfc3339()],
    )?;
    tx.commit()?;
    Ok(())
}

/// Forget the stored entry; the next load re-fetches.
pub fn invalidate(conn: &Connection) -> AppResult<()> {
    conn.execute("DELETE FROM cache_meta WHERE key = ?1", [FETCHED_AT_KEY])?;
    conn.execute("DELETE FROM permission_cache", [])?;
    Ok(())
}
