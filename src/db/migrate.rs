//! Schema migrations, tracked with `PRAGMA user_version`.

use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use tracing::info;

struct Migration {
    version: i32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_log_and_session",
        sql: r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS session (
            id            INTEGER PRIMARY KEY CHECK (id = 1),
            email         TEXT NOT NULL,
            role          TEXT NOT NULL CHECK (role IN ('admin','user')),
            name          TEXT NOT NULL,
            authenticated INTEGER NOT NULL DEFAULT 1,
            logged_in_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: 2,
        name: "create_permission_cache",
        sql: r#"
        CREATE TABLE IF NOT EXISTS permission_cache (
            position INTEGER NOT NULL,
            email    TEXT PRIMARY KEY,
            role     TEXT NOT NULL CHECK (role IN ('admin','user')),
            name     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cache_meta (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    },
];

pub fn current_version(conn: &Connection) -> AppResult<i32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Apply every migration newer than the database's `user_version`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let start = current_version(conn)?;

    for m in MIGRATIONS.iter().filter(|m| m.version > start) {
        conn.execute_batch(&format!(
            "BEGIN;\n{}\nPRAGMA user_version = {};\nCOMMIT;",
            m.sql, m.version
        ))
        .map_err(|e| AppError::Migration(format!("{} failed: {e}", m.name)))?;

        info!(version = m.version, name = m.name, "migration applied");
        ttlog(conn, "migration_applied", m.name, &format!("schema at version {}", m.version))?;
    }

    Ok(())
}
