//! The current session, persisted between CLI invocations as a single row.

use crate::core::auth::SessionStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Role, Session};
use chrono::{DateTime, Local};
use rusqlite::{Connection, OptionalExtension, params};

pub struct SqliteSessionStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSessionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SessionStore for SqliteSessionStore<'_> {
    fn current(&self) -> AppResult<Option<Session>> {
        let row = self
            .conn
            .query_row(
                "SELECT email, role, name, authenticated, logged_in_at FROM session WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, bool>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((email, role, name, authenticated, logged_in_at)) = row else {
            return Ok(None);
        };

        let role = Role::from_cell(&role)
            .ok_or_else(|| AppError::Other(format!("corrupt session role '{role}'")))?;
        let logged_in_at = DateTime::parse_from_rfc3339(&logged_in_at)
            .map(|dt| dt.with_timezone(&Local))
            .map_err(|e| AppError::Other(format!("corrupt session timestamp: {e}")))?;

        Ok(Some(Session {
            email,
            role,
            name,
            authenticated,
            logged_in_at,
        }))
    }

    fn establish(&mut self, session: &Session) -> AppResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO session (id, email, role, name, authenticated, logged_in_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5)",
            params![
                session.email,
                session.role.as_str(),
                session.name,
                session.authenticated,
                session.logged_in_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> AppResult<bool> {
        let removed = self.conn.execute("DELETE FROM session", [])?;
        Ok(removed > 0)
    }
}
