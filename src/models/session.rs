use super::permission::PermissionRecord;
use super::role::{Capability, Role};
use chrono::{DateTime, Local};
use serde::Serialize;

/// The authenticated identity for the current user context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub email: String,
    pub role: Role,
    pub name: String,
    pub authenticated: bool,
    pub logged_in_at: DateTime<Local>,
}

impl Session {
    pub fn from_record(record: &PermissionRecord, now: DateTime<Local>) -> Self {
        Self {
            email: record.email.clone(),
            role: record.role,
            name: record.name.clone(),
            authenticated: true,
            logged_in_at: now,
        }
    }

    pub fn can(&self, cap: Capability) -> bool {
        self.authenticated && self.role.capabilities().contains(&cap)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Banner shown above every report.
    pub fn banner(&self) -> String {
        format!("You are logged in under {} as {}", self.email, self.role)
    }
}
