use super::role::Role;
use serde::Serialize;

/// Display name used when the permission sheet leaves `name` empty.
pub const DEFAULT_NAME: &str = "User";

/// One row of the permission sheet, validated at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRecord {
    pub email: String, // normalized: trimmed + lowercase
    pub role: Role,
    pub name: String,
}

impl PermissionRecord {
    pub fn new(email: &str, role: Role, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NAME);
        Self {
            email: normalize_email(email),
            role,
            name: name.to_string(),
        }
    }
}

/// Canonical form of an email used for every comparison.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
