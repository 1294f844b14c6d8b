use serde::{Deserialize, Serialize};

/// Access level granted by the permission sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Role-gated abilities. Report code asks the session for a capability
/// instead of comparing role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// See every user's rows instead of only one's own
    ViewAllUsers,
    /// Narrow a report to up to 3 selected emails and/or indicators
    CategoryFilters,
    /// List the registered users of the permission sheet
    ListUsers,
}

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ViewAllUsers,
    Capability::CategoryFilters,
    Capability::ListUsers,
];

impl Role {
    /// Parse a role cell. Only `admin` grants elevated access; any other
    /// non-empty value is an ordinary user.
    pub fn from_cell(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" => None,
            "admin" => Some(Role::Admin),
            _ => Some(Role::User),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Admin => ADMIN_CAPABILITIES,
            Role::User => &[],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
