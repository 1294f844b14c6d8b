use super::sheet::{Sheet, cell};
use crate::errors::AppResult;
use crate::models::permission::normalize_email;
use crate::models::{PermissionRecord, Role};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Read the permission sheet export (`email`, `role`, optional `name`).
///
/// Rows without an email or a role are skipped. When an email appears
/// twice, the first row wins.
pub fn read_permissions(path: &Path) -> AppResult<Vec<PermissionRecord>> {
    let sheet = Sheet::read(path, 0)?;
    let email_col = sheet.require("email", path)?;
    let role_col = sheet.require("role", path)?;
    let name_col = sheet.column("name");

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(sheet.rows.len());

    for (line, row) in sheet.rows.iter().enumerate() {
        let Some(email) = cell(row, Some(email_col)).map(normalize_email) else {
            warn!(row = line + 1, "permission row without email skipped");
            continue;
        };
        let Some(role) = cell(row, Some(role_col)).and_then(Role::from_cell) else {
            warn!(row = line + 1, %email, "permission row without role skipped");
            continue;
        };
        if !seen.insert(email.clone()) {
            warn!(%email, "duplicate permission row ignored");
            continue;
        }
        records.push(PermissionRecord::new(&email, role, cell(row, name_col)));
    }

    debug!(count = records.len(), path = %path.display(), "permissions read");
    Ok(records)
}
