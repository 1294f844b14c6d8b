use crate::config::Config;
use crate::core::context::AppContext;
use crate::errors::{AppError, AppResult};
use crate::models::Capability;
use crate::ui::messages::header;
use crate::utils::table::{Column, Table};

/// List the registered users (email and role only). Requires the `ListUsers` capability.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut ctx = AppContext::open(cfg)?;
    let session = ctx.require_session()?;
    if !session.can(Capability::ListUsers) {
        return Err(AppError::PermissionDenied(
            "listing users is available to admins only".into(),
        ));
    }

    let records = ctx.permissions()?;

    header(format!("Registered users ({})", records.len()));
    let mut t = Table::new(vec![
        Column::left("Email"),
        Column::left("Role"),
    ]);
    for r in &records {
        t.add_row(vec![r.email.clone(), r.role.to_string()]);
    }
    print!("{}", t.render());
    Ok(())
}
