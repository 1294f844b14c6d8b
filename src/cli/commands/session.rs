//! `login`, `logout` and `whoami`.

use crate::config::Config;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn login(email: &str, cfg: &Config) -> AppResult<()> {
    let mut ctx = AppContext::open(cfg)?;
    let session = ctx.login(email)?;

    success(format!("Welcome, {}!", session.name));
    info(session.banner());
    Ok(())
}

pub fn logout(cfg: &Config) -> AppResult<()> {
    let mut ctx = AppContext::open(cfg)?;
    if ctx.logout()? {
        success("Logged out.");
    } else {
        info("No active session.");
    }
    Ok(())
}

/// Print the stored session surface: email, role, name and login time.
pub fn whoami(cfg: &Config) -> AppResult<()> {
    let ctx = AppContext::open(cfg)?;
    match ctx.stored_session()?.filter(|s| s.authenticated) {
        Some(s) => {
            info(s.banner());
            println!("  Name      : {}", s.name);
            println!("  Logged in : {}", s.logged_in_at.format("%Y-%m-%d %H:%M:%S"));
        }
        None => info("Not logged in."),
    }
    Ok(())
}
