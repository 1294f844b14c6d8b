use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::migrate::current_version;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (if missing)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli, config_path: &Path) -> AppResult<()> {
    let cfg = Config::init_all(config_path, cli.db.as_deref())?;

    info("Initializing ncdash…");
    println!("📄 Config file : {}", config_path.display());
    println!("🗄️  Database   : {}", cfg.database);

    let pool = DbPool::open(&cfg.database)?;
    let version = current_version(&pool.conn)?;
    success(format!("Database initialized (schema v{version})"));

    if !Path::new(&cfg.permissions_file).exists() {
        warning(format!(
            "Permission sheet not found yet: {} (export it as CSV with email, role, name columns)",
            cfg.permissions_file
        ));
    }

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        &cfg.database,
        &format!("Config at {}", config_path.display()),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    Ok(())
}
