//! ncdash library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod sources;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::report::Page;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    use crate::cli::commands::{config, init, log, report, session, users};

    match &cli.command {
        Commands::Init => init::handle(cli, config_path),
        Commands::Config { .. } => config::handle(&cli.command, cfg, config_path),
        Commands::Login { email } => session::login(email, cfg),
        Commands::Logout => session::logout(cfg),
        Commands::Whoami => session::whoami(cfg),
        Commands::Users => users::handle(cfg),
        Commands::Log { .. } => log::handle(&cli.command, cfg),
        Commands::Journal {
            report: args,
            emails,
            top,
        } => report::handle(Page::Journal, args, emails, &[], *top, cfg),
        Commands::Checkins { report: args } => {
            report::handle(Page::Checkins, args, &[], &[], None, cfg)
        }
        Commands::Ratings {
            report: args,
            emails,
            indicators,
        } => report::handle(Page::Ratings, args, emails, indicators, None, cfg),
    }
}

/// Diagnostics go to stderr: `--debug` > `--verbose` > `RUST_LOG` > config `log_level`.
fn init_tracing(cli: &Cli, cfg: &Config) {
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config_path = config_path_for(cli.config.as_deref());

    let mut cfg = Config::load_from(&config_path)?;

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    init_tracing(&cli, &cfg);
    tracing::debug!(config = %config_path.display(), database = %cfg.database, "configuration loaded");

    dispatch(&cli, &cfg, &config_path)
}

/// Resolve the config file a `--config` value points to.
pub fn config_path_for(arg: Option<&str>) -> PathBuf {
    arg.map(utils::path::expand_tilde)
        .unwrap_or_else(Config::config_file)
}
