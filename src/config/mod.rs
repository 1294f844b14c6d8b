use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration, stored as YAML in `~/.ncdash/ncdash.conf`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding the session, the permission cache and the audit log
    pub database: String,
    /// Tabular export (CSV) of the permission sheet: email, role, name
    pub permissions_file: String,
    /// Tabular export of the journal data sheet
    pub journal_file: String,
    /// Tabular export of the check-in data sheet
    pub checkin_file: String,
    /// Number of rows preceding the header line in the journal export
    pub journal_header_row: usize,
    pub checkin_header_row: usize,
    /// How long a loaded permission list is reused before re-fetching
    pub permission_ttl_secs: u64,
    pub default_top_n: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let dir = Self::config_dir();
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            permissions_file: dir.join("permissions.csv").to_string_lossy().to_string(),
            journal_file: dir.join("journal.csv").to_string_lossy().to_string(),
            checkin_file: dir.join("checkins.csv").to_string_lossy().to_string(),
            journal_header_row: 1,
            checkin_header_row: 0,
            permission_ttl_secs: 300,
            default_top_n: 5,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Standard configuration directory (`~/.ncdash`, or `%APPDATA%\ncdash` on Windows)
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows")
            && let Some(data) = dirs::config_dir()
        {
            return data.join("ncdash");
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ncdash")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("ncdash.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("ncdash.sqlite")
    }

    /// Load the configuration from the standard location.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    /// Load configuration from `path`, or return defaults if the file does not exist.
    /// Missing fields fall back to their defaults; a malformed file is an error.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?;

        Ok(cfg.expanded())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = self.to_yaml()?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config file (if missing) and return the configuration in effect.
    ///
    /// A `custom_db` given as a relative name is placed next to the config file.
    pub fn init_all(path: &Path, custom_db: Option<&str>) -> AppResult<Self> {
        let mut cfg = Self::load_from(path)?;

        if let Some(name) = custom_db {
            let p = expand_tilde(name);
            let db_path = if p.is_absolute() {
                p
            } else {
                path.parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(Self::config_dir)
                    .join(p)
            };
            cfg.database = db_path.to_string_lossy().to_string();
        }

        if !path.exists() {
            cfg.save_to(path)?;
        }

        Ok(cfg)
    }

    /// Permission cache lifetime, rejected when chrono cannot represent it.
    pub fn permission_ttl(&self) -> AppResult<TimeDelta> {
        i64::try_from(self.permission_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "permission_ttl_secs {} is out of range",
                    self.permission_ttl_secs
                ))
            })
    }

    /// Resolve `~/` prefixes in every path field.
    fn expanded(mut self) -> Self {
        for field in [
            &mut self.database,
            &mut self.permissions_file,
            &mut self.journal_file,
            &mut self.checkin_file,
        ] {
            *field = expand_tilde(field).to_string_lossy().to_string();
        }
        self
    }
}
