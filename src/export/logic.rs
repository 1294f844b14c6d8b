use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::ExportTable;
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::path::require_absolute;
use std::path::{Path, PathBuf};
use tracing::debug;

/// High level export entry point shared by every report.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `table` to `file` in `format`.
    ///
    /// `file` must be absolute. An existing file is replaced only with `force`
    /// or after confirmation. Every completed export is recorded in the audit log.
    pub fn export(
        pool: &DbPool,
        table: &ExportTable,
        format: ExportFormat,
        file: &str,
        force: bool,
        actor: &str,
    ) -> AppResult<Option<PathBuf>> {
        let path = Path::new(file);
        require_absolute(path).map_err(AppError::Export)?;

        if table.rows.is_empty() {
            warning("No rows to export for the selected filters.");
            return Ok(None);
        }

        ensure_writable(path, force)?;
        ensure_parent(path)?;

        debug!(rows = table.rows.len(), format = format.as_str(), "exporting {}", table.title);

        match format {
            ExportFormat::Csv => export_csv(table, path)?,
            ExportFormat::Json => export_json(table, path)?,
            ExportFormat::Xlsx => export_xlsx(table, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            actor,
            &format!("{} ({} rows, {}) -> {}", table.title, table.rows.len(), format.as_str(), path.display()),
        )?;

        Ok(Some(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::log::load_log;
    use crate::export::Cell;

    fn table() -> ExportTable {
        ExportTable {
            title: "Aggregated".into(),
            headers: vec!["Place", "SumMin"],
            rows: vec![vec![Cell::Text("Park".into()), Cell::Int(50)]],
        }
    }

    #[test]
    fn relative_path_is_rejected() {
        let pool = DbPool::in_memory().unwrap();
        let err = ExportLogic::export(&pool, &table(), ExportFormat::Csv, "out.csv", true, "a@x.org")
            .unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }

    #[test]
    fn export_is_audited() {
        let pool = DbPool::in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.json");

        let written = ExportLogic::export(
            &pool,
            &table(),
            ExportFormat::Json,
            file.to_str().unwrap(),
            true,
            "a@x.org",
        )
        .unwrap();

        assert_eq!(written.as_deref(), Some(file.as_path()));
        let log = load_log(&pool.conn).unwrap();
        assert!(log.iter().any(|e| e.operation == "export" && e.target == "a@x.org"));
    }
}
