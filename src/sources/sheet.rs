use crate::errors::{AppError, AppResult};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::Path;

/// A CSV export read as raw string rows, with a header index.
pub(crate) struct Sheet {
    columns: HashMap<String, usize>,
    pub rows: Vec<StringRecord>,
}

impl Sheet {
    /// Read `path`, skipping `header_row` leading lines (title rows above the header).
    pub fn read(path: &Path, header_row: usize) -> AppResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| AppError::LoadError(format!("{}: {e}", path.display())))?;

        let mut records = reader.records().skip(header_row);

        let header = match records.next() {
            Some(h) => h.map_err(|e| AppError::LoadError(format!("{}: {e}", path.display())))?,
            None => {
                return Err(AppError::LoadError(format!(
                    "{}: no header row found",
                    path.display()
                )));
            }
        };

        let columns = header
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(i, name)| (name.to_lowercase(), i))
            .collect();

        let mut rows = Vec::new();
        for r in records {
            let r = r.map_err(|e| AppError::LoadError(format!("{}: {e}", path.display())))?;
            if r.iter().all(str::is_empty) {
                continue;
            }
            rows.push(r);
        }

        Ok(Self { columns, rows })
    }

    /// Column index by header name (case-insensitive).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(&name.to_lowercase()).copied()
    }

    pub fn require(&self, name: &str, path: &Path) -> AppResult<usize> {
        self.column(name).ok_or_else(|| {
            AppError::LoadError(format!("{}: missing column '{name}'", path.display()))
        })
    }
}

/// Non-empty cell content at `idx`.
pub(crate) fn cell(row: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i)).filter(|s| !s.is_empty())
}
