// Aggregate export: one JSON file per aggregate table, consumed by the chart
// renderer.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::aggregate::{AggregateSet, AggregateTable};
use crate::error::{Result, TrendError};
use crate::vocab::Language;

/// What lands on disk for a single table.
#[derive(Debug, Serialize)]
pub struct ExportEnvelope<'a> {
    pub language: Language,
    pub generated_at: DateTime<Utc>,
    /// x-axis order
    pub years: Vec<&'a str>,
    /// legend order
    pub categories: Vec<&'a str>,
    pub table: &'a AggregateTable,
}

impl<'a> ExportEnvelope<'a> {
    pub fn new(language: Language, table: &'a AggregateTable, generated_at: DateTime<Utc>) -> Self {
        Self {
            language,
            generated_at,
            years: table.years().into_iter().map(|y| y.as_str()).collect(),
            categories: table.categories(),
            table,
        }
    }
}

/// File name for a table: `<language>_<table name>.json`.
pub fn export_file_name(language: Language, table: &AggregateTable) -> String {
    format!("{}_{}.json", language, table.name)
}

/// Write every table in `set` under `dir`, creating it if needed.
///
/// All files of one call share the same `generated_at` timestamp. Nothing is
/// written if two tables would land in the same file.
pub fn write_aggregates(set: &AggregateSet, language: Language, dir: &Path) -> Result<Vec<PathBuf>> {
    set.ensure_unique_names()?;
    fs::create_dir_all(dir).map_err(|e| TrendError::io(dir, e))?;

    let generated_at = Utc::now();
    let mut written = Vec::with_capacity(set.len());
    for table in &set.tables {
        let path = dir.join(export_file_name(language, table));
        let envelope = ExportEnvelope::new(language, table, generated_at);
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| TrendError::io(&path, e.into()))?;
        fs::write(&path, json).map_err(|e| TrendError::io(&path, e))?;
        written.push(path);
    }

    info!(
        dir = %dir.display(),
        files = written.len(),
        "Exported aggregate tables"
    );
    Ok(written)
}
