// Coded-file reader: turns a directory of `;`-delimited CSV exports into a
// StatementTable.
//
// Each export has a header row. Only the seven columns below are read; any
// extra columns the coding tool adds are ignored. Rows missing any of them
// are dropped, matching how incomplete codings were treated during analysis.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, info};

use super::normalize::LabelNormalizer;
use super::{Statement, StatementTable};
use crate::error::{Result, TrendError};
use crate::vocab::Dimension;

/// Field delimiter used by the coding tool's CSV export.
pub const DELIMITER: u8 = b';';

/// Columns every export must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "text",
    "document title",
    "statement",
    "statement_type",
    "statement_topic",
    "topic_valence",
    "statement_reference",
];

/// One raw row as it appears in an export.
#[derive(Debug, Deserialize)]
struct CodedRow {
    text: Option<String>,
    #[serde(rename = "document title")]
    document_title: Option<String>,
    statement: Option<String>,
    statement_type: Option<String>,
    statement_topic: Option<String>,
    topic_valence: Option<String>,
    statement_reference: Option<String>,
}

impl CodedRow {
    /// Convert into a normalized statement, or `None` if any field is blank.
    fn into_statement(self, normalizer: &LabelNormalizer) -> Option<Statement> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let text = present(self.text)?;
        let title = present(self.document_title)?;
        let statement = present(self.statement)?;
        let kind = present(self.statement_type)?;
        let topic = present(self.statement_topic)?;
        let valence = present(self.topic_valence)?;
        let reference = present(self.statement_reference)?;

        Some(Statement {
            title,
            text,
            statement: statement.trim().to_lowercase(),
            statement_type: normalizer.normalize(Dimension::Type, &kind),
            statement_topic: normalizer.normalize(Dimension::Topic, &topic),
            topic_valence: normalizer.normalize(Dimension::Valence, &valence),
            statement_reference: normalizer.normalize(Dimension::Reference, &reference),
        })
    }
}

/// List the `.csv` files in `dir`, sorted by file name.
pub fn list_coded_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| TrendError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| TrendError::io(dir, e))?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse a single export from any reader.
///
/// Returns the kept statements and the number of dropped rows.
pub fn read_coded_rows<R: std::io::Read>(
    reader: R,
    path: &Path,
    normalizer: &LabelNormalizer,
) -> Result<(Vec<Statement>, usize)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| TrendError::csv(path, e))?
        .clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        let source = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("missing required column '{missing}'"),
        );
        return Err(TrendError::csv(path, csv::Error::from(source)));
    }

    let mut kept = Vec::new();
    let mut dropped = 0;
    for record in csv_reader.deserialize::<CodedRow>() {
        let row = record.map_err(|e| TrendError::csv(path, e))?;
        match row.into_statement(normalizer) {
            Some(statement) => kept.push(statement),
            None => dropped += 1,
        }
    }
    Ok((kept, dropped))
}

/// Load every export in `dir` into one table.
pub fn load_directory(dir: &Path, normalizer: &LabelNormalizer) -> Result<StatementTable> {
    let files = list_coded_files(dir)?;
    info!(
        dir = %dir.display(),
        files = files.len(),
        language = %normalizer.language(),
        "Loading coded files"
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Loading [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut rows = Vec::new();
    let mut total_dropped = 0;
    for path in &files {
        pb.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        let file = fs::File::open(path).map_err(|e| TrendError::io(path, e))?;
        let (mut kept, dropped) = read_coded_rows(file, path, normalizer)?;
        debug!(file = %path.display(), kept = kept.len(), dropped, "Parsed coded file");
        total_dropped += dropped;
        rows.append(&mut kept);
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(rows = rows.len(), dropped = total_dropped, "Coded dataset loaded");
    Ok(StatementTable::new(rows))
}
