//! Dataset ingestion and per-column protocol version tracking.
//!
//! Export files are tab-separated; the first line is the header. Every row
//! carries the protocol version it was recorded under in the mandatory
//! `depvenr` column. While reading, the maximum version observed per
//! column (over rows where the column is non-empty) is tracked, because a
//! column can disappear from newer codebook versions: translating it with
//! the file's overall newest version would fail, so each column is pinned
//! to the newest version in which it actually carried data.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::error::IngestError;

/// Well-known name of the column holding each row's protocol version.
pub const PROTOCOL_VERSION_COLUMN: &str = "depvenr";

/// Version tracker value for a column with no data in any row.
pub const NO_DATA_SENTINEL: i64 = -1;

/// A parsed export file.
///
/// The four per-column sequences and every row all have the same length.
/// `reconciled_headers` and `roman_suffixes` start as the trivial
/// reconciliation (lower-cased name, no suffix) and are rewritten by
/// header reconciliation once codebooks are available.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub original_headers: Vec<String>,
    pub reconciled_headers: Vec<String>,
    pub roman_suffixes: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub max_version: Vec<i64>,
    version_index: usize,
}

impl Dataset {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Parse a tab-separated stream. The seam is `BufRead`, so a second
    /// tabular input variant only needs to produce lines.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, IngestError> {
        let mut lines = reader.lines();
        let header_line = lines.next().ok_or(IngestError::EmptyInput)??;
        let original_headers: Vec<String> = strip_line_ending(&header_line)
            .split('\t')
            .map(str::to_string)
            .collect();
        let version_index = original_headers
            .iter()
            .position(|name| name == PROTOCOL_VERSION_COLUMN)
            .ok_or_else(|| IngestError::MissingVersionColumn {
                column: PROTOCOL_VERSION_COLUMN.to_string(),
            })?;

        let mut dataset = Self {
            reconciled_headers: original_headers
                .iter()
                .map(|name| name.to_lowercase())
                .collect(),
            roman_suffixes: vec![String::new(); original_headers.len()],
            max_version: vec![NO_DATA_SENTINEL; original_headers.len()],
            rows: Vec::new(),
            original_headers,
            version_index,
        };

        for (number, line) in lines.enumerate() {
            // Header is line 1; data starts at line 2.
            dataset.add_row(&line?, number + 2)?;
        }
        debug!(
            columns = dataset.column_count(),
            rows = dataset.rows.len(),
            "dataset ingested"
        );
        Ok(dataset)
    }

    fn add_row(&mut self, line: &str, line_number: usize) -> Result<(), IngestError> {
        let row: Vec<String> = strip_line_ending(line)
            .split('\t')
            .map(clean_value)
            .collect();
        if row.len() != self.column_count() {
            return Err(IngestError::ColumnCount {
                line: line_number,
                expected: self.column_count(),
                found: row.len(),
            });
        }
        let version_value = &row[self.version_index];
        if version_value.is_empty() {
            return Err(IngestError::MissingVersion { line: line_number });
        }
        let version: i64 =
            version_value
                .parse()
                .map_err(|_| IngestError::InvalidVersion {
                    line: line_number,
                    value: version_value.clone(),
                })?;
        for (idx, value) in row.iter().enumerate() {
            if !value.is_empty() && self.max_version[idx] < version {
                self.max_version[idx] = version;
            }
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.original_headers.len()
    }

    /// Index of the protocol version column.
    pub fn version_index(&self) -> usize {
        self.version_index
    }

    /// The protocol version one row was recorded under.
    pub fn row_version<'a>(&self, row: &'a [String]) -> &'a str {
        &row[self.version_index]
    }

    /// Whether the column carried data in any row. Columns without data are
    /// excluded from output: there is no basis to pick a codebook version
    /// for them.
    pub fn has_data(&self, column_index: usize) -> bool {
        self.max_version[column_index] != NO_DATA_SENTINEL
    }

    /// Whether the column is the protocol version column itself.
    pub fn is_version_column(&self, column_index: usize) -> bool {
        column_index == self.version_index
    }
}

/// `BufRead::lines` strips `\n` but keeps the `\r` of CRLF files.
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Trim a field and remove the one layer of enclosing double quotes that
/// spreadsheet exports sometimes add.
fn clean_value(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return trimmed[1..trimmed.len() - 1].to_string();
    }
    trimmed.to_string()
}
