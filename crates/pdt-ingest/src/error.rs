use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with the input file. A file that cannot be reliably
/// reconciled is not translated at all.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("input is empty: no header line")]
    EmptyInput,

    #[error("the protocol version column \"{column}\" is missing from the header")]
    MissingVersionColumn { column: String },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: missing protocol version value")]
    MissingVersion { line: usize },

    #[error("line {line}: protocol version \"{value}\" is not numeric")]
    InvalidVersion { line: usize, value: String },
}
