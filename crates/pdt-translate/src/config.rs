//! Configuration for one translation run.

use std::path::{Path, PathBuf};

use pdt_model::OutputFormat;

/// Everything the engine needs for a run; assembled by the caller (the CLI
/// or a test), never inferred by the engine itself.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Catalog prefix of the protocol (e.g. `ppcolbio-`).
    pub protocol_prefix: String,
    /// Source language of the export (e.g. `nl-NL`).
    pub language: String,
    pub output_format: OutputFormat,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl RunConfig {
    /// Default output file: the input with its extension replaced by
    /// `_out.txt`.
    pub fn default_output_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("translated");
        input.with_file_name(format!("{stem}_out.txt"))
    }
}
