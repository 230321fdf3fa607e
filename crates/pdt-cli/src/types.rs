use std::path::PathBuf;

use pdt_codebook::Diagnostic;
use pdt_model::OutputFormat;
use pdt_translate::HeaderItem;

/// Everything the summary needs about a finished translation run.
#[derive(Debug)]
pub struct TranslationRunResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub protocol: String,
    pub format: OutputFormat,
    /// Columns in the input file, version column included.
    pub columns_in: usize,
    /// Translated header entries actually written.
    pub header: Vec<HeaderItem>,
    pub rows: usize,
    pub diagnostics: Vec<Diagnostic>,
}
