use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors from a translation run.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error(transparent)]
    Codebook(#[from] pdt_codebook::CodebookError),

    #[error(transparent)]
    Value(#[from] pdt_model::TranslateError),

    #[error("a severe error occurred while writing {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
