use thiserror::Error;

/// Errors raised while translating values through a codebook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The concept has an enumerated value list but the raw value is not in
    /// it. Fatal for the run: ignoring it would silently corrupt output.
    #[error("value \"{value}\" ({column}) doesn't seem to exist in the codebook")]
    UnmappedValue { value: String, column: String },
}

pub type Result<T> = std::result::Result<T, TranslateError>;
