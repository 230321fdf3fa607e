use std::path::PathBuf;

/// Errors from codebook sources and registries.
#[derive(Debug, thiserror::Error)]
pub enum CodebookError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("failed to parse TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no catalog available for protocol {prefix}: {message}")]
    Catalog { prefix: String, message: String },

    #[error("no concept file found for dataset {dataset_id} ({language})")]
    MissingDataset {
        dataset_id: String,
        language: String,
    },
}

impl CodebookError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Csv {
            path: path.into(),
            message: message.into(),
        }
    }
}
