//! The housekeeping codebook.
//!
//! Administrative columns (record numbers, excerpt identifiers, the
//! protocol-version column) exist outside any protocol version. They are
//! covered by a single always-current codebook published under a fixed
//! prefix; the newest catalog version wins. Housekeeping output is always
//! descriptions, whatever format the run asked for.
//!
//! A missing or broken housekeeping catalog is not fatal: the run proceeds
//! and housekeeping columns pass through untranslated.

use pdt_model::{Codebook, OutputFormat, TranslateError, ValueOutcome};

use crate::diagnostics::RunLog;
use crate::source::{CodebookSource, build_codebook};

/// Catalog prefix the housekeeping codebook is published under.
pub const HOUSEKEEPING_PREFIX: &str = "housekeeping";

const HOUSEKEEPING_FORMAT: OutputFormat = OutputFormat::Descriptions;

pub struct HousekeepingCodebook {
    codebook: Option<Codebook>,
}

impl HousekeepingCodebook {
    /// Build from the newest housekeeping catalog entry. Every failure
    /// degrades to an empty codebook with a diagnostic.
    pub fn load(source: &dyn CodebookSource, language: &str, log: &mut RunLog) -> Self {
        let codebook = match Self::try_load(source, language) {
            Ok(codebook) => Some(codebook),
            Err(error) => {
                log.record(
                    HOUSEKEEPING_PREFIX,
                    format!(
                        "could not retrieve the housekeeping codebook ({error}); \
                         housekeeping columns will not be translated"
                    ),
                );
                None
            }
        };
        Self { codebook }
    }

    fn try_load(
        source: &dyn CodebookSource,
        language: &str,
    ) -> Result<Codebook, crate::error::CodebookError> {
        let catalog = source.fetch_catalog(HOUSEKEEPING_PREFIX)?;
        let newest = catalog
            .into_iter()
            .max_by(|a, b| a.version.cmp(&b.version))
            .ok_or_else(|| crate::error::CodebookError::Catalog {
                prefix: HOUSEKEEPING_PREFIX.to_string(),
                message: "catalog is empty".to_string(),
            })?;
        let definitions = source.fetch_concepts(&newest.dataset_id, language)?;
        Ok(build_codebook(
            HOUSEKEEPING_PREFIX,
            language,
            &newest.version,
            &newest.dataset_id,
            definitions,
        ))
    }

    /// A housekeeping codebook that never matches. Used when translating
    /// without housekeeping data.
    pub fn unavailable() -> Self {
        Self { codebook: None }
    }

    pub fn is_available(&self) -> bool {
        self.codebook.is_some()
    }

    pub fn contains_header_name(&self, name: &str) -> bool {
        self.codebook
            .as_ref()
            .is_some_and(|codebook| codebook.contains_column(name))
    }

    /// Translate a header; unchanged when no codebook is available.
    pub fn translate_header(&self, name: &str) -> String {
        let Some(codebook) = &self.codebook else {
            return name.to_string();
        };
        codebook
            .translate_header(HOUSEKEEPING_FORMAT, name)
            .unwrap_or_else(|| name.to_string())
    }

    /// Translate a value; unchanged when no codebook is available.
    pub fn translate_value(&self, name: &str, value: &str) -> Result<String, TranslateError> {
        let Some(codebook) = &self.codebook else {
            return Ok(value.to_string());
        };
        match codebook.translate_concept_value(HOUSEKEEPING_FORMAT, value, name)? {
            ValueOutcome::Mapped(translated) => Ok(translated),
            ValueOutcome::Unchanged => Ok(value.to_string()),
        }
    }
}
