//! The seam between the translation engine and whatever publishes
//! codebooks.
//!
//! The engine never fetches anything itself: a [`CodebookSource`] hands it
//! catalogs (which versions exist, under which dataset identifier, in which
//! languages) and concept definitions for one dataset. [`DirSource`]
//! (`crate::dir_source`) is the file-based implementation; tests use small
//! in-memory sources.

use pdt_model::{Codebook, Concept, TerminologyBinding, VersionLabel};

use crate::error::CodebookError;

/// One published codebook version as listed in a protocol's catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub version: VersionLabel,
    /// Identifier used to fetch the full concept list for this version.
    pub dataset_id: String,
    /// Languages this version was published in.
    pub languages: Vec<String>,
}

/// One enumerated value of a concept, as delivered by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDef {
    /// The value exactly as it appears in dataset exports.
    pub raw: String,
    pub binding: TerminologyBinding,
}

/// One concept definition, as delivered by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptDef {
    pub column_name: String,
    pub concept_id: String,
    pub terminology: Option<TerminologyBinding>,
    pub values: Vec<ValueDef>,
}

/// Provider of protocol catalogs and concept definitions.
pub trait CodebookSource {
    /// List the published versions of a protocol.
    fn fetch_catalog(&self, protocol_prefix: &str) -> Result<Vec<CatalogEntry>, CodebookError>;

    /// Fetch the full concept list for one dataset identifier and language.
    fn fetch_concepts(
        &self,
        dataset_id: &str,
        language: &str,
    ) -> Result<Vec<ConceptDef>, CodebookError>;
}

/// Assemble a [`Codebook`] from fetched concept definitions.
pub fn build_codebook(
    protocol_prefix: &str,
    language: &str,
    version: &VersionLabel,
    dataset_id: &str,
    definitions: Vec<ConceptDef>,
) -> Codebook {
    let mut codebook = Codebook::new(protocol_prefix, language, version.as_str(), dataset_id);
    for definition in definitions {
        let mut concept = Concept::new(definition.concept_id, definition.column_name);
        if let Some(terminology) = definition.terminology {
            concept.set_terminology(terminology);
        }
        for value in definition.values {
            concept.add_value(value.raw, value.binding);
        }
        codebook.insert(concept);
    }
    codebook
}
