//! Concepts and codebooks.
//!
//! A [`Concept`] is one data column's semantic definition within a protocol
//! version: an optional terminology triple for the header itself, and a
//! value map for columns with enumerated values. A [`Codebook`] is the
//! materialized concept set for one protocol version and language.
//!
//! Value map keys are the raw dataset values, matched exactly and
//! case-sensitively. Column lookups are case-insensitive (keys are stored
//! lower-case), because reconciled dataset headers are lower-cased.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::format::OutputFormat;

/// One (code, code system, display name) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyBinding {
    pub code: String,
    pub code_system: String,
    pub display_name: String,
}

impl TerminologyBinding {
    pub fn new(
        code: impl Into<String>,
        code_system: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            code_system: code_system.into(),
            display_name: display_name.into(),
        }
    }

    /// Render the triple in the requested output format, colon-joined.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Descriptions => self.display_name.clone(),
            OutputFormat::Codes => self.code.clone(),
            OutputFormat::CodesystemAndCodes => {
                format!("{}:{}", self.code_system, self.code)
            }
            OutputFormat::CodesAndDescriptions => {
                format!("{}:{}", self.code, self.display_name)
            }
            OutputFormat::CodesystemAndCodesAndDescriptions => {
                format!("{}:{}:{}", self.code_system, self.code, self.display_name)
            }
        }
    }
}

/// Outcome of a value translation that did not fail.
///
/// Callers that want batch diagnostics can collect `Err` results instead of
/// aborting; the driver aborts on the first unmapped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOutcome {
    /// The raw value was found in the value map and rendered.
    Mapped(String),
    /// Pass-through: empty value, or a concept without enumerated values.
    Unchanged,
}

/// One protocol data item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    /// Identifier assigned by the publishing catalog.
    pub concept_id: String,
    /// Column name as it appears in the dataset.
    pub column_name: String,
    /// Terminology for the header itself, when published.
    pub terminology: Option<TerminologyBinding>,
    values: BTreeMap<String, TerminologyBinding>,
}

impl Concept {
    pub fn new(concept_id: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self {
            concept_id: concept_id.into(),
            column_name: column_name.into(),
            terminology: None,
            values: BTreeMap::new(),
        }
    }

    pub fn set_terminology(&mut self, binding: TerminologyBinding) {
        self.terminology = Some(binding);
    }

    /// Add one enumerated value and its translation.
    pub fn add_value(&mut self, raw: impl Into<String>, binding: TerminologyBinding) {
        self.values.insert(raw.into(), binding);
    }

    /// True when this concept carries an enumerated value list.
    pub fn has_value_list(&self) -> bool {
        !self.values.is_empty()
    }

    /// Translate one raw value.
    ///
    /// Free-text/numeric concepts and empty values pass through unchanged.
    /// A non-empty value absent from a non-empty value map is an
    /// [`TranslateError::UnmappedValue`] error.
    pub fn translate_value(
        &self,
        format: OutputFormat,
        raw: &str,
    ) -> Result<ValueOutcome, TranslateError> {
        if !self.has_value_list() || raw.is_empty() {
            return Ok(ValueOutcome::Unchanged);
        }
        match self.values.get(raw) {
            Some(binding) => Ok(ValueOutcome::Mapped(binding.render(format))),
            None => Err(TranslateError::UnmappedValue {
                value: raw.to_string(),
                column: self.column_name.clone(),
            }),
        }
    }

    /// Render the concept's own terminology, when it has one.
    pub fn translate_header(&self, format: OutputFormat) -> Option<String> {
        self.terminology.as_ref().map(|t| t.render(format))
    }
}

/// One version of one protocol's codebook, for one source language.
///
/// Built once when the version is first materialized; immutable afterwards
/// and owned by the registry that cached it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Codebook {
    pub protocol_prefix: String,
    pub language: String,
    pub version: String,
    pub dataset_id: String,
    concepts: BTreeMap<String, Concept>,
}

impl Codebook {
    pub fn new(
        protocol_prefix: impl Into<String>,
        language: impl Into<String>,
        version: impl Into<String>,
        dataset_id: impl Into<String>,
    ) -> Self {
        Self {
            protocol_prefix: protocol_prefix.into(),
            language: language.into(),
            version: version.into(),
            dataset_id: dataset_id.into(),
            concepts: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, concept: Concept) {
        self.concepts
            .insert(concept.column_name.to_lowercase(), concept);
    }

    pub fn concept(&self, column: &str) -> Option<&Concept> {
        self.concepts.get(&column.to_lowercase())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.concepts.contains_key(&column.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Translate one raw value for `column`.
    ///
    /// A column that is not in this codebook passes through unchanged; the
    /// caller decides whether that is worth a diagnostic.
    pub fn translate_concept_value(
        &self,
        format: OutputFormat,
        raw: &str,
        column: &str,
    ) -> Result<ValueOutcome, TranslateError> {
        match self.concept(column) {
            Some(concept) => concept.translate_value(format, raw),
            None => Ok(ValueOutcome::Unchanged),
        }
    }

    /// Render the header terminology for `column`.
    ///
    /// Returns `None` when the column is absent or the concept carries no
    /// terminology triple.
    pub fn translate_header(&self, format: OutputFormat, column: &str) -> Option<String> {
        self.concept(column)
            .and_then(|concept| concept.translate_header(format))
    }
}
