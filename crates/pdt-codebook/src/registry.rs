//! Per-protocol codebook version registry.
//!
//! One registry exists per `(protocol prefix, language)` pair. The catalog
//! is fetched once at construction; codebooks are materialized lazily per
//! version and cached for the registry's lifetime in a sorted map, so the
//! newest version stays retrievable.
//!
//! A version the catalog does not list is not an error: the registry
//! records one diagnostic, caches the miss, and every translation for that
//! version passes through unchanged. A single missing historical version
//! must not abort translation of an entire file.

use std::collections::BTreeMap;

use pdt_model::{Codebook, OutputFormat, TranslateError, ValueOutcome, VersionLabel};
use tracing::{debug, info};

use crate::diagnostics::RunLog;
use crate::error::CodebookError;
use crate::source::{CodebookSource, build_codebook};

pub struct ProtocolRegistry {
    protocol_prefix: String,
    language: String,
    version_ids: BTreeMap<VersionLabel, String>,
    version_languages: BTreeMap<VersionLabel, Vec<String>>,
    unique_languages: Vec<String>,
    codebooks: BTreeMap<VersionLabel, Option<Codebook>>,
}

impl ProtocolRegistry {
    /// Fetch the protocol's catalog and build an empty registry.
    ///
    /// Catalog failure is fatal for every operation needing this protocol,
    /// so it surfaces as an error here.
    pub fn load(
        source: &dyn CodebookSource,
        protocol_prefix: &str,
        language: &str,
    ) -> Result<Self, CodebookError> {
        let catalog = source.fetch_catalog(protocol_prefix)?;
        let mut version_ids = BTreeMap::new();
        let mut version_languages = BTreeMap::new();
        let mut unique_languages: Vec<String> = Vec::new();
        for entry in catalog {
            for lang in &entry.languages {
                if !unique_languages.contains(lang) {
                    unique_languages.push(lang.clone());
                }
            }
            version_languages.insert(entry.version.clone(), entry.languages);
            version_ids.insert(entry.version, entry.dataset_id);
        }
        info!(
            protocol = protocol_prefix,
            language,
            versions = version_ids.len(),
            "protocol catalog loaded"
        );
        Ok(Self {
            protocol_prefix: protocol_prefix.to_string(),
            language: language.to_string(),
            version_ids,
            version_languages,
            unique_languages,
            codebooks: BTreeMap::new(),
        })
    }

    pub fn protocol_prefix(&self) -> &str {
        &self.protocol_prefix
    }

    /// Languages available across all catalog versions, in catalog order.
    pub fn unique_languages(&self) -> &[String] {
        &self.unique_languages
    }

    /// Languages one specific version was published in.
    pub fn languages_for(&self, version: &VersionLabel) -> Option<&[String]> {
        self.version_languages.get(version).map(Vec::as_slice)
    }

    /// Catalog versions, oldest to newest.
    pub fn versions(&self) -> Vec<&VersionLabel> {
        self.version_ids.keys().collect()
    }

    pub fn newest_version(&self) -> Option<&VersionLabel> {
        self.version_ids.keys().next_back()
    }

    /// Resolve the codebook for a version, materializing it on first use.
    ///
    /// Returns `None` when the catalog does not list the version or the
    /// concept fetch fails; both cases record a diagnostic once and cache
    /// the miss.
    pub fn resolve(
        &mut self,
        source: &dyn CodebookSource,
        version: &VersionLabel,
        log: &mut RunLog,
    ) -> Option<&Codebook> {
        if !self.codebooks.contains_key(version) {
            let built = self.materialize(source, version, log);
            self.codebooks.insert(version.clone(), built);
        }
        self.codebooks
            .get(version)
            .and_then(|cached| cached.as_ref())
    }

    fn materialize(
        &self,
        source: &dyn CodebookSource,
        version: &VersionLabel,
        log: &mut RunLog,
    ) -> Option<Codebook> {
        let Some(dataset_id) = self.version_ids.get(version) else {
            log.record(
                &self.protocol_prefix,
                format!(
                    "version {version} of the protocol doesn't seem to exist in the catalog. \
                     Data using that version will not be translated."
                ),
            );
            return None;
        };
        match source.fetch_concepts(dataset_id, &self.language) {
            Ok(definitions) => {
                debug!(
                    protocol = %self.protocol_prefix,
                    %version,
                    concepts = definitions.len(),
                    "codebook materialized"
                );
                Some(build_codebook(
                    &self.protocol_prefix,
                    &self.language,
                    version,
                    dataset_id,
                    definitions,
                ))
            }
            Err(error) => {
                log.record(
                    &self.protocol_prefix,
                    format!("could not build codebook version {version}: {error}"),
                );
                None
            }
        }
    }

    /// Whether `name` is a concept column in the given version's codebook.
    /// False when no codebook resolves for that version.
    pub fn contains_header_name(
        &mut self,
        source: &dyn CodebookSource,
        name: &str,
        version: &VersionLabel,
        log: &mut RunLog,
    ) -> bool {
        self.resolve(source, version, log)
            .is_some_and(|codebook| codebook.contains_column(name))
    }

    /// Translate a header name, falling back to the input unchanged when no
    /// codebook resolves, the column is unknown, or the concept has no
    /// terminology triple (the last case records a diagnostic).
    pub fn translate_header(
        &mut self,
        source: &dyn CodebookSource,
        name: &str,
        version: &VersionLabel,
        format: OutputFormat,
        log: &mut RunLog,
    ) -> String {
        let prefix = self.protocol_prefix.clone();
        let Some(codebook) = self.resolve(source, version, log) else {
            return name.to_string();
        };
        if !codebook.contains_column(name) {
            return name.to_string();
        }
        match codebook.translate_header(format, name) {
            Some(translated) => translated,
            None => {
                log.record(
                    prefix,
                    format!("concept {name} (version {version}) has no terminology"),
                );
                name.to_string()
            }
        }
    }

    /// Translate one value using the codebook for `version`.
    ///
    /// Empty values, unknown versions, and unknown columns pass through
    /// unchanged; an unmapped value is a fatal error.
    pub fn translate_value(
        &mut self,
        source: &dyn CodebookSource,
        name: &str,
        value: &str,
        version: &VersionLabel,
        format: OutputFormat,
        log: &mut RunLog,
    ) -> Result<String, TranslateError> {
        let Some(codebook) = self.resolve(source, version, log) else {
            return Ok(value.to_string());
        };
        if value.is_empty() || !codebook.contains_column(name) {
            return Ok(value.to_string());
        }
        match codebook.translate_concept_value(format, value, name)? {
            ValueOutcome::Mapped(translated) => Ok(translated),
            ValueOutcome::Unchanged => Ok(value.to_string()),
        }
    }
}
