//! The translation driver.
//!
//! A [`Translator`] is the per-run translation context: it owns the
//! codebook source, the protocol registry with its lazily built codebook
//! cache, the housekeeping codebook, and the run log. Components receive
//! these by reference; nothing lives in global state.
//!
//! The run is single-threaded batch work: reconcile headers once, translate
//! the header row, then translate each data row in input order. Headers are
//! translated with each column's dataset-wide **maximum observed** version
//! so the output header is stable and singular; each row's values are
//! checked against the **row's own** version, because a concept's option
//! list can differ release to release. This asymmetry is intentional and
//! must be preserved.

use pdt_codebook::{CodebookSource, HousekeepingCodebook, ProtocolRegistry, RunLog};
use pdt_ingest::{Dataset, roman};
use pdt_model::{OutputFormat, VersionLabel};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::error::TranslationError;
use crate::output::{HeaderItem, TranslatedData};

pub struct Translator {
    source: Box<dyn CodebookSource>,
    registry: ProtocolRegistry,
    housekeeping: HousekeepingCodebook,
    format: OutputFormat,
    log: RunLog,
}

impl Translator {
    /// Build the translation context for one run.
    ///
    /// The protocol catalog is fetched here and its failure is fatal; the
    /// housekeeping codebook degrades to "unavailable" with a diagnostic.
    /// The run log is scoped to this translator: one run, one fresh log.
    pub fn new(source: Box<dyn CodebookSource>, config: &RunConfig) -> Result<Self, TranslationError> {
        let mut log = RunLog::new();
        let registry =
            ProtocolRegistry::load(source.as_ref(), &config.protocol_prefix, &config.language)?;
        let housekeeping = HousekeepingCodebook::load(source.as_ref(), &config.language, &mut log);
        Ok(Self {
            source,
            registry,
            housekeeping,
            format: config.output_format,
            log,
        })
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// Languages the protocol's catalog offers across all versions.
    pub fn protocol_languages(&self) -> &[String] {
        self.registry.unique_languages()
    }

    /// Reconcile repeated-instrument headers against the codebooks.
    ///
    /// For each column with data that is not a housekeeping column, the
    /// trailing Roman numeral candidates are tried longest first; the first
    /// truncation that names a concept in the column's maximum observed
    /// version wins. Everything else keeps the lower-cased original name
    /// with no suffix (already the dataset default).
    pub fn reconcile(&mut self, dataset: &mut Dataset) {
        for index in 0..dataset.column_count() {
            if !dataset.has_data(index) {
                continue;
            }
            let original = dataset.original_headers[index].clone();
            if self.housekeeping.contains_header_name(&original) {
                continue;
            }
            let max_version = VersionLabel::from(dataset.max_version[index]);
            for candidate in roman::trailing_candidates(&original) {
                let base = &original[..original.len() - candidate.len()];
                if self.registry.contains_header_name(
                    self.source.as_ref(),
                    base,
                    &max_version,
                    &mut self.log,
                ) {
                    debug!(column = %original, base, numeral = candidate, "roman header reconciled");
                    dataset.reconciled_headers[index] = base.to_lowercase();
                    dataset.roman_suffixes[index] = candidate.to_string();
                    break;
                }
            }
        }
    }

    /// Translate the header row, filtered to in-scope columns.
    pub fn translate_headers(&mut self, dataset: &Dataset) -> Vec<HeaderItem> {
        let mut header = Vec::new();
        for index in 0..dataset.column_count() {
            if !self.in_scope(dataset, index) {
                continue;
            }
            let name = &dataset.reconciled_headers[index];
            let translated = if self.housekeeping.contains_header_name(name) {
                // Housekeeping concepts are not repeated instruments: no
                // Roman suffix.
                self.housekeeping.translate_header(name)
            } else {
                let max_version = VersionLabel::from(dataset.max_version[index]);
                let mut translated = self.registry.translate_header(
                    self.source.as_ref(),
                    name,
                    &max_version,
                    self.format,
                    &mut self.log,
                );
                let suffix = &dataset.roman_suffixes[index];
                if !suffix.is_empty() {
                    translated = format!("{translated}_{suffix}");
                }
                translated
            };
            header.push(HeaderItem {
                original: dataset.original_headers[index].clone(),
                translated,
            });
        }
        header
    }

    /// Translate one data row using the row's own protocol version.
    pub fn translate_row(
        &mut self,
        dataset: &Dataset,
        row: &[String],
    ) -> Result<Vec<String>, TranslationError> {
        let version = VersionLabel::new(dataset.row_version(row));
        let mut translated = Vec::new();
        for (index, value) in row.iter().enumerate() {
            if !self.in_scope(dataset, index) {
                continue;
            }
            let name = &dataset.reconciled_headers[index];
            let result = if self.housekeeping.contains_header_name(name) {
                self.housekeeping.translate_value(name, value)?
            } else {
                self.registry.translate_value(
                    self.source.as_ref(),
                    name,
                    value,
                    &version,
                    self.format,
                    &mut self.log,
                )?
            };
            translated.push(result);
        }
        Ok(translated)
    }

    /// Run the full translation: reconcile, then headers, then every row in
    /// input order.
    pub fn translate(&mut self, dataset: &mut Dataset) -> Result<TranslatedData, TranslationError> {
        self.reconcile(dataset);
        let header = self.translate_headers(dataset);
        let mut lines = Vec::with_capacity(dataset.rows.len());
        for row in &dataset.rows {
            lines.push(self.translate_row(dataset, row)?);
        }
        info!(
            columns = header.len(),
            rows = lines.len(),
            diagnostics = self.log.len(),
            "translation complete"
        );
        Ok(TranslatedData { header, lines })
    }

    /// A column is in scope when it carried data in at least one row and is
    /// not the protocol version column (run metadata, not payload).
    fn in_scope(&self, dataset: &Dataset, index: usize) -> bool {
        dataset.has_data(index) && !dataset.is_version_column(index)
    }
}
