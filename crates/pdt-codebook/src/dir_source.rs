//! File-based codebook source.
//!
//! Layout under the codebooks root:
//!
//! ```text
//! codebooks/
//!   protocols.toml                      (optional name -> prefix index)
//!   ppcolbio-/
//!     catalog.csv                       version,dataset_id,languages
//!     <dataset_id>_<language>.csv       concept definitions
//!   housekeeping/
//!     catalog.csv
//!     <dataset_id>_<language>.csv
//! ```
//!
//! Concept files contain two kinds of rows, told apart by the `value`
//! field: rows with an empty `value` define the concept and its header
//! terminology; rows with a non-empty `value` add one entry to that
//! concept's value map. Columns:
//! `column_name,concept_id,value,code,code_system,display_name`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use pdt_model::{TerminologyBinding, VersionLabel};

use crate::error::CodebookError;
use crate::source::{CatalogEntry, CodebookSource, ConceptDef, ValueDef};

/// Environment variable overriding the codebooks root directory.
pub const CODEBOOKS_ENV_VAR: &str = "PDT_CODEBOOKS_DIR";

/// Codebook source backed by a local directory of CSV files.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default root: `PDT_CODEBOOKS_DIR`, else `./codebooks`.
    pub fn default_root() -> PathBuf {
        if let Ok(root) = std::env::var(CODEBOOKS_ENV_VAR) {
            return PathBuf::from(root);
        }
        PathBuf::from("codebooks")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate `<dataset_id>_<language>.csv` under any protocol directory.
    fn find_concept_file(&self, dataset_id: &str, language: &str) -> Option<PathBuf> {
        let file_name = format!("{dataset_id}_{language}.csv");
        let entries = std::fs::read_dir(&self.root).ok()?;
        for entry in entries.flatten() {
            let candidate = entry.path().join(&file_name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

impl CodebookSource for DirSource {
    fn fetch_catalog(&self, protocol_prefix: &str) -> Result<Vec<CatalogEntry>, CodebookError> {
        let path = self.root.join(protocol_prefix).join("catalog.csv");
        if !path.is_file() {
            return Err(CodebookError::Catalog {
                prefix: protocol_prefix.to_string(),
                message: format!("{} not found", path.display()),
            });
        }
        let rows = read_csv_rows(&path)?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let version = get_field(&row, "version");
            let dataset_id = get_field(&row, "dataset_id");
            if version.is_empty() || dataset_id.is_empty() {
                return Err(CodebookError::csv(
                    &path,
                    "catalog rows need both version and dataset_id",
                ));
            }
            entries.push(CatalogEntry {
                version: VersionLabel::new(version),
                dataset_id,
                languages: split_list(&get_field(&row, "languages")),
            });
        }
        Ok(entries)
    }

    fn fetch_concepts(
        &self,
        dataset_id: &str,
        language: &str,
    ) -> Result<Vec<ConceptDef>, CodebookError> {
        let path = self.find_concept_file(dataset_id, language).ok_or_else(|| {
            CodebookError::MissingDataset {
                dataset_id: dataset_id.to_string(),
                language: language.to_string(),
            }
        })?;
        let rows = read_csv_rows(&path)?;

        // First pass: concept definition rows (empty value field).
        let mut definitions: Vec<ConceptDef> = Vec::new();
        let mut index: BTreeMap<String, usize> = BTreeMap::new();
        for row in &rows {
            let column_name = get_field(row, "column_name");
            let value = get_field(row, "value");
            if column_name.is_empty() || !value.is_empty() {
                continue;
            }
            let terminology = binding_from_row(row);
            index.insert(column_name.to_lowercase(), definitions.len());
            definitions.push(ConceptDef {
                column_name,
                concept_id: get_field(row, "concept_id"),
                terminology,
                values: Vec::new(),
            });
        }

        // Second pass: value rows attach to their concept.
        for row in &rows {
            let column_name = get_field(row, "column_name");
            let value = get_field(row, "value");
            if column_name.is_empty() || value.is_empty() {
                continue;
            }
            let Some(&position) = index.get(&column_name.to_lowercase()) else {
                return Err(CodebookError::csv(
                    &path,
                    format!("value row for unknown concept {column_name}"),
                ));
            };
            let Some(binding) = binding_from_row(row) else {
                return Err(CodebookError::csv(
                    &path,
                    format!("value row without code/display for {column_name}"),
                ));
            };
            definitions[position].values.push(ValueDef {
                raw: value,
                binding,
            });
        }

        Ok(definitions)
    }
}

fn binding_from_row(row: &BTreeMap<String, String>) -> Option<TerminologyBinding> {
    let code = get_field(row, "code");
    let code_system = get_field(row, "code_system");
    let display_name = get_field(row, "display_name");
    if code.is_empty() && display_name.is_empty() {
        return None;
    }
    Some(TerminologyBinding::new(code, code_system, display_name))
}

fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>, CodebookError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| CodebookError::csv(path, error.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|error| CodebookError::csv(path, error.to_string()))?
        .clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| CodebookError::csv(path, error.to_string()))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .trim()
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

fn get_field(row: &BTreeMap<String, String>, key: &str) -> String {
    row.get(key).cloned().unwrap_or_default()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}
