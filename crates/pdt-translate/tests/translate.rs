use std::io::Cursor;
use std::path::PathBuf;

use pdt_codebook::{CatalogEntry, CodebookError, CodebookSource, ConceptDef, ValueDef};
use pdt_ingest::Dataset;
use pdt_model::{OutputFormat, TerminologyBinding, TranslateError, VersionLabel};
use pdt_translate::{RunConfig, TranslationError, Translator};

/// Two protocol versions plus a housekeeping codebook.
///
/// The biopsy value display names differ between versions 3 and 4 so tests
/// can observe which version served a lookup; version 4 additionally knows
/// the "dubious" option.
struct TestSource {
    with_housekeeping: bool,
}

impl TestSource {
    fn new() -> Self {
        Self {
            with_housekeeping: true,
        }
    }

    fn without_housekeeping() -> Self {
        Self {
            with_housekeeping: false,
        }
    }
}

impl CodebookSource for TestSource {
    fn fetch_catalog(&self, protocol_prefix: &str) -> Result<Vec<CatalogEntry>, CodebookError> {
        match protocol_prefix {
            "ppcolbio-" => Ok(vec![
                CatalogEntry {
                    version: VersionLabel::from("3"),
                    dataset_id: "ds-3".to_string(),
                    languages: vec!["nl-NL".to_string()],
                },
                CatalogEntry {
                    version: VersionLabel::from("4"),
                    dataset_id: "ds-4".to_string(),
                    languages: vec!["nl-NL".to_string()],
                },
            ]),
            "housekeeping" if self.with_housekeeping => Ok(vec![CatalogEntry {
                version: VersionLabel::from("1"),
                dataset_id: "ds-hk".to_string(),
                languages: vec!["nl-NL".to_string()],
            }]),
            other => Err(CodebookError::Catalog {
                prefix: other.to_string(),
                message: "unknown protocol".to_string(),
            }),
        }
    }

    fn fetch_concepts(
        &self,
        dataset_id: &str,
        _language: &str,
    ) -> Result<Vec<ConceptDef>, CodebookError> {
        match dataset_id {
            "ds-3" | "ds-4" => {
                let mut biopsy = ConceptDef {
                    column_name: "colonbiopt".to_string(),
                    concept_id: "2341".to_string(),
                    terminology: Some(TerminologyBinding::new(
                        "30000",
                        "SNOMED",
                        "Colon biopsy",
                    )),
                    values: vec![
                        ValueDef {
                            raw: "pos".to_string(),
                            binding: TerminologyBinding::new("10828004", "SNOMED", "P"),
                        },
                        ValueDef {
                            raw: "neg".to_string(),
                            binding: TerminologyBinding::new("260385009", "SNOMED", "N"),
                        },
                    ],
                };
                if dataset_id == "ds-4" {
                    for value in &mut biopsy.values {
                        value.binding.display_name = format!("{}4", value.binding.display_name);
                    }
                    biopsy.values.push(ValueDef {
                        raw: "dubious".to_string(),
                        binding: TerminologyBinding::new("419199007", "SNOMED", "D4"),
                    });
                }
                Ok(vec![biopsy])
            }
            "ds-hk" => Ok(vec![
                ConceptDef {
                    column_name: "depvenr".to_string(),
                    concept_id: "hk-1".to_string(),
                    terminology: Some(TerminologyBinding::new("", "", "Protocol version")),
                    values: Vec::new(),
                },
                ConceptDef {
                    column_name: "tnummer".to_string(),
                    concept_id: "hk-2".to_string(),
                    terminology: Some(TerminologyBinding::new("", "", "T-number")),
                    values: Vec::new(),
                },
            ]),
            other => Err(CodebookError::MissingDataset {
                dataset_id: other.to_string(),
                language: "nl-NL".to_string(),
            }),
        }
    }
}

fn config(format: OutputFormat) -> RunConfig {
    RunConfig {
        protocol_prefix: "ppcolbio-".to_string(),
        language: "nl-NL".to_string(),
        output_format: format,
        input_path: PathBuf::from("in.txt"),
        output_path: PathBuf::from("out.txt"),
    }
}

fn translator(format: OutputFormat) -> Translator {
    Translator::new(Box::new(TestSource::new()), &config(format)).unwrap()
}

fn dataset(text: &str) -> Dataset {
    Dataset::from_reader(Cursor::new(text.to_string())).unwrap()
}

#[test]
fn end_to_end_roman_columns() {
    let mut translator = translator(OutputFormat::Descriptions);
    let mut dataset = dataset(
        "colonbioptI\tcolonbioptII\tdepvenr\n\
         pos\tneg\t3\n\
         neg\t\t4\n",
    );
    let translated = translator.translate(&mut dataset).unwrap();

    let mut buffer = Vec::new();
    translated.write_to(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    // The version column is excluded; row 2 translates with version 4 and
    // its empty second value passes through unchanged.
    assert_eq!(
        text,
        "Colon biopsy_I\tColon biopsy_II\nP\tN\nN4\t\n"
    );
}

#[test]
fn header_uses_max_version_but_values_use_row_version() {
    let mut translator = translator(OutputFormat::Descriptions);
    let mut dataset = dataset(
        "colonbiopt\tdepvenr\n\
         pos\t3\n\
         pos\t4\n",
    );
    let translated = translator.translate(&mut dataset).unwrap();
    // Same raw value, different row versions, different outputs.
    assert_eq!(translated.lines[0], vec!["P"]);
    assert_eq!(translated.lines[1], vec!["P4"]);
}

#[test]
fn value_only_valid_in_newer_version_is_unmapped_for_older_rows() {
    let mut newer = translator(OutputFormat::Descriptions);
    let mut ok = dataset(
        "colonbiopt\tdepvenr\n\
         dubious\t4\n",
    );
    assert_eq!(newer.translate(&mut ok).unwrap().lines[0], vec!["D4"]);

    let mut older = translator(OutputFormat::Descriptions);
    let mut bad = dataset(
        "colonbiopt\tdepvenr\n\
         dubious\t3\n",
    );
    let error = older.translate(&mut bad).unwrap_err();
    match error {
        TranslationError::Value(TranslateError::UnmappedValue { value, column }) => {
            assert_eq!(value, "dubious");
            assert_eq!(column, "colonbiopt");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_catalog_version_passes_rows_through() {
    let mut translator = translator(OutputFormat::Descriptions);
    let mut dataset = dataset(
        "colonbiopt\tdepvenr\n\
         pos\t3\n\
         pos\t5\n",
    );
    let translated = translator.translate(&mut dataset).unwrap();
    // Version 5 is not in the catalog: its row passes through verbatim
    // while version 3 still translates; the run completes.
    assert_eq!(translated.lines[0], vec!["P"]);
    assert_eq!(translated.lines[1], vec!["pos"]);
    assert!(
        translator
            .log()
            .entries()
            .iter()
            .any(|d| d.message.contains("version 5"))
    );
}

#[test]
fn column_without_data_is_excluded() {
    let mut translator = translator(OutputFormat::Descriptions);
    let mut dataset = dataset(
        "colonbiopt\tleeg\tdepvenr\n\
         pos\t\t3\n",
    );
    let translated = translator.translate(&mut dataset).unwrap();
    assert_eq!(translated.header.len(), 1);
    assert_eq!(translated.header[0].translated, "Colon biopsy");
    assert_eq!(translated.lines[0], vec!["P"]);
}

#[test]
fn housekeeping_columns_use_descriptions_whatever_the_run_format() {
    let mut translator = translator(OutputFormat::CodesystemAndCodes);
    let mut dataset = dataset(
        "tnummer\tcolonbiopt\tdepvenr\n\
         T12345\tpos\t3\n",
    );
    let translated = translator.translate(&mut dataset).unwrap();
    assert_eq!(translated.header[0].translated, "T-number");
    assert_eq!(translated.header[1].translated, "SNOMED:30000");
    // Housekeeping concepts carry no value list: values pass through.
    assert_eq!(translated.lines[0], vec!["T12345", "SNOMED:10828004"]);
}

#[test]
fn unknown_column_passes_through_lowercased() {
    let mut translator = translator(OutputFormat::Descriptions);
    let mut dataset = dataset(
        "LokaleKolom\tdepvenr\n\
         vrije tekst\t3\n",
    );
    let translated = translator.translate(&mut dataset).unwrap();
    assert_eq!(translated.header[0].translated, "lokalekolom");
    assert_eq!(translated.lines[0], vec!["vrije tekst"]);
}

#[test]
fn roman_reconciliation_is_idempotent() {
    let mut translator = translator(OutputFormat::Descriptions);
    let mut dataset = dataset(
        "colonbioptI\tdepvenr\n\
         pos\t3\n",
    );
    translator.reconcile(&mut dataset);
    assert_eq!(dataset.reconciled_headers[0], "colonbiopt");
    assert_eq!(dataset.roman_suffixes[0], "I");

    let reconciled = dataset.reconciled_headers.clone();
    let suffixes = dataset.roman_suffixes.clone();
    translator.reconcile(&mut dataset);
    assert_eq!(dataset.reconciled_headers, reconciled);
    assert_eq!(dataset.roman_suffixes, suffixes);
}

#[test]
fn missing_housekeeping_codebook_is_not_fatal() {
    let mut translator = Translator::new(
        Box::new(TestSource::without_housekeeping()),
        &config(OutputFormat::Descriptions),
    )
    .unwrap();
    let mut dataset = dataset(
        "tnummer\tcolonbiopt\tdepvenr\n\
         T12345\tpos\t3\n",
    );
    let translated = translator.translate(&mut dataset).unwrap();
    // Housekeeping names pass through untranslated; the protocol columns
    // still translate.
    assert_eq!(translated.header[0].translated, "tnummer");
    assert_eq!(translated.lines[0], vec!["T12345", "P"]);
}

#[test]
fn unknown_protocol_is_fatal() {
    let result = Translator::new(
        Box::new(TestSource::new()),
        &RunConfig {
            protocol_prefix: "ppunknown-".to_string(),
            language: "nl-NL".to_string(),
            output_format: OutputFormat::Descriptions,
            input_path: PathBuf::from("in.txt"),
            output_path: PathBuf::from("out.txt"),
        },
    );
    assert!(result.is_err());
}

#[test]
fn output_file_write_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("export_out.txt");
    let mut translator = translator(OutputFormat::Codes);
    let mut dataset = dataset(
        "colonbiopt\tdepvenr\n\
         pos\t3\n",
    );
    let translated = translator.translate(&mut dataset).unwrap();
    translated.write_to_path(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "30000\n10828004\n");
}
