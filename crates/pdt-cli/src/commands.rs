use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use comfy_table::Table;
use tracing::{info, info_span};

use pdt_codebook::{DirSource, ProtocolIndex, ProtocolRegistry, RunLog};
use pdt_ingest::Dataset;
use pdt_translate::{RunConfig, Translator};

use crate::cli::{ProtocolsArgs, TranslateArgs};
use crate::summary::apply_table_style;
use crate::types::TranslationRunResult;

pub fn run_translate(args: &TranslateArgs) -> Result<TranslationRunResult> {
    let root = codebooks_root(args.codebooks.clone());
    let index = ProtocolIndex::load(&root).context("load protocol index")?;
    let prefix = index
        .prefix(&args.protocol)
        .ok_or_else(|| anyhow!("unknown protocol \"{}\"", args.protocol))?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| RunConfig::default_output_path(&args.input));
    let config = RunConfig {
        protocol_prefix: prefix.to_string(),
        language: args.language.clone(),
        output_format: args.format.into(),
        input_path: args.input.clone(),
        output_path: output_path.clone(),
    };

    let span = info_span!("translate", protocol = %args.protocol, input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut dataset = Dataset::from_path(&config.input_path).context("read dataset")?;
    let mut translator =
        Translator::new(Box::new(DirSource::new(&root)), &config).context("load codebooks")?;
    let translated = translator.translate(&mut dataset).context("translate")?;
    translated
        .write_to_path(&config.output_path)
        .context("write output")?;
    info!(
        columns = translated.header.len(),
        rows = translated.lines.len(),
        duration_ms = start.elapsed().as_millis(),
        "translation written"
    );

    Ok(TranslationRunResult {
        input: config.input_path,
        output: config.output_path,
        protocol: args.protocol.clone(),
        format: config.output_format,
        columns_in: dataset.column_count(),
        header: translated.header,
        rows: translated.lines.len(),
        diagnostics: translator.log().entries().to_vec(),
    })
}

pub fn run_protocols(args: &ProtocolsArgs) -> Result<()> {
    let root = codebooks_root(args.codebooks.clone());
    let index = ProtocolIndex::load(&root).context("load protocol index")?;
    let source = DirSource::new(&root);
    let mut log = RunLog::new();

    let mut table = Table::new();
    table.set_header(vec!["Protocol", "Prefix", "Versions", "Languages"]);
    apply_table_style(&mut table);
    for (name, prefix) in index.entries() {
        let (versions, languages) = match ProtocolRegistry::load(&source, prefix, &args.language) {
            Ok(registry) => {
                let versions: Vec<String> = registry
                    .versions()
                    .iter()
                    .map(|version| version.as_str().to_string())
                    .collect();
                (versions.join(", "), registry.unique_languages().join(", "))
            }
            Err(error) => {
                log.record(prefix, format!("catalog unavailable: {error}"));
                ("-".to_string(), "-".to_string())
            }
        };
        table.add_row(vec![name.to_string(), prefix.to_string(), versions, languages]);
    }
    println!("{table}");
    Ok(())
}

fn codebooks_root(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(DirSource::default_root)
}
