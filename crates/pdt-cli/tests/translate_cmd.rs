use std::fs;
use std::path::Path;

use pdt_cli::cli::{OutputFormatArg, TranslateArgs};
use pdt_cli::commands::run_translate;
use tempfile::TempDir;

fn write_codebooks(root: &Path) {
    let protocol = root.join("ppcolbio-");
    fs::create_dir_all(&protocol).unwrap();
    fs::write(
        protocol.join("catalog.csv"),
        "version,dataset_id,languages\n\
         3,ds-3,nl-NL\n\
         4,ds-4,nl-NL\n",
    )
    .unwrap();
    let concepts = "column_name,concept_id,value,code,code_system,display_name\n\
                    colonbiopt,2341,,30000,SNOMED,Colon biopsy\n\
                    colonbiopt,2341,pos,10828004,SNOMED,P\n\
                    colonbiopt,2341,neg,260385009,SNOMED,N\n";
    fs::write(protocol.join("ds-3_nl-NL.csv"), concepts).unwrap();
    fs::write(protocol.join("ds-4_nl-NL.csv"), concepts).unwrap();

    let housekeeping = root.join("housekeeping");
    fs::create_dir_all(&housekeeping).unwrap();
    fs::write(
        housekeeping.join("catalog.csv"),
        "version,dataset_id,languages\n\
         1,ds-hk,nl-NL\n",
    )
    .unwrap();
    fs::write(
        housekeeping.join("ds-hk_nl-NL.csv"),
        "column_name,concept_id,value,code,code_system,display_name\n\
         depvenr,hk-1,,,,Protocol version\n",
    )
    .unwrap();
}

#[test]
fn translates_a_file_end_to_end() {
    let dir = TempDir::new().unwrap();
    let codebooks = dir.path().join("codebooks");
    write_codebooks(&codebooks);

    let input = dir.path().join("export.txt");
    fs::write(
        &input,
        "colonbioptI\tcolonbioptII\tdepvenr\n\
         pos\tneg\t3\n\
         neg\t\t4\n",
    )
    .unwrap();

    let args = TranslateArgs {
        input: input.clone(),
        protocol: "Colonbiopt".to_string(),
        language: "nl-NL".to_string(),
        format: OutputFormatArg::Descriptions,
        output: None,
        codebooks: Some(codebooks),
    };
    let result = run_translate(&args).unwrap();

    assert_eq!(result.rows, 2);
    assert_eq!(result.header.len(), 2);
    assert_eq!(result.columns_in, 3);
    assert!(result.diagnostics.is_empty());

    let output = dir.path().join("export_out.txt");
    assert_eq!(result.output, output);
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "Colon biopsy_I\tColon biopsy_II\nP\tN\nN\t\n");
}

#[test]
fn unknown_protocol_fails_before_reading_the_input() {
    let dir = TempDir::new().unwrap();
    let codebooks = dir.path().join("codebooks");
    write_codebooks(&codebooks);

    let args = TranslateArgs {
        input: dir.path().join("missing.txt"),
        protocol: "Nonexistent".to_string(),
        language: "nl-NL".to_string(),
        format: OutputFormatArg::Descriptions,
        output: None,
        codebooks: Some(codebooks),
    };
    let error = run_translate(&args).unwrap_err();
    assert!(error.to_string().contains("Nonexistent"));
}

#[test]
fn unmapped_value_aborts_with_column_and_value() {
    let dir = TempDir::new().unwrap();
    let codebooks = dir.path().join("codebooks");
    write_codebooks(&codebooks);

    let input = dir.path().join("export.txt");
    fs::write(
        &input,
        "colonbiopt\tdepvenr\n\
         maybe\t3\n",
    )
    .unwrap();

    let args = TranslateArgs {
        input,
        protocol: "Colonbiopt".to_string(),
        language: "nl-NL".to_string(),
        format: OutputFormatArg::Codes,
        output: None,
        codebooks: Some(codebooks),
    };
    let error = run_translate(&args).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("maybe"));
    assert!(message.contains("colonbiopt"));
}
