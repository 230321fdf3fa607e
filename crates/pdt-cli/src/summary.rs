use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::types::TranslationRunResult;

pub fn print_summary(result: &TranslationRunResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    println!("Protocol: {}", result.protocol);
    println!("Containing: {}", result.format);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Translated")]);
    apply_table_style(&mut table);
    for item in &result.header {
        table.add_row(vec![
            Cell::new(item.original.clone()),
            Cell::new(item.translated.clone()),
        ]);
    }
    println!("{table}");

    let excluded = result.columns_in - result.header.len();
    println!(
        "{} rows translated, {} columns written, {} excluded",
        result.rows,
        result.header.len(),
        excluded
    );

    if !result.diagnostics.is_empty() {
        eprintln!("Diagnostics:");
        for diagnostic in &result.diagnostics {
            eprintln!("- [{}] {}", diagnostic.source, diagnostic.message);
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}
