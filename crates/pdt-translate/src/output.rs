//! Translated output and its tab-separated writer.

use std::io::Write;
use std::path::Path;

use crate::error::TranslationError;

/// One translated header entry: the original dataset name and what it
/// became. The original name is kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderItem {
    pub original: String,
    pub translated: String,
}

/// The finished translation: one header row plus one line per input row,
/// in input order, restricted to in-scope columns.
#[derive(Debug, Clone, Default)]
pub struct TranslatedData {
    pub header: Vec<HeaderItem>,
    pub lines: Vec<Vec<String>>,
}

impl TranslatedData {
    /// Write as tab-separated text: translated header names first, then
    /// one line per row.
    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        let header: Vec<&str> = self
            .header
            .iter()
            .map(|item| item.translated.as_str())
            .collect();
        writeln!(writer, "{}", header.join("\t"))?;
        for line in &self.lines {
            writeln!(writer, "{}", line.join("\t"))?;
        }
        Ok(())
    }

    /// Write to a file; failure to produce output is fatal.
    pub fn write_to_path(&self, path: &Path) -> Result<(), TranslationError> {
        let write = || -> std::io::Result<()> {
            let file = std::fs::File::create(path)?;
            let mut writer = std::io::BufWriter::new(file);
            self.write_to(&mut writer)?;
            writer.flush()
        };
        write().map_err(|source| TranslationError::Output {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_tab_separated_lines() {
        let data = TranslatedData {
            header: vec![
                HeaderItem {
                    original: "colonbioptI".to_string(),
                    translated: "Colon biopsy_I".to_string(),
                },
                HeaderItem {
                    original: "colonbioptII".to_string(),
                    translated: "Colon biopsy_II".to_string(),
                },
            ],
            lines: vec![
                vec!["P".to_string(), "N".to_string()],
                vec!["N".to_string(), String::new()],
            ],
        };
        let mut buffer = Vec::new();
        data.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "Colon biopsy_I\tColon biopsy_II\nP\tN\nN\t\n");
    }
}
