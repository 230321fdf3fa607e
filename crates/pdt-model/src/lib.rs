pub mod error;
pub mod format;
pub mod terminology;
pub mod version;

pub use error::TranslateError;
pub use format::OutputFormat;
pub use terminology::{Codebook, Concept, TerminologyBinding, ValueOutcome};
pub use version::VersionLabel;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codebook_serializes() {
        let mut codebook = Codebook::new("ppcolbio-", "nl-NL", "3", "2.16.840.1");
        let mut concept = Concept::new("2341", "colonbiopt");
        concept.set_terminology(TerminologyBinding::new("30000", "SNOMED", "Colon biopsy"));
        codebook.insert(concept);
        let json = serde_json::to_string(&codebook).expect("serialize codebook");
        let round: Codebook = serde_json::from_str(&json).expect("deserialize codebook");
        assert_eq!(round.version, "3");
        assert!(round.contains_column("colonbiopt"));
    }
}
