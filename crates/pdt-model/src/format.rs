//! Output representation choices for terminology triples.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which parts of a (code, code system, display name) triple are rendered
/// for translated headers and values.
///
/// The set is fixed by the domain; rendering is an exhaustive match in
/// [`crate::TerminologyBinding::render`], so there is no unknown-format
/// failure mode at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Display name only (e.g. the SNOMED description).
    #[default]
    Descriptions,
    /// Code only (e.g. the SNOMED code).
    Codes,
    /// `codeSystem:code`.
    CodesystemAndCodes,
    /// `code:displayName`.
    CodesAndDescriptions,
    /// `codeSystem:code:displayName`.
    CodesystemAndCodesAndDescriptions,
}

impl OutputFormat {
    /// Canonical lowercase name, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Descriptions => "descriptions",
            OutputFormat::Codes => "codes",
            OutputFormat::CodesystemAndCodes => "codesystem-and-codes",
            OutputFormat::CodesAndDescriptions => "codes-and-descriptions",
            OutputFormat::CodesystemAndCodesAndDescriptions => {
                "codesystem-and-codes-and-descriptions"
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "descriptions" => Ok(OutputFormat::Descriptions),
            "codes" => Ok(OutputFormat::Codes),
            "codesystem-and-codes" => Ok(OutputFormat::CodesystemAndCodes),
            "codes-and-descriptions" => Ok(OutputFormat::CodesAndDescriptions),
            "codesystem-and-codes-and-descriptions" => {
                Ok(OutputFormat::CodesystemAndCodesAndDescriptions)
            }
            _ => Err(format!("unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for format in [
            OutputFormat::Descriptions,
            OutputFormat::Codes,
            OutputFormat::CodesystemAndCodes,
            OutputFormat::CodesAndDescriptions,
            OutputFormat::CodesystemAndCodesAndDescriptions,
        ] {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!("codes-only".parse::<OutputFormat>().is_err());
    }
}
