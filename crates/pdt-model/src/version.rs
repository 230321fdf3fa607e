//! Version labels with numeric-aware ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A protocol codebook version label.
///
/// Labels are numeric in practice (the dataset's version column holds
/// integers), so ordering compares numerically whenever both sides parse
/// and falls back to lexical order otherwise. This keeps the newest version
/// retrievable from a sorted map even past version "9".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionLabel(String);

impl VersionLabel {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the label, when it parses as an integer.
    pub fn number(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VersionLabel {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<i64> for VersionLabel {
    fn from(number: i64) -> Self {
        Self(number.to_string())
    }
}

impl Ord for VersionLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.number(), other.number()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            // Numeric labels sort before free-form ones.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for VersionLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
