//! Protocol name index.
//!
//! Users pick protocols by name; catalogs are keyed by prefix. The built-in
//! index covers the shipped protocols and can be extended or overridden by
//! a `protocols.toml` next to the codebook directories:
//!
//! ```toml
//! [[protocols]]
//! name = "Colonbiopt"
//! prefix = "ppcolbio-"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodebookError;

/// Protocol used when the user does not pick one.
pub const DEFAULT_PROTOCOL: &str = "Colonbiopt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolEntry {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Default, Deserialize)]
struct ProtocolIndexFile {
    #[serde(default)]
    protocols: Vec<ProtocolEntry>,
}

/// Sorted map of protocol name to catalog prefix.
#[derive(Debug, Clone)]
pub struct ProtocolIndex {
    entries: BTreeMap<String, String>,
}

impl ProtocolIndex {
    /// The protocols shipped with the tool.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("Colonbiopt".to_string(), "ppcolbio-".to_string());
        entries.insert("ColonRectumcarcinoom".to_string(), "ppcolcar-".to_string());
        Self { entries }
    }

    /// Built-in index merged with `protocols.toml` under `root`, when
    /// present. File entries win on name collisions.
    pub fn load(root: &Path) -> Result<Self, CodebookError> {
        let mut index = Self::builtin();
        let path = root.join("protocols.toml");
        if !path.is_file() {
            return Ok(index);
        }
        let text =
            std::fs::read_to_string(&path).map_err(|error| CodebookError::io(&path, error))?;
        let parsed: ProtocolIndexFile = toml::from_str(&text).map_err(|error| {
            CodebookError::Toml {
                path: path.clone(),
                source: error,
            }
        })?;
        for entry in parsed.protocols {
            index.entries.insert(entry.name, entry.prefix);
        }
        Ok(index)
    }

    pub fn prefix(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, prefix)| (name.as_str(), prefix.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
