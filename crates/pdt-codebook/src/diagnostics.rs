//! Run-scoped diagnostics for non-fatal issues.
//!
//! Fatal errors abort the run through `Result`; everything the
//! degrade-gracefully policy tolerates (missing codebook version, missing
//! housekeeping catalog, concept without terminology) lands here instead.
//! The log is cleared at the start of each run and printed with the run
//! summary, independent of the output file's correctness.

use tracing::warn;

/// One non-fatal issue observed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Component that raised the issue (e.g. a protocol prefix).
    pub source: String,
    pub message: String,
}

/// Accumulator for [`Diagnostic`]s, scoped to a single translation run.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<Diagnostic>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far. Called at the start of each run.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record a diagnostic and emit it as a tracing warning.
    pub fn record(&mut self, source: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            source: source.into(),
            message: message.into(),
        };
        warn!(source = %diagnostic.source, "{}", diagnostic.message);
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_the_log() {
        let mut log = RunLog::new();
        log.record("ppcolbio-", "version 5 of the protocol doesn't seem to exist");
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
    }
}
