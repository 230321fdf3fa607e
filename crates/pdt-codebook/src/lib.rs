pub mod diagnostics;
pub mod dir_source;
pub mod error;
pub mod housekeeping;
pub mod protocols;
pub mod registry;
pub mod source;

pub use diagnostics::{Diagnostic, RunLog};
pub use dir_source::{CODEBOOKS_ENV_VAR, DirSource};
pub use error::CodebookError;
pub use housekeeping::{HOUSEKEEPING_PREFIX, HousekeepingCodebook};
pub use protocols::{ProtocolEntry, ProtocolIndex};
pub use registry::ProtocolRegistry;
pub use source::{CatalogEntry, CodebookSource, ConceptDef, ValueDef, build_codebook};
