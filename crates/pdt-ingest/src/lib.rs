pub mod dataset;
pub mod error;
pub mod roman;

pub use dataset::{Dataset, NO_DATA_SENTINEL, PROTOCOL_VERSION_COLUMN};
pub use error::IngestError;
pub use roman::{parse_roman, to_roman, trailing_candidates};
