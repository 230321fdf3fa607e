pub mod config;
pub mod driver;
pub mod error;
pub mod output;

pub use config::RunConfig;
pub use driver::Translator;
pub use error::TranslationError;
pub use output::{HeaderItem, TranslatedData};
