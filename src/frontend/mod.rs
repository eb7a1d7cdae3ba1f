//! Frontend module - Line normalization and language/strategy selection

pub mod line;
pub mod language;

pub use language::{file_name, select_strategy, Language, Strategy};
pub use line::{normalize, SourceLine};
