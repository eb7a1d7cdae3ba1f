//! Middle module - Line classification
//!
//! Both strategies turn normalized lines into an ordered sequence of
//! `ClassifiedLine`s. Each run owns a fresh nesting state; nothing is shared
//! between documents.

pub mod classified;
pub mod scan;
pub mod indentation;
pub mod generic;

pub use classified::{ClassifiedLine, Tag};
pub use generic::GenericClassifier;
pub use indentation::IndentationClassifier;

use crate::frontend::{SourceLine, Strategy};

/// Run the classifier for `strategy` over `lines`.
pub fn classify_lines(lines: &[SourceLine], strategy: Strategy) -> Vec<ClassifiedLine> {
    match strategy {
        Strategy::Indentation => IndentationClassifier::new().classify(lines),
        Strategy::Generic => GenericClassifier::new().classify(lines),
    }
}
