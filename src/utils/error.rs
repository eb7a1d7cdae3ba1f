//! Error handling for pseudoc
//!
//! The transcompiler core is total and never fails. Errors only come from
//! the command layer around it: reading input and decoding JSON envelopes.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Command layer error
#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Malformed input envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("No input given: pass a FILE or pipe source text on stdin")]
    MissingInput,
}

impl Error {
    /// Wrap an IO error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Process exit code the CLI uses for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } | Self::Stdin(_) => 2,
            Self::Envelope(_) | Self::MissingInput => 1,
        }
    }
}
