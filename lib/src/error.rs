extern crate thiserror;

use std::io;

use thiserror::Error;

/// Error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}

/// Resource table load errors.
///
/// These are raised while the engine is being constructed, never from a
/// resolution call.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("File I/O Error: {path}: {kind}")]
    File { path: String, kind: io::ErrorKind },

    #[error("Malformed {resource} at line {line}: {reason}")]
    Malformed {
        resource: &'static str,
        line: usize,
        reason: String,
    },

    #[error("Penn tag {0} belongs to a major class but has no NUPOS mapping")]
    UnmappedPennTag(String),
}

impl LoadError {
    pub(crate) fn malformed(resource: &'static str, line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            resource,
            line,
            reason: reason.into(),
        }
    }
}
