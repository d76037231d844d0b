//! Error types for file readers and statevector persistence

use qvec_core::QuantumError;
use qvec_state::StateError;
use thiserror::Error;

/// Errors raised while reading or writing circuit and state files
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying I/O failure
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A line of an input file could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A gate record named a gate outside the supported set
    #[error("Unknown gate name {name:?} at line {line}")]
    UnknownGate { name: String, line: usize },

    /// A statevector blob had a bad magic, header, or length
    #[error("Malformed statevector file: {0}")]
    MalformedStatevector(String),

    /// Building the parsed circuit failed
    #[error(transparent)]
    Circuit(#[from] QuantumError),

    /// Reconstructing the loaded state failed
    #[error(transparent)]
    State(#[from] StateError),
}

impl IoError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse { line, message: message.into() }
    }
}

/// Result type for reader operations
pub type Result<T> = std::result::Result<T, IoError>;
