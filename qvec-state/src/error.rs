//! Error types for state vector operations

use qvec_core::QuantumError;
use thiserror::Error;

/// Errors that can occur during state construction, queries, and sampling
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    /// Too many qubits for a dense amplitude vector
    #[error("Cannot allocate a dense state for {n_qubits} qubits (maximum {max_qubits})")]
    TooManyQubits { n_qubits: usize, max_qubits: usize },

    /// Amplitude vector length is not a power of two
    #[error("Invalid state dimension {dimension}, expected a nonzero power of 2")]
    InvalidDimension { dimension: usize },

    /// Lengths of two amplitude or probability vectors disagree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The state vector norm is too far from 1
    #[error("State vector not normalized, norm = {norm}")]
    NotNormalized { norm: f64 },

    /// Sampling requires each qubit measured exactly once
    #[error("Circuit is not measurable: each qubit must carry exactly one measurement")]
    NotMeasurable,

    /// A probability vector with no entries cannot be sampled
    #[error("Cannot sample from an empty probability distribution")]
    EmptyDistribution,

    /// Binary search walked past the cumulative distribution
    #[error("Logic bug: sampled past the end of the cumulative distribution")]
    SampledPastDistributionEnd,

    /// Bitstring or index conversion failure
    #[error(transparent)]
    Conversion(#[from] QuantumError),
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;
