//! Quantum state vector, probabilities, and measurement sampling
//!
//! This crate owns the dense amplitude representation and everything that
//! reads probabilities out of it:
//!
//! - [`QuantumState`]: 2^n complex amplitudes, constructed from a basis
//!   index, a bitstring, or raw amplitudes
//! - [`probabilities_raw`] / [`probabilities`] / [`marginal_probability`]:
//!   squared-magnitude queries, keyed by endian-tagged bitstrings
//! - [`perform_measurements`] / [`measurements_to_counts`]: shot sampling
//!   via a cumulative distribution and binary search
//!
//! # Example
//! ```
//! use qvec_state::{probabilities_raw, QuantumState};
//!
//! let state = QuantumState::from_basis_index(2, 2).unwrap();
//! assert_eq!(probabilities_raw(&state), vec![0.0, 0.0, 1.0, 0.0]);
//! ```

pub mod error;
pub mod measurement;
pub mod probabilities;
pub mod state;

pub use error::StateError;
pub use measurement::{
    counts_to_bitstring_counts, is_measurable, measurements_to_counts, perform_measurements,
};
pub use probabilities::{marginal_probability, probabilities, probabilities_raw};
pub use state::{QuantumState, MAX_QUBITS};

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;
