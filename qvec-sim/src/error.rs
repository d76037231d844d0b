//! Error types for circuit simulation

use qvec_core::QuantumError;
use thiserror::Error;

/// Errors that can occur while simulating a circuit
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulatorError {
    /// Circuit and state disagree on the number of qubits
    #[error("Circuit acts on {circuit} qubits but the state holds {state}")]
    QubitCountMismatch { circuit: usize, state: usize },

    /// Invalid circuit content discovered during execution
    #[error(transparent)]
    Circuit(#[from] QuantumError),
}

/// Result type for simulation
pub type Result<T> = std::result::Result<T, SimulatorError>;
