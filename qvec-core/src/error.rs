//! Error types for circuit construction and circuit transforms

use thiserror::Error;

/// Errors that can occur while building or transforming circuits
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantumError {
    /// Qubit index outside the circuit
    #[error("Invalid qubit index {index}: circuit has only {n_qubits} qubits")]
    QubitOutOfRange { index: usize, n_qubits: usize },

    /// Classical bit index outside the circuit
    #[error("Invalid bit index {index}: circuit has only {n_bits} classical bits")]
    BitOutOfRange { index: usize, n_bits: usize },

    /// Control and target of a two-qubit gate coincide
    #[error("Control and target cannot both be qubit {0}")]
    ControlEqualsTarget(usize),

    /// Qubit counts of two circuits do not match
    #[error("Qubit count mismatch: {left} on the left, {right} on the right")]
    QubitCountMismatch { left: usize, right: usize },

    /// Classical bit counts of two circuits do not match
    #[error("Bit count mismatch: {left} on the left, {right} on the right")]
    BitCountMismatch { left: usize, right: usize },

    /// The mapped-qubit list does not cover the subcircuit
    #[error("Expected {expected} mapped qubit indices, got {actual}")]
    MappedQubitCountMismatch { expected: usize, actual: usize },

    /// A qubit index appears more than once in a mapped or control list
    #[error("Duplicate qubit index {0} in qubit list")]
    DuplicateQubit(usize),

    /// A control qubit also appears in the mapped-qubit list
    #[error("Control qubit {0} overlaps with the mapped qubit indices")]
    ControlOverlapsMapped(usize),

    /// A gate acts on a qubit that has already been measured
    #[error("Gate acts on qubit {0}, which has already been measured")]
    MeasuredQubitReuse(usize),

    /// A measurement gate cannot be placed inside a controlled wrapper
    #[error("Cannot make a measurement gate controlled")]
    MeasurementInControlled,

    /// A U/CU gate carries a matrix that is not unitary within tolerance
    #[error("Matrix for a unitary gate is not unitary within tolerance")]
    NonUnitaryMatrix,

    /// A U/CU gate references a matrix outside the circuit's pool
    #[error("Matrix pool index {index} out of range: pool holds {pool_size} matrices")]
    MatrixIndexOutOfRange { index: usize, pool_size: usize },

    /// A bitstring contains characters outside the allowed alphabet
    #[error("Malformed bitstring {0:?}")]
    MalformedBitstring(String),

    /// A basis-state index exceeds the dimension of the state space
    #[error("State index {index} out of range for dimension {dimension}")]
    StateIndexOutOfRange { index: usize, dimension: usize },

    /// An invariant that valid input cannot violate was violated anyway
    #[error("Logic bug: {0}")]
    LogicBug(String),
}

/// Result type for circuit operations
pub type Result<T> = std::result::Result<T, QuantumError>;
