//! Core types for the QVEC state-vector simulator
//!
//! This crate provides the building blocks shared by the rest of the
//! workspace:
//!
//! - **Circuit IR**: [`Circuit`] and [`CircuitElement`], including
//!   classically-conditioned sub-circuits and logger markers
//! - **Gate catalog**: the closed [`Gate`] instruction set with its
//!   [`GateKind`] predicates and canonical matrices
//! - **Matrix algebra**: [`Matrix2x2`] with multiply, adjoint, determinant,
//!   closed-form square root, and tolerance comparison
//! - **Bit utilities**: endian-tagged bitstring ↔ state-index conversion
//! - **Error handling**: [`QuantumError`] with a crate-wide [`Result`] alias
//!
//! # Quick start
//!
//! ```
//! use qvec_core::Circuit;
//!
//! let mut circuit = Circuit::new(2);
//! circuit.add_h_gate(0).unwrap();
//! circuit.add_cx_gate(0, 1).unwrap();
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod bits;
pub mod circuit;
pub mod control_flow;
pub mod error;
pub mod gate;
pub mod matrices;
pub mod matrix;

pub use bits::{Endian, MARGINALIZED_QUBIT};
pub use circuit::{Circuit, CircuitElement, CircuitLogger, IfElseStatement, IfStatement};
pub use control_flow::{ClassicalRegister, ControlFlowPredicate, PredicateKind};
pub use error::QuantumError;
pub use gate::{Gate, GateKind};
pub use matrix::{Matrix2x2, COMPLEX_ALMOST_EQ_TOLERANCE_SQ};
pub use num_complex::Complex64;

/// Result type for circuit operations
pub type Result<T> = std::result::Result<T, QuantumError>;
