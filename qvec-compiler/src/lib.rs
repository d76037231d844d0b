//! Circuit transforms for QVEC
//!
//! Everything here consumes and produces [`qvec_core::Circuit`] values
//! without touching amplitudes:
//!
//! - [`extend_circuit`] / [`append_circuits`]: end-to-end merging with
//!   measurement-safety checks and matrix-pool index rewriting
//! - [`almost_eq`] / [`almost_eq_with`]: structural comparison within a
//!   tolerance
//! - [`make_controlled_circuit`] / [`make_multiplicity_controlled_circuit`]:
//!   wrap a sub-circuit behind one or more control qubits
//! - [`transpile_to_primitive`]: eliminate U/CU gates via the 2x2
//!   decomposition in [`decompose`]

pub mod append;
pub mod compare;
pub mod controlled;
pub mod decompose;
pub mod transpile;

pub use append::{append_circuits, extend_circuit};
pub use compare::{almost_eq, almost_eq_with};
pub use controlled::{
    apply_multiplicity_controlled_u_gate, make_controlled_circuit,
    make_multiplicity_controlled_circuit,
};
pub use decompose::{decompose_unitary, PrimitiveGate};
pub use transpile::transpile_to_primitive;
