//! State-vector simulation kernel for QVEC
//!
//! The kernel applies a [`qvec_core::Circuit`] to a
//! [`qvec_state::QuantumState`] by walking the circuit elements in order and
//! updating amplitudes in place, pair by pair:
//!
//! - [`SingleQubitGatePairGenerator`] / [`DoubleQubitGatePairGenerator`]
//!   enumerate the affected index pairs lazily
//! - [`ops`] holds the per-pair updates, from the cheap swap/superpose
//!   specializations up to the generic 2x2 transform
//! - [`simulate`] runs pure evolution; [`simulate_with_prng`] additionally
//!   collapses measurements into a classical register
//!
//! The simulator is single-threaded and synchronous: the state is
//! exclusively owned for the duration of the call and no renormalization is
//! applied outside of measurement collapse.
//!
//! # Example
//! ```
//! use qvec_core::Circuit;
//! use qvec_state::QuantumState;
//!
//! let mut circuit = Circuit::new(2);
//! circuit.add_h_gate(0).unwrap();
//! circuit.add_cx_gate(0, 1).unwrap();
//!
//! let mut state = QuantumState::new(2).unwrap();
//! qvec_sim::simulate(&circuit, &mut state).unwrap();
//! assert!(state.is_normalized(1e-10));
//! ```

pub mod error;
pub mod ops;
pub mod pair_generator;
pub mod simulator;

pub use error::SimulatorError;
pub use pair_generator::{DoubleQubitGatePairGenerator, SingleQubitGatePairGenerator};
pub use simulator::{simulate, simulate_with_prng};

/// Result type for simulation
pub type Result<T> = std::result::Result<T, SimulatorError>;
