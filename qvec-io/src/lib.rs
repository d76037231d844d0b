//! Circuit readers and statevector persistence for QVEC
//!
//! Three external formats are supported:
//!
//! - [`tangelo`]: newline-separated gate records (`NAME indices… angles…`)
//! - [`decomposition`]: `NUMBER_OF_COMMANDS` tables of controlled 2x2
//!   unitaries
//! - [`statevector`]: a binary amplitude blob with exact round-tripping

pub mod decomposition;
pub mod error;
pub mod statevector;
pub mod tangelo;

pub use decomposition::{
    circuit_from_decomposed_gates, read_decomposed_gates, read_decomposed_gates_from_file,
    DecomposedGate, DecomposedGateState,
};
pub use error::IoError;
pub use statevector::{
    load_statevector, load_statevector_from_file, save_statevector, save_statevector_to_file,
};
pub use tangelo::{read_tangelo_circuit, read_tangelo_circuit_from};

/// Result type for reader operations
pub type Result<T> = std::result::Result<T, IoError>;
