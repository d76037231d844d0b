//! Merging circuits end to end
//!
//! [`extend_circuit`] splices the right circuit's elements onto the left in
//! place; [`append_circuits`] does the same on a copy. No gate of the right
//! circuit may act on a qubit the left circuit has already measured.

use qvec_core::{Circuit, CircuitElement, Gate, QuantumError, Result};

fn check_no_measured_reuse(element: &CircuitElement, measured: &[bool]) -> Result<()> {
    match element {
        CircuitElement::Gate(gate) => {
            for qubit in gate.qubits() {
                if measured.get(qubit).copied().unwrap_or(false) {
                    return Err(QuantumError::MeasuredQubitReuse(qubit));
                }
            }
            Ok(())
        }
        CircuitElement::IfStatement(statement) => {
            for inner in statement.circuit().elements() {
                check_no_measured_reuse(inner, measured)?;
            }
            Ok(())
        }
        CircuitElement::IfElseStatement(statement) => {
            for inner in statement.if_circuit().elements().chain(statement.else_circuit().elements())
            {
                check_no_measured_reuse(inner, measured)?;
            }
            Ok(())
        }
        CircuitElement::Logger(_) => Ok(()),
    }
}

fn rebase_matrix_index(gate: Gate, offset: usize) -> Gate {
    match gate {
        Gate::U { target, matrix_index } => Gate::U { target, matrix_index: matrix_index + offset },
        Gate::CU { control, target, matrix_index } => {
            Gate::CU { control, target, matrix_index: matrix_index + offset }
        }
        other => other,
    }
}

/// Splice `right` onto the end of `left`, in place
///
/// The matrix pools are concatenated and every U/CU gate of `right` has its
/// pool index shifted by the left pool's size. The measure bitmask of the
/// result is the bitwise OR of the two inputs (the right circuit's M gates
/// set their bits as they are re-added).
///
/// # Errors
/// - [`QuantumError::QubitCountMismatch`] / [`QuantumError::BitCountMismatch`]
///   when the shapes differ
/// - [`QuantumError::MeasuredQubitReuse`] when any gate of `right` (including
///   gates inside classical branches) touches a qubit measured in `left`
pub fn extend_circuit(left: &mut Circuit, right: &Circuit) -> Result<()> {
    if left.n_qubits() != right.n_qubits() {
        return Err(QuantumError::QubitCountMismatch {
            left: left.n_qubits(),
            right: right.n_qubits(),
        });
    }
    if left.n_bits() != right.n_bits() {
        return Err(QuantumError::BitCountMismatch { left: left.n_bits(), right: right.n_bits() });
    }

    // validate against the left mask as it was before any splicing
    for element in right.elements() {
        check_no_measured_reuse(element, left.measure_bitmask())?;
    }

    let pool_offset = left.unitary_matrices().len();
    for matrix in right.unitary_matrices() {
        left.add_unitary_matrix(*matrix);
    }

    for element in right.elements() {
        match element {
            CircuitElement::Gate(gate) => {
                left.add_gate(rebase_matrix_index(*gate, pool_offset))?;
            }
            CircuitElement::IfStatement(statement) => {
                // sub-circuits carry their own pools, so no index rewrite
                left.add_if_statement(statement.predicate().clone(), statement.circuit().clone())?;
            }
            CircuitElement::IfElseStatement(statement) => {
                left.add_if_else_statement(
                    statement.predicate().clone(),
                    statement.if_circuit().clone(),
                    statement.else_circuit().clone(),
                )?;
            }
            CircuitElement::Logger(logger) => left.add_logger(logger.message()),
        }
    }

    Ok(())
}

/// A fresh circuit equal to `left` followed by `right`
pub fn append_circuits(mut left: Circuit, right: &Circuit) -> Result<Circuit> {
    extend_circuit(&mut left, right)?;
    Ok(left)
}
