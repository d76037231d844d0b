//! Rewriting circuits onto the primitive gate set
//!
//! [`transpile_to_primitive`] returns a circuit in which every U and CU gate
//! has been replaced by an equivalent run of primitive parametrized gates.
//! Primitive gates, measurements, and logger markers pass through unchanged;
//! classical-if sub-circuits are transpiled recursively.

use crate::decompose::{decompose_one_control_one_target_gate, decompose_one_target_gate};
use qvec_core::{Circuit, CircuitElement, Gate, Result};

/// Replace every U/CU gate with an equivalent primitive sequence
pub fn transpile_to_primitive(circuit: &Circuit, tolerance_sq: f64) -> Result<Circuit> {
    let mut new_circuit = Circuit::with_bits(circuit.n_qubits(), circuit.n_bits());

    for element in circuit.elements() {
        match element {
            CircuitElement::Gate(Gate::U { target, matrix_index }) => {
                let matrix = circuit.unitary_matrix(*matrix_index)?;
                for gate in decompose_one_target_gate(*target, matrix, tolerance_sq) {
                    new_circuit.add_gate(gate)?;
                }
            }
            CircuitElement::Gate(Gate::CU { control, target, matrix_index }) => {
                let matrix = circuit.unitary_matrix(*matrix_index)?;
                for gate in
                    decompose_one_control_one_target_gate(*control, *target, matrix, tolerance_sq)
                {
                    new_circuit.add_gate(gate)?;
                }
            }
            CircuitElement::Gate(gate) => new_circuit.add_gate(*gate)?,
            CircuitElement::IfStatement(statement) => {
                let transpiled = transpile_to_primitive(statement.circuit(), tolerance_sq)?;
                new_circuit.add_if_statement(statement.predicate().clone(), transpiled)?;
            }
            CircuitElement::IfElseStatement(statement) => {
                let if_branch = transpile_to_primitive(statement.if_circuit(), tolerance_sq)?;
                let else_branch = transpile_to_primitive(statement.else_circuit(), tolerance_sq)?;
                new_circuit.add_if_else_statement(
                    statement.predicate().clone(),
                    if_branch,
                    else_branch,
                )?;
            }
            CircuitElement::Logger(logger) => new_circuit.add_logger(logger.message()),
        }
    }

    Ok(new_circuit)
}
