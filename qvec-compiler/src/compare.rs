//! Structural circuit comparison within a tolerance
//!
//! Two circuits compare equal when they have the same shape and their
//! elements match pairwise. Gates must carry the same kind tag and indices;
//! their effective 2x2 matrices are then compared within the squared
//! tolerance, so RX(θ) and RX(θ + 1e-9) compare equal while X and
//! U(X-matrix) do not (the kind tags differ).

use qvec_core::matrices::{angle_gate, non_angle_gate};
use qvec_core::{Circuit, CircuitElement, Gate, Matrix2x2, COMPLEX_ALMOST_EQ_TOLERANCE_SQ};

/// The effective 2x2 matrix a transform gate applies to its target
fn gate_matrix(circuit: &Circuit, gate: &Gate) -> Option<Matrix2x2> {
    let kind = gate.kind();
    if kind.is_non_angle_transform() {
        Some(non_angle_gate(kind))
    } else if kind.is_angle_transform() {
        Some(angle_gate(kind, gate.angle()?))
    } else {
        let matrix_index = gate.matrix_index()?;
        circuit.unitary_matrix(matrix_index).ok().copied()
    }
}

fn gates_almost_eq(
    left_circuit: &Circuit,
    left: &Gate,
    right_circuit: &Circuit,
    right: &Gate,
    tolerance_sq: f64,
) -> bool {
    if let (Gate::M { qubit: lq, bit: lb }, Gate::M { qubit: rq, bit: rb }) = (left, right) {
        return lq == rq && lb == rb;
    }

    if left.kind() != right.kind() {
        return false;
    }
    if left.target() != right.target() || left.control() != right.control() {
        return false;
    }

    match (gate_matrix(left_circuit, left), gate_matrix(right_circuit, right)) {
        (Some(left_matrix), Some(right_matrix)) => {
            left_matrix.almost_eq_with(&right_matrix, tolerance_sq)
        }
        _ => false,
    }
}

/// Compare two circuits element-wise within `tolerance_sq`
pub fn almost_eq_with(left: &Circuit, right: &Circuit, tolerance_sq: f64) -> bool {
    if left.n_qubits() != right.n_qubits() || left.n_bits() != right.n_bits() {
        return false;
    }
    if left.len() != right.len() {
        return false;
    }

    left.elements().zip(right.elements()).all(|pair| match pair {
        (CircuitElement::Gate(l), CircuitElement::Gate(r)) => {
            gates_almost_eq(left, l, right, r, tolerance_sq)
        }
        (CircuitElement::IfStatement(l), CircuitElement::IfStatement(r)) => {
            l.predicate() == r.predicate()
                && almost_eq_with(l.circuit(), r.circuit(), tolerance_sq)
        }
        (CircuitElement::IfElseStatement(l), CircuitElement::IfElseStatement(r)) => {
            l.predicate() == r.predicate()
                && almost_eq_with(l.if_circuit(), r.if_circuit(), tolerance_sq)
                && almost_eq_with(l.else_circuit(), r.else_circuit(), tolerance_sq)
        }
        // logger payloads are opaque and do not affect semantics
        (CircuitElement::Logger(_), CircuitElement::Logger(_)) => true,
        _ => false,
    })
}

/// Compare two circuits with the default tolerance
pub fn almost_eq(left: &Circuit, right: &Circuit) -> bool {
    almost_eq_with(left, right, COMPLEX_ALMOST_EQ_TOLERANCE_SQ)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvec_core::matrices::x_gate;
    use qvec_core::ControlFlowPredicate;

    fn sample_circuit() -> Circuit {
        let mut circuit = Circuit::new(2);
        circuit.add_h_gate(0).unwrap();
        circuit.add_crx_gate(0, 1, 0.75).unwrap();
        circuit.add_u_gate(x_gate(), 1).unwrap();
        circuit.add_m_gate(0, 0).unwrap();
        circuit
    }

    #[test]
    fn comparison_is_reflexive_and_survives_cloning() {
        let circuit = sample_circuit();
        assert!(almost_eq(&circuit, &circuit));
        assert!(almost_eq(&circuit.clone(), &circuit));
        assert!(almost_eq(&circuit, &circuit.clone()));
    }

    #[test]
    fn different_shapes_reject_quickly() {
        let circuit = sample_circuit();
        assert!(!almost_eq(&circuit, &Circuit::new(3)));
        assert!(!almost_eq(&circuit, &Circuit::with_bits(2, 1)));
        assert!(!almost_eq(&circuit, &Circuit::new(2)));
    }

    #[test]
    fn named_gate_and_its_u_equivalent_differ() {
        let mut named = Circuit::new(1);
        named.add_x_gate(0).unwrap();

        let mut generic = Circuit::new(1);
        generic.add_u_gate(x_gate(), 0).unwrap();

        // same action, different kind tags
        assert!(!almost_eq(&named, &generic));
    }

    #[test]
    fn angles_compare_through_their_matrices() {
        let mut left = Circuit::new(1);
        left.add_rx_gate(0, 0.5).unwrap();

        let mut nearly = Circuit::new(1);
        nearly.add_rx_gate(0, 0.5 + 1.0e-9).unwrap();
        assert!(almost_eq(&left, &nearly));

        let mut far = Circuit::new(1);
        far.add_rx_gate(0, 0.6).unwrap();
        assert!(!almost_eq(&left, &far));
    }

    #[test]
    fn measurements_compare_by_their_tuples() {
        let mut left = Circuit::new(2);
        left.add_m_gate(0, 1).unwrap();

        let mut same = Circuit::new(2);
        same.add_m_gate(0, 1).unwrap();
        assert!(almost_eq(&left, &same));

        let mut different = Circuit::new(2);
        different.add_m_gate(0, 0).unwrap();
        assert!(!almost_eq(&left, &different));
    }

    #[test]
    fn mismatched_indices_reject() {
        let mut left = Circuit::new(2);
        left.add_cx_gate(0, 1).unwrap();
        let mut right = Circuit::new(2);
        right.add_cx_gate(1, 0).unwrap();
        assert!(!almost_eq(&left, &right));
    }

    #[test]
    fn classical_branches_compare_recursively() {
        let make = |angle: f64| {
            let mut branch = Circuit::new(1);
            branch.add_rx_gate(0, angle).unwrap();
            let mut circuit = Circuit::new(1);
            circuit.add_m_gate(0, 0).unwrap();
            circuit
                .add_if_statement(ControlFlowPredicate::bit_is_set(0), branch)
                .unwrap();
            circuit
        };

        assert!(almost_eq(&make(0.25), &make(0.25)));
        assert!(!almost_eq(&make(0.25), &make(0.5)));
    }
}
