//! Controlled and multiplicity-controlled circuit synthesis
//!
//! [`make_controlled_circuit`] wraps a sub-circuit so it only acts when one
//! extra qubit is |1⟩, relocating the sub-circuit's qubits onto a larger
//! register through a mapped-index list. The multiplicity-controlled form
//! generalizes to an ordered list of controls via the recursive square-root
//! expansion: with W = √V,
//!
//! ```text
//! C^k(V) = CW(c_{k-1}) · C^{k-1}X(c_{k-1}) · CW†(c_{k-1}) · C^{k-1}X(c_{k-1}) · C^{k-1}(W)
//! ```
//!
//! which bottoms out in plain CU gates.

use qvec_core::matrices::{angle_gate, non_angle_gate, x_gate};
use qvec_core::{Circuit, CircuitElement, Gate, Matrix2x2, QuantumError, Result};
use std::collections::HashSet;

fn check_mapped_count(mapped: &[usize], subcircuit: &Circuit) -> Result<()> {
    if mapped.len() != subcircuit.n_qubits() {
        return Err(QuantumError::MappedQubitCountMismatch {
            expected: subcircuit.n_qubits(),
            actual: mapped.len(),
        });
    }
    Ok(())
}

fn check_all_unique(indices: &[usize]) -> Result<()> {
    let mut seen = HashSet::new();
    for &index in indices {
        if !seen.insert(index) {
            return Err(QuantumError::DuplicateQubit(index));
        }
    }
    Ok(())
}

fn check_no_overlap(mapped: &[usize], controls: &[usize]) -> Result<()> {
    let control_set: HashSet<usize> = controls.iter().copied().collect();
    for &index in mapped {
        if control_set.contains(&index) {
            return Err(QuantumError::ControlOverlapsMapped(index));
        }
    }
    Ok(())
}

fn check_fit(mapped: &[usize], controls: &[usize], n_new_qubits: usize) -> Result<()> {
    for &index in mapped.iter().chain(controls) {
        if index >= n_new_qubits {
            return Err(QuantumError::QubitOutOfRange { index, n_qubits: n_new_qubits });
        }
    }
    Ok(())
}

/// Append the gates applying `matrix` on `target` under the given controls
///
/// With no controls this is a plain U gate; with one control a CU gate; with
/// more the recursive square-root expansion above.
pub fn apply_multiplicity_controlled_u_gate(
    circuit: &mut Circuit,
    matrix: &Matrix2x2,
    target: usize,
    controls: &[usize],
) -> Result<()> {
    match controls {
        [] => circuit.add_u_gate(*matrix, target),
        [control] => circuit.add_cu_gate(*matrix, *control, target),
        [rest @ .., last] => {
            let root = matrix.square_root();

            circuit.add_cu_gate(root, *last, target)?;
            apply_multiplicity_controlled_u_gate(circuit, &x_gate(), *last, rest)?;
            circuit.add_cu_gate(root.conjugate_transpose(), *last, target)?;
            apply_multiplicity_controlled_u_gate(circuit, &x_gate(), *last, rest)?;
            apply_multiplicity_controlled_u_gate(circuit, &root, target, rest)
        }
    }
}

/// Wrap `subcircuit` so it runs only when `control` is |1⟩
///
/// `mapped_qubits[i]` names the new position of the sub-circuit's qubit `i`
/// on the `n_new_qubits`-qubit result.
///
/// # Errors
/// The mapped list must cover the sub-circuit exactly, contain no
/// duplicates, not contain the control, and fit on the new circuit;
/// measurement gates anywhere in the sub-circuit are rejected.
pub fn make_controlled_circuit(
    subcircuit: &Circuit,
    n_new_qubits: usize,
    control: usize,
    mapped_qubits: &[usize],
) -> Result<Circuit> {
    make_multiplicity_controlled_circuit(subcircuit, n_new_qubits, &[control], mapped_qubits)
}

/// Wrap `subcircuit` so it runs only when every control qubit is |1⟩
pub fn make_multiplicity_controlled_circuit(
    subcircuit: &Circuit,
    n_new_qubits: usize,
    control_qubits: &[usize],
    mapped_qubits: &[usize],
) -> Result<Circuit> {
    if control_qubits.is_empty() {
        return Err(QuantumError::LogicBug(
            "a controlled circuit requires at least one control qubit".to_string(),
        ));
    }

    check_mapped_count(mapped_qubits, subcircuit)?;
    check_all_unique(mapped_qubits)?;
    check_all_unique(control_qubits)?;
    check_no_overlap(mapped_qubits, control_qubits)?;
    check_fit(mapped_qubits, control_qubits, n_new_qubits)?;

    let mut new_circuit = Circuit::with_bits(n_new_qubits, subcircuit.n_bits());
    add_controlled_elements(subcircuit, &mut new_circuit, control_qubits, mapped_qubits)?;
    Ok(new_circuit)
}

fn add_controlled_elements(
    subcircuit: &Circuit,
    new_circuit: &mut Circuit,
    controls: &[usize],
    mapped: &[usize],
) -> Result<()> {
    for element in subcircuit.elements() {
        match element {
            CircuitElement::Gate(gate) => {
                add_controlled_gate(subcircuit, new_circuit, gate, controls, mapped)?
            }
            CircuitElement::IfStatement(statement) => {
                let mut branch = Circuit::with_bits(new_circuit.n_qubits(), new_circuit.n_bits());
                add_controlled_elements(statement.circuit(), &mut branch, controls, mapped)?;
                new_circuit.add_if_statement(statement.predicate().clone(), branch)?;
            }
            CircuitElement::IfElseStatement(statement) => {
                let mut if_branch =
                    Circuit::with_bits(new_circuit.n_qubits(), new_circuit.n_bits());
                add_controlled_elements(statement.if_circuit(), &mut if_branch, controls, mapped)?;
                let mut else_branch =
                    Circuit::with_bits(new_circuit.n_qubits(), new_circuit.n_bits());
                add_controlled_elements(
                    statement.else_circuit(),
                    &mut else_branch,
                    controls,
                    mapped,
                )?;
                new_circuit.add_if_else_statement(
                    statement.predicate().clone(),
                    if_branch,
                    else_branch,
                )?;
            }
            CircuitElement::Logger(logger) => new_circuit.add_logger(logger.message()),
        }
    }
    Ok(())
}

fn add_controlled_gate(
    subcircuit: &Circuit,
    new_circuit: &mut Circuit,
    gate: &Gate,
    controls: &[usize],
    mapped: &[usize],
) -> Result<()> {
    let kind = gate.kind();
    let single_control = match controls {
        [control] => Some(*control),
        _ => None,
    };

    if kind.is_one_target_transform() {
        let target = mapped[gate.target()];
        match single_control {
            Some(control) => match *gate {
                Gate::H { .. } => new_circuit.add_ch_gate(control, target),
                Gate::X { .. } => new_circuit.add_cx_gate(control, target),
                Gate::Y { .. } => new_circuit.add_cy_gate(control, target),
                Gate::Z { .. } => new_circuit.add_cz_gate(control, target),
                Gate::SX { .. } => new_circuit.add_csx_gate(control, target),
                _ => Err(QuantumError::LogicBug("one-target dispatch mismatch".to_string())),
            },
            None => apply_multiplicity_controlled_u_gate(
                new_circuit,
                &non_angle_gate(kind),
                target,
                controls,
            ),
        }
    } else if kind.is_one_target_one_angle_transform() {
        let target = mapped[gate.target()];
        let angle = gate
            .angle()
            .ok_or_else(|| QuantumError::LogicBug("angle gate without angle".to_string()))?;
        match single_control {
            Some(control) => match *gate {
                Gate::RX { .. } => new_circuit.add_crx_gate(control, target, angle),
                Gate::RY { .. } => new_circuit.add_cry_gate(control, target, angle),
                Gate::RZ { .. } => new_circuit.add_crz_gate(control, target, angle),
                Gate::P { .. } => new_circuit.add_cp_gate(control, target, angle),
                _ => Err(QuantumError::LogicBug("one-angle dispatch mismatch".to_string())),
            },
            None => apply_multiplicity_controlled_u_gate(
                new_circuit,
                &angle_gate(kind, angle),
                target,
                controls,
            ),
        }
    } else if kind.is_one_control_one_target_transform()
        || kind.is_one_control_one_target_one_angle_transform()
    {
        // the original control joins the wrapper's control list
        let original_control = gate
            .control()
            .ok_or_else(|| QuantumError::LogicBug("controlled gate without control".to_string()))?;
        let target = mapped[gate.target()];
        let mut all_controls: Vec<usize> = controls.to_vec();
        all_controls.push(mapped[original_control]);

        let matrix = match gate.angle() {
            Some(angle) => angle_gate(kind, angle),
            None => non_angle_gate(kind),
        };
        apply_multiplicity_controlled_u_gate(new_circuit, &matrix, target, &all_controls)
    } else {
        match *gate {
            Gate::U { target, matrix_index } => {
                let matrix = *subcircuit.unitary_matrix(matrix_index)?;
                let target = mapped[target];
                match single_control {
                    Some(control) => new_circuit.add_cu_gate(matrix, control, target),
                    None => apply_multiplicity_controlled_u_gate(
                        new_circuit,
                        &matrix,
                        target,
                        controls,
                    ),
                }
            }
            Gate::CU { control, target, matrix_index } => {
                let matrix = *subcircuit.unitary_matrix(matrix_index)?;
                let mut all_controls: Vec<usize> = controls.to_vec();
                all_controls.push(mapped[control]);
                apply_multiplicity_controlled_u_gate(
                    new_circuit,
                    &matrix,
                    mapped[target],
                    &all_controls,
                )
            }
            Gate::M { .. } => Err(QuantumError::MeasurementInControlled),
            _ => Err(QuantumError::LogicBug("gate kind escaped controlled dispatch".to_string())),
        }
    }
}
