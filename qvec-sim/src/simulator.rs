//! The simulation kernel
//!
//! [`simulate`] walks a circuit's elements in order and mutates the state in
//! place. Primitive gates get specialized pair updates; U/CU go through the
//! generic 2x2 path; classical-if elements recurse on the selected branch.
//!
//! Measurement has two modes:
//!
//! - [`simulate`] (pure evolution, no PRNG): M gates are deferred. The
//!   bit → qubit association is recorded and the amplitudes are left
//!   untouched, so the full distribution can be read off the final state.
//! - [`simulate_with_prng`]: each M gate collapses its qubit. The marginal
//!   probability of |1⟩ is summed, a uniform draw picks the outcome, the
//!   inconsistent amplitudes are zeroed, and the survivors are renormalized
//!   by the square root of the chosen marginal. Outcomes land in the
//!   returned [`ClassicalRegister`], where classical-if predicates read
//!   them.

use crate::error::{Result, SimulatorError};
use crate::ops::{
    general_gate_transform, negate_amplitude, phase_amplitude, superpose_amplitudes,
    swap_amplitudes, turn_amplitudes,
};
use crate::pair_generator::{DoubleQubitGatePairGenerator, SingleQubitGatePairGenerator};
use ahash::AHashMap;
use num_complex::Complex64;
use qvec_core::matrices::{angle_gate, non_angle_gate};
use qvec_core::{Circuit, CircuitElement, ClassicalRegister, Gate};
use qvec_state::QuantumState;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

struct SimulationContext<'a> {
    register: ClassicalRegister,
    prng: Option<&'a mut StdRng>,
    // bit -> qubit associations recorded in pure-evolution mode
    deferred: AHashMap<usize, usize>,
}

/// Evolve `state` through `circuit` without performing measurements
///
/// M gates are deferred (recorded, not collapsed); classical-if predicates
/// therefore evaluate against an all-zero register.
///
/// # Errors
/// Fails with [`SimulatorError::QubitCountMismatch`] if the circuit and
/// state shapes differ, or propagates circuit errors (bad pool index, bad
/// bit index).
pub fn simulate(circuit: &Circuit, state: &mut QuantumState) -> Result<()> {
    let mut context = SimulationContext {
        register: ClassicalRegister::new(circuit.n_bits()),
        prng: None,
        deferred: AHashMap::new(),
    };
    check_shapes(circuit, state)?;
    run_circuit(circuit, state, &mut context)?;
    if !context.deferred.is_empty() {
        debug!(n_deferred = context.deferred.len(), "measurements deferred without a PRNG");
    }
    Ok(())
}

/// Evolve `state` through `circuit`, collapsing on every measurement
///
/// Returns the classical register filled by the M gates.
pub fn simulate_with_prng(
    circuit: &Circuit,
    state: &mut QuantumState,
    prng: &mut StdRng,
) -> Result<ClassicalRegister> {
    let mut context = SimulationContext {
        register: ClassicalRegister::new(circuit.n_bits()),
        prng: Some(prng),
        deferred: AHashMap::new(),
    };
    check_shapes(circuit, state)?;
    run_circuit(circuit, state, &mut context)?;
    Ok(context.register)
}

fn check_shapes(circuit: &Circuit, state: &QuantumState) -> Result<()> {
    if circuit.n_qubits() != state.n_qubits() {
        return Err(SimulatorError::QubitCountMismatch {
            circuit: circuit.n_qubits(),
            state: state.n_qubits(),
        });
    }
    Ok(())
}

fn run_circuit(
    circuit: &Circuit,
    state: &mut QuantumState,
    context: &mut SimulationContext<'_>,
) -> Result<()> {
    for element in circuit.elements() {
        match element {
            CircuitElement::Gate(gate) => apply_gate(circuit, state, gate, context)?,
            CircuitElement::IfStatement(statement) => {
                if statement.predicate().evaluate(&context.register).map_err(SimulatorError::Circuit)? {
                    run_circuit(statement.circuit(), state, context)?;
                }
            }
            CircuitElement::IfElseStatement(statement) => {
                let branch = if statement
                    .predicate()
                    .evaluate(&context.register)
                    .map_err(SimulatorError::Circuit)?
                {
                    statement.if_circuit()
                } else {
                    statement.else_circuit()
                };
                run_circuit(branch, state, context)?;
            }
            CircuitElement::Logger(logger) => {
                debug!(message = logger.message(), "circuit logger marker");
            }
        }
    }
    Ok(())
}

fn apply_gate(
    circuit: &Circuit,
    state: &mut QuantumState,
    gate: &Gate,
    context: &mut SimulationContext<'_>,
) -> Result<()> {
    let n_qubits = state.n_qubits();

    match *gate {
        Gate::M { qubit, bit } => match context.prng.as_deref_mut() {
            Some(prng) => {
                let outcome = collapse_qubit(state, qubit, prng);
                context.register.set(bit, outcome).map_err(SimulatorError::Circuit)?;
            }
            None => {
                context.deferred.insert(bit, qubit);
            }
        },

        Gate::X { target } => {
            for (i0, i1) in SingleQubitGatePairGenerator::new(target, n_qubits) {
                swap_amplitudes(state.amplitudes_mut(), i0, i1);
            }
        }
        Gate::H { target } => {
            for (i0, i1) in SingleQubitGatePairGenerator::new(target, n_qubits) {
                superpose_amplitudes(state.amplitudes_mut(), i0, i1);
            }
        }
        Gate::RX { target, angle } => {
            for (i0, i1) in SingleQubitGatePairGenerator::new(target, n_qubits) {
                turn_amplitudes(state.amplitudes_mut(), i0, i1, angle);
            }
        }
        Gate::Z { target } => {
            for (_, i1) in SingleQubitGatePairGenerator::new(target, n_qubits) {
                negate_amplitude(state.amplitudes_mut(), i1);
            }
        }
        Gate::P { target, angle } => {
            for (_, i1) in SingleQubitGatePairGenerator::new(target, n_qubits) {
                phase_amplitude(state.amplitudes_mut(), i1, angle);
            }
        }
        Gate::Y { .. } | Gate::SX { .. } => {
            let matrix = non_angle_gate(gate.kind());
            for (i0, i1) in SingleQubitGatePairGenerator::new(gate.target(), n_qubits) {
                general_gate_transform(state.amplitudes_mut(), i0, i1, &matrix);
            }
        }
        Gate::RY { target, angle } | Gate::RZ { target, angle } => {
            let matrix = angle_gate(gate.kind(), angle);
            for (i0, i1) in SingleQubitGatePairGenerator::new(target, n_qubits) {
                general_gate_transform(state.amplitudes_mut(), i0, i1, &matrix);
            }
        }
        Gate::U { target, matrix_index } => {
            let matrix = *circuit.unitary_matrix(matrix_index).map_err(SimulatorError::Circuit)?;
            for (i0, i1) in SingleQubitGatePairGenerator::new(target, n_qubits) {
                general_gate_transform(state.amplitudes_mut(), i0, i1, &matrix);
            }
        }

        Gate::CX { control, target } => {
            for (i0, i1) in DoubleQubitGatePairGenerator::new(control, target, n_qubits) {
                swap_amplitudes(state.amplitudes_mut(), i0, i1);
            }
        }
        Gate::CRX { control, target, angle } => {
            for (i0, i1) in DoubleQubitGatePairGenerator::new(control, target, n_qubits) {
                turn_amplitudes(state.amplitudes_mut(), i0, i1, angle);
            }
        }
        Gate::CZ { control, target } => {
            for (_, i1) in DoubleQubitGatePairGenerator::new(control, target, n_qubits) {
                negate_amplitude(state.amplitudes_mut(), i1);
            }
        }
        Gate::CP { control, target, angle } => {
            // pure phase on the |11⟩ half of each pair; i0 is untouched
            for (_, i1) in DoubleQubitGatePairGenerator::new(control, target, n_qubits) {
                phase_amplitude(state.amplitudes_mut(), i1, angle);
            }
        }
        Gate::CH { control, target } | Gate::CY { control, target } | Gate::CSX { control, target } => {
            let matrix = non_angle_gate(gate.kind());
            for (i0, i1) in DoubleQubitGatePairGenerator::new(control, target, n_qubits) {
                general_gate_transform(state.amplitudes_mut(), i0, i1, &matrix);
            }
        }
        Gate::CRY { control, target, angle } | Gate::CRZ { control, target, angle } => {
            let matrix = angle_gate(gate.kind(), angle);
            for (i0, i1) in DoubleQubitGatePairGenerator::new(control, target, n_qubits) {
                general_gate_transform(state.amplitudes_mut(), i0, i1, &matrix);
            }
        }
        Gate::CU { control, target, matrix_index } => {
            let matrix = *circuit.unitary_matrix(matrix_index).map_err(SimulatorError::Circuit)?;
            for (i0, i1) in DoubleQubitGatePairGenerator::new(control, target, n_qubits) {
                general_gate_transform(state.amplitudes_mut(), i0, i1, &matrix);
            }
        }
    }

    Ok(())
}

/// Collapse `qubit` to a measured outcome, returning 0 or 1
fn collapse_qubit(state: &mut QuantumState, qubit: usize, prng: &mut StdRng) -> u8 {
    let probability_one: f64 = state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|(index, _)| (index >> qubit) & 1 == 1)
        .map(|(_, amp)| amp.norm_sqr())
        .sum();

    let draw = prng.gen::<f64>();
    let outcome: u8 = u8::from(draw < probability_one);

    let marginal = if outcome == 1 { probability_one } else { 1.0 - probability_one };
    let inv_norm = 1.0 / marginal.sqrt();

    for (index, amp) in state.amplitudes_mut().iter_mut().enumerate() {
        if ((index >> qubit) & 1) as u8 != outcome {
            *amp = Complex64::new(0.0, 0.0);
        } else {
            *amp *= inv_norm;
        }
    }

    outcome
}
