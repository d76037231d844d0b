//! Quantum circuit representation
//!
//! A [`Circuit`] is an ordered sequence of [`CircuitElement`]s (gates,
//! classically-conditioned sub-circuits, logger markers) over a fixed number
//! of qubits and classical bits, plus the pool of 2x2 matrices referenced by
//! U/CU gates and a bitmask of measured qubits.

use crate::control_flow::ControlFlowPredicate;
use crate::error::{QuantumError, Result};
use crate::gate::Gate;
use crate::matrix::{Matrix2x2, COMPLEX_ALMOST_EQ_TOLERANCE_SQ};
use std::fmt;

/// A marker element with no amplitude effect
///
/// The payload is opaque to the simulator; it is surfaced as a log event
/// when the marker is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitLogger {
    message: String,
}

impl CircuitLogger {
    /// Create a logger marker with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The marker message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A sub-circuit executed when a classical predicate holds
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    predicate: ControlFlowPredicate,
    circuit: Box<Circuit>,
}

impl IfStatement {
    /// Bundle a predicate with the sub-circuit it guards
    pub fn new(predicate: ControlFlowPredicate, circuit: Circuit) -> Self {
        Self { predicate, circuit: Box::new(circuit) }
    }

    /// The guarding predicate
    pub fn predicate(&self) -> &ControlFlowPredicate {
        &self.predicate
    }

    /// The guarded sub-circuit
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }
}

/// A pair of sub-circuits selected by a classical predicate
#[derive(Debug, Clone, PartialEq)]
pub struct IfElseStatement {
    predicate: ControlFlowPredicate,
    if_circuit: Box<Circuit>,
    else_circuit: Box<Circuit>,
}

impl IfElseStatement {
    /// Bundle a predicate with its two branches
    pub fn new(predicate: ControlFlowPredicate, if_circuit: Circuit, else_circuit: Circuit) -> Self {
        Self {
            predicate,
            if_circuit: Box::new(if_circuit),
            else_circuit: Box::new(else_circuit),
        }
    }

    /// The selecting predicate
    pub fn predicate(&self) -> &ControlFlowPredicate {
        &self.predicate
    }

    /// The branch taken when the predicate holds
    pub fn if_circuit(&self) -> &Circuit {
        &self.if_circuit
    }

    /// The branch taken when the predicate does not hold
    pub fn else_circuit(&self) -> &Circuit {
        &self.else_circuit
    }
}

/// One entry in a circuit's instruction sequence
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitElement {
    /// A gate instruction
    Gate(Gate),
    /// A classically-conditioned sub-circuit
    IfStatement(IfStatement),
    /// A classically-selected pair of sub-circuits
    IfElseStatement(IfElseStatement),
    /// A logging marker with no amplitude effect
    Logger(CircuitLogger),
}

/// An ordered sequence of circuit elements over a fixed qubit/bit count
///
/// Sub-circuits of classical-if elements are owned exclusively by their
/// parent element; cloning a circuit deep-copies them along with the matrix
/// pool.
///
/// # Example
/// ```
/// use qvec_core::Circuit;
///
/// let mut circuit = Circuit::new(2);
/// circuit.add_h_gate(0).unwrap();
/// circuit.add_cx_gate(0, 1).unwrap();
/// circuit.add_m_gate(0, 0).unwrap();
/// assert_eq!(circuit.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    n_qubits: usize,
    n_bits: usize,
    elements: Vec<CircuitElement>,
    unitary_matrices: Vec<Matrix2x2>,
    measure_bitmask: Vec<bool>,
}

impl Circuit {
    /// Create an empty circuit with `n_qubits` qubits and as many bits
    ///
    /// # Panics
    /// Panics if `n_qubits` is 0.
    pub fn new(n_qubits: usize) -> Self {
        Self::with_bits(n_qubits, n_qubits)
    }

    /// Create an empty circuit with separate qubit and bit counts
    ///
    /// # Panics
    /// Panics if `n_qubits` is 0.
    pub fn with_bits(n_qubits: usize, n_bits: usize) -> Self {
        assert!(n_qubits > 0, "Circuit must have at least one qubit");
        Self {
            n_qubits,
            n_bits,
            elements: Vec::new(),
            unitary_matrices: Vec::new(),
            measure_bitmask: vec![false; n_qubits],
        }
    }

    /// Number of qubits
    #[inline]
    pub const fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Number of classical bits
    #[inline]
    pub const fn n_bits(&self) -> usize {
        self.n_bits
    }

    /// Number of top-level elements
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the circuit holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the top-level elements in order
    pub fn elements(&self) -> impl Iterator<Item = &CircuitElement> {
        self.elements.iter()
    }

    /// A specific element by position
    pub fn element(&self, index: usize) -> Option<&CircuitElement> {
        self.elements.get(index)
    }

    /// The pool of matrices referenced by U/CU gates
    pub fn unitary_matrices(&self) -> &[Matrix2x2] {
        &self.unitary_matrices
    }

    /// Look up a pooled matrix by index
    pub fn unitary_matrix(&self, index: usize) -> Result<&Matrix2x2> {
        self.unitary_matrices.get(index).ok_or(QuantumError::MatrixIndexOutOfRange {
            index,
            pool_size: self.unitary_matrices.len(),
        })
    }

    /// Which qubits carry a pending measurement
    pub fn measure_bitmask(&self) -> &[bool] {
        &self.measure_bitmask
    }

    /// Whether a measurement has been recorded for `qubit`
    pub fn is_qubit_measured(&self, qubit: usize) -> bool {
        self.measure_bitmask.get(qubit).copied().unwrap_or(false)
    }

    fn check_qubit(&self, index: usize) -> Result<()> {
        if index >= self.n_qubits {
            return Err(QuantumError::QubitOutOfRange { index, n_qubits: self.n_qubits });
        }
        Ok(())
    }

    fn check_bit(&self, index: usize) -> Result<()> {
        if index >= self.n_bits {
            return Err(QuantumError::BitOutOfRange { index, n_bits: self.n_bits });
        }
        Ok(())
    }

    fn check_control_target(&self, control: usize, target: usize) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(QuantumError::ControlEqualsTarget(control));
        }
        Ok(())
    }

    fn check_same_shape(&self, sub: &Circuit) -> Result<()> {
        if sub.n_qubits != self.n_qubits {
            return Err(QuantumError::QubitCountMismatch {
                left: self.n_qubits,
                right: sub.n_qubits,
            });
        }
        if sub.n_bits != self.n_bits {
            return Err(QuantumError::BitCountMismatch { left: self.n_bits, right: sub.n_bits });
        }
        Ok(())
    }

    /// Append a gate instruction, validating its indices
    ///
    /// U/CU gates must reference a matrix already in the pool; use
    /// [`Circuit::add_u_gate`] / [`Circuit::add_cu_gate`] to add a matrix
    /// and the gate together.
    pub fn add_gate(&mut self, gate: Gate) -> Result<()> {
        match gate {
            Gate::M { qubit, bit } => {
                self.check_qubit(qubit)?;
                self.check_bit(bit)?;
                self.measure_bitmask[qubit] = true;
            }
            Gate::U { target, matrix_index } => {
                self.check_qubit(target)?;
                self.unitary_matrix(matrix_index)?;
            }
            Gate::CU { control, target, matrix_index } => {
                self.check_control_target(control, target)?;
                self.unitary_matrix(matrix_index)?;
            }
            _ => match gate.control() {
                Some(control) => self.check_control_target(control, gate.target())?,
                None => self.check_qubit(gate.target())?,
            },
        }

        self.elements.push(CircuitElement::Gate(gate));
        Ok(())
    }

    /// Add a matrix to the pool, returning its index
    ///
    /// The caller is responsible for unitarity; the `add_u_gate` /
    /// `add_cu_gate` entry points check it.
    pub fn add_unitary_matrix(&mut self, matrix: Matrix2x2) -> usize {
        self.unitary_matrices.push(matrix);
        self.unitary_matrices.len() - 1
    }

    /// Hadamard on `target`
    pub fn add_h_gate(&mut self, target: usize) -> Result<()> {
        self.add_gate(Gate::H { target })
    }

    /// Pauli-X on `target`
    pub fn add_x_gate(&mut self, target: usize) -> Result<()> {
        self.add_gate(Gate::X { target })
    }

    /// Pauli-Y on `target`
    pub fn add_y_gate(&mut self, target: usize) -> Result<()> {
        self.add_gate(Gate::Y { target })
    }

    /// Pauli-Z on `target`
    pub fn add_z_gate(&mut self, target: usize) -> Result<()> {
        self.add_gate(Gate::Z { target })
    }

    /// Square root of X on `target`
    pub fn add_sx_gate(&mut self, target: usize) -> Result<()> {
        self.add_gate(Gate::SX { target })
    }

    /// X rotation by `angle` on `target`
    pub fn add_rx_gate(&mut self, target: usize, angle: f64) -> Result<()> {
        self.add_gate(Gate::RX { target, angle })
    }

    /// Y rotation by `angle` on `target`
    pub fn add_ry_gate(&mut self, target: usize, angle: f64) -> Result<()> {
        self.add_gate(Gate::RY { target, angle })
    }

    /// Z rotation by `angle` on `target`
    pub fn add_rz_gate(&mut self, target: usize, angle: f64) -> Result<()> {
        self.add_gate(Gate::RZ { target, angle })
    }

    /// Phase of `angle` on `target`
    pub fn add_p_gate(&mut self, target: usize, angle: f64) -> Result<()> {
        self.add_gate(Gate::P { target, angle })
    }

    /// Controlled Hadamard
    pub fn add_ch_gate(&mut self, control: usize, target: usize) -> Result<()> {
        self.add_gate(Gate::CH { control, target })
    }

    /// Controlled X
    pub fn add_cx_gate(&mut self, control: usize, target: usize) -> Result<()> {
        self.add_gate(Gate::CX { control, target })
    }

    /// Controlled Y
    pub fn add_cy_gate(&mut self, control: usize, target: usize) -> Result<()> {
        self.add_gate(Gate::CY { control, target })
    }

    /// Controlled Z
    pub fn add_cz_gate(&mut self, control: usize, target: usize) -> Result<()> {
        self.add_gate(Gate::CZ { control, target })
    }

    /// Controlled square root of X
    pub fn add_csx_gate(&mut self, control: usize, target: usize) -> Result<()> {
        self.add_gate(Gate::CSX { control, target })
    }

    /// Controlled X rotation
    pub fn add_crx_gate(&mut self, control: usize, target: usize, angle: f64) -> Result<()> {
        self.add_gate(Gate::CRX { control, target, angle })
    }

    /// Controlled Y rotation
    pub fn add_cry_gate(&mut self, control: usize, target: usize, angle: f64) -> Result<()> {
        self.add_gate(Gate::CRY { control, target, angle })
    }

    /// Controlled Z rotation
    pub fn add_crz_gate(&mut self, control: usize, target: usize, angle: f64) -> Result<()> {
        self.add_gate(Gate::CRZ { control, target, angle })
    }

    /// Controlled phase
    pub fn add_cp_gate(&mut self, control: usize, target: usize, angle: f64) -> Result<()> {
        self.add_gate(Gate::CP { control, target, angle })
    }

    /// Generic unitary on `target`
    ///
    /// # Errors
    /// Returns [`QuantumError::NonUnitaryMatrix`] if the matrix is not
    /// unitary within the default tolerance.
    pub fn add_u_gate(&mut self, matrix: Matrix2x2, target: usize) -> Result<()> {
        self.check_qubit(target)?;
        if !matrix.is_unitary(COMPLEX_ALMOST_EQ_TOLERANCE_SQ) {
            return Err(QuantumError::NonUnitaryMatrix);
        }
        let matrix_index = self.add_unitary_matrix(matrix);
        self.elements.push(CircuitElement::Gate(Gate::U { target, matrix_index }));
        Ok(())
    }

    /// Controlled generic unitary
    pub fn add_cu_gate(&mut self, matrix: Matrix2x2, control: usize, target: usize) -> Result<()> {
        self.check_control_target(control, target)?;
        if !matrix.is_unitary(COMPLEX_ALMOST_EQ_TOLERANCE_SQ) {
            return Err(QuantumError::NonUnitaryMatrix);
        }
        let matrix_index = self.add_unitary_matrix(matrix);
        self.elements.push(CircuitElement::Gate(Gate::CU { control, target, matrix_index }));
        Ok(())
    }

    /// Measure `qubit` into classical bit `bit`
    pub fn add_m_gate(&mut self, qubit: usize, bit: usize) -> Result<()> {
        self.add_gate(Gate::M { qubit, bit })
    }

    /// Guard `circuit` with `predicate`
    ///
    /// The sub-circuit must have the same qubit and bit counts as this one.
    pub fn add_if_statement(
        &mut self,
        predicate: ControlFlowPredicate,
        circuit: Circuit,
    ) -> Result<()> {
        self.check_same_shape(&circuit)?;
        self.elements.push(CircuitElement::IfStatement(IfStatement::new(predicate, circuit)));
        Ok(())
    }

    /// Select between `if_circuit` and `else_circuit` with `predicate`
    pub fn add_if_else_statement(
        &mut self,
        predicate: ControlFlowPredicate,
        if_circuit: Circuit,
        else_circuit: Circuit,
    ) -> Result<()> {
        self.check_same_shape(&if_circuit)?;
        self.check_same_shape(&else_circuit)?;
        self.elements.push(CircuitElement::IfElseStatement(IfElseStatement::new(
            predicate,
            if_circuit,
            else_circuit,
        )));
        Ok(())
    }

    /// Insert a logging marker
    pub fn add_logger(&mut self, message: impl Into<String>) {
        self.elements.push(CircuitElement::Logger(CircuitLogger::new(message)));
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} bits, {} elements)",
            self.n_qubits,
            self.n_bits,
            self.len()
        )?;
        for (i, element) in self.elements.iter().enumerate() {
            match element {
                CircuitElement::Gate(gate) => writeln!(f, "  {}: {:?}", i, gate)?,
                CircuitElement::IfStatement(stmt) => {
                    writeln!(f, "  {}: if {:?} ({} elements)", i, stmt.predicate(), stmt.circuit().len())?
                }
                CircuitElement::IfElseStatement(stmt) => writeln!(
                    f,
                    "  {}: if/else {:?} ({}/{} elements)",
                    i,
                    stmt.predicate(),
                    stmt.if_circuit().len(),
                    stmt.else_circuit().len()
                )?,
                CircuitElement::Logger(logger) => writeln!(f, "  {}: log {:?}", i, logger.message())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_flow::PredicateKind;
    use crate::matrices::h_gate;
    use num_complex::Complex64;

    #[test]
    fn new_circuit_is_empty() {
        let circuit = Circuit::new(3);
        assert_eq!(circuit.n_qubits(), 3);
        assert_eq!(circuit.n_bits(), 3);
        assert!(circuit.is_empty());
        assert_eq!(circuit.measure_bitmask(), &[false, false, false]);
    }

    #[test]
    #[should_panic(expected = "at least one qubit")]
    fn zero_qubit_circuit_panics() {
        Circuit::new(0);
    }

    #[test]
    fn add_gate_validates_qubit_indices() {
        let mut circuit = Circuit::new(2);
        assert!(circuit.add_h_gate(0).is_ok());
        assert!(matches!(
            circuit.add_h_gate(2),
            Err(QuantumError::QubitOutOfRange { index: 2, n_qubits: 2 })
        ));
        assert!(matches!(
            circuit.add_cx_gate(1, 1),
            Err(QuantumError::ControlEqualsTarget(1))
        ));
        assert!(circuit.add_cx_gate(0, 1).is_ok());
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn measurement_sets_the_bitmask() {
        let mut circuit = Circuit::with_bits(2, 1);
        circuit.add_m_gate(1, 0).unwrap();
        assert!(circuit.is_qubit_measured(1));
        assert!(!circuit.is_qubit_measured(0));

        assert!(matches!(
            circuit.add_m_gate(0, 1),
            Err(QuantumError::BitOutOfRange { index: 1, n_bits: 1 })
        ));
    }

    #[test]
    fn u_gate_pools_its_matrix() {
        let mut circuit = Circuit::new(1);
        circuit.add_u_gate(h_gate(), 0).unwrap();
        circuit.add_u_gate(h_gate(), 0).unwrap();

        assert_eq!(circuit.unitary_matrices().len(), 2);
        let Some(CircuitElement::Gate(Gate::U { matrix_index, .. })) = circuit.element(1) else {
            panic!("expected a U gate");
        };
        assert_eq!(*matrix_index, 1);
    }

    #[test]
    fn non_unitary_matrices_are_rejected() {
        let mut circuit = Circuit::new(1);
        let bogus = Matrix2x2::new(
            Complex64::new(2.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(2.0, 0.0),
        );
        assert!(matches!(circuit.add_u_gate(bogus, 0), Err(QuantumError::NonUnitaryMatrix)));
    }

    #[test]
    fn raw_u_gate_must_reference_the_pool() {
        let mut circuit = Circuit::new(1);
        assert!(matches!(
            circuit.add_gate(Gate::U { target: 0, matrix_index: 0 }),
            Err(QuantumError::MatrixIndexOutOfRange { index: 0, pool_size: 0 })
        ));
    }

    #[test]
    fn if_statement_requires_matching_shape() {
        let mut circuit = Circuit::new(2);
        let sub = Circuit::new(3);
        let predicate = ControlFlowPredicate::new(vec![0], 1, PredicateKind::If);
        assert!(matches!(
            circuit.add_if_statement(predicate, sub),
            Err(QuantumError::QubitCountMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn clone_deep_copies_subcircuits_and_pool() {
        let mut sub = Circuit::new(2);
        sub.add_u_gate(h_gate(), 0).unwrap();

        let mut circuit = Circuit::new(2);
        circuit.add_u_gate(h_gate(), 1).unwrap();
        circuit
            .add_if_statement(ControlFlowPredicate::bit_is_set(0), sub)
            .unwrap();

        let mut copy = circuit.clone();
        assert_eq!(copy, circuit);

        // mutating the copy's pool leaves the original untouched
        copy.add_unitary_matrix(h_gate());
        assert_eq!(circuit.unitary_matrices().len(), 1);
        assert_eq!(copy.unitary_matrices().len(), 2);
    }

    #[test]
    fn display_reports_shape() {
        let mut circuit = Circuit::new(2);
        circuit.add_h_gate(0).unwrap();
        circuit.add_logger("checkpoint");
        let rendered = format!("{}", circuit);
        assert!(rendered.contains("2 qubits"));
        assert!(rendered.contains("checkpoint"));
    }
}
