//! Reader for decomposition-table files
//!
//! The format is a header line `NUMBER_OF_COMMANDS : <N>` followed by N
//! five-line blocks. Each block carries a control state and target qubit on
//! its first line, then the four row-major 2x2 matrix entries as
//! `<real> <imag>` pairs:
//!
//! ```text
//! NUMBER_OF_COMMANDS : 1
//! ALLCONTROL : 2
//! 0.0 0.0
//! 1.0 0.0
//! 1.0 0.0
//! 0.0 0.0
//! ```

use crate::error::{IoError, Result};
use num_complex::Complex64;
use qvec_compiler::apply_multiplicity_controlled_u_gate;
use qvec_core::{Circuit, Matrix2x2};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// How a decomposed gate is applied to the circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecomposedGateState {
    /// Apply the matrix on the target, controlled by every other qubit
    AllControl,
    /// Apply the matrix on the target alone
    SingleGate,
}

/// One parsed entry of a decomposition table
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedGate {
    pub state: DecomposedGateState,
    pub target: usize,
    pub matrix: Matrix2x2,
}

struct Lines<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> Lines<R> {
    fn next_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.line_number += 1;
        let n_read = self.reader.read_line(&mut line)?;
        if n_read == 0 {
            return Err(IoError::parse(self.line_number, "unexpected end of file"));
        }
        Ok(line)
    }
}

fn read_gate_count<R: BufRead>(lines: &mut Lines<R>) -> Result<usize> {
    // header: NUMBER_OF_COMMANDS : <N>
    let line = lines.next_line()?;
    let mut tokens = line.split_whitespace();

    let keyword = tokens.next().unwrap_or_default();
    if keyword != "NUMBER_OF_COMMANDS" {
        return Err(IoError::parse(
            lines.line_number,
            format!("expected NUMBER_OF_COMMANDS header, found {keyword:?}"),
        ));
    }

    let count_token = tokens.nth(1).unwrap_or_default();
    count_token.parse().map_err(|_| {
        IoError::parse(lines.line_number, format!("bad command count {count_token:?}"))
    })
}

fn read_state_and_target<R: BufRead>(
    lines: &mut Lines<R>,
) -> Result<(DecomposedGateState, usize)> {
    // block header: <STATE> : <qubit_index>
    let line = lines.next_line()?;
    let mut tokens = line.split_whitespace();

    let state = match tokens.next().unwrap_or_default() {
        "ALLCONTROL" => DecomposedGateState::AllControl,
        "SINGLEGATE" => DecomposedGateState::SingleGate,
        other => {
            return Err(IoError::parse(
                lines.line_number,
                format!("unknown control state {other:?}"),
            ))
        }
    };

    let target_token = tokens.nth(1).unwrap_or_default();
    let target = target_token.parse().map_err(|_| {
        IoError::parse(lines.line_number, format!("bad qubit index {target_token:?}"))
    })?;

    Ok((state, target))
}

fn read_matrix<R: BufRead>(lines: &mut Lines<R>) -> Result<Matrix2x2> {
    let mut entries = [Complex64::new(0.0, 0.0); 4];

    for entry in &mut entries {
        let line = lines.next_line()?;
        let line_number = lines.line_number;
        let mut tokens = line.split_whitespace();

        let mut component = |name: &str| -> Result<f64> {
            let token = tokens
                .next()
                .ok_or_else(|| IoError::parse(line_number, format!("missing {name} part")))?;
            token
                .parse()
                .map_err(|_| IoError::parse(line_number, format!("bad {name} part {token:?}")))
        };

        let real = component("real")?;
        let imag = component("imaginary")?;
        *entry = Complex64::new(real, imag);
    }

    Ok(Matrix2x2::new(entries[0], entries[1], entries[2], entries[3]))
}

/// Parse a decomposition table from any buffered source
pub fn read_decomposed_gates<R: BufRead>(reader: R) -> Result<Vec<DecomposedGate>> {
    let mut lines = Lines { reader, line_number: 0 };
    let n_gates = read_gate_count(&mut lines)?;

    let mut gates = Vec::with_capacity(n_gates);
    for _ in 0..n_gates {
        let (state, target) = read_state_and_target(&mut lines)?;
        let matrix = read_matrix(&mut lines)?;
        gates.push(DecomposedGate { state, target, matrix });
    }

    Ok(gates)
}

/// Parse a decomposition table from a file on disk
pub fn read_decomposed_gates_from_file(path: impl AsRef<Path>) -> Result<Vec<DecomposedGate>> {
    let file = File::open(path)?;
    read_decomposed_gates(BufReader::new(file))
}

/// Build a circuit applying a parsed decomposition table in order
///
/// SINGLEGATE entries become U gates on their target; ALLCONTROL entries
/// become multiplicity-controlled U gates controlled by every other qubit.
pub fn circuit_from_decomposed_gates(
    gates: &[DecomposedGate],
    n_qubits: usize,
) -> Result<Circuit> {
    let mut circuit = Circuit::new(n_qubits);

    for gate in gates {
        match gate.state {
            DecomposedGateState::SingleGate => {
                circuit.add_u_gate(gate.matrix, gate.target)?;
            }
            DecomposedGateState::AllControl => {
                let controls: Vec<usize> =
                    (0..n_qubits).filter(|&qubit| qubit != gate.target).collect();
                apply_multiplicity_controlled_u_gate(
                    &mut circuit,
                    &gate.matrix,
                    gate.target,
                    &controls,
                )?;
            }
        }
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvec_core::matrices::{h_gate, x_gate};

    const H: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn parses_a_two_entry_table() {
        let source = format!(
            "NUMBER_OF_COMMANDS : 2\n\
             SINGLEGATE : 0\n\
             {H} 0.0\n{H} 0.0\n{H} 0.0\n-{H} 0.0\n\
             ALLCONTROL : 1\n\
             0.0 0.0\n1.0 0.0\n1.0 0.0\n0.0 0.0\n"
        );

        let gates = read_decomposed_gates(source.as_bytes()).unwrap();
        assert_eq!(gates.len(), 2);

        assert_eq!(gates[0].state, DecomposedGateState::SingleGate);
        assert_eq!(gates[0].target, 0);
        assert!(gates[0].matrix.almost_eq(&h_gate()));

        assert_eq!(gates[1].state, DecomposedGateState::AllControl);
        assert_eq!(gates[1].target, 1);
        assert!(gates[1].matrix.almost_eq(&x_gate()));
    }

    #[test]
    fn rejects_bad_headers_and_truncation() {
        assert!(matches!(
            read_decomposed_gates("COMMANDS : 1\n".as_bytes()).unwrap_err(),
            IoError::Parse { line: 1, .. }
        ));
        assert!(matches!(
            read_decomposed_gates("NUMBER_OF_COMMANDS : x\n".as_bytes()).unwrap_err(),
            IoError::Parse { line: 1, .. }
        ));
        assert!(matches!(
            read_decomposed_gates("NUMBER_OF_COMMANDS : 1\nSINGLEGATE : 0\n1.0 0.0\n".as_bytes())
                .unwrap_err(),
            IoError::Parse { .. }
        ));
        assert!(matches!(
            read_decomposed_gates("NUMBER_OF_COMMANDS : 1\nSOMETIMES : 0\n".as_bytes())
                .unwrap_err(),
            IoError::Parse { line: 2, .. }
        ));
    }

    #[test]
    fn builds_a_circuit_from_the_table() {
        let gates = vec![
            DecomposedGate {
                state: DecomposedGateState::SingleGate,
                target: 0,
                matrix: h_gate(),
            },
            DecomposedGate {
                state: DecomposedGateState::AllControl,
                target: 2,
                matrix: x_gate(),
            },
        ];

        let circuit = circuit_from_decomposed_gates(&gates, 3).unwrap();
        // one U gate plus the doubly-controlled expansion (5 CU gates)
        assert_eq!(circuit.len(), 6);
    }
}
