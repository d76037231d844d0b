//! Reader for the Tangelo circuit text format
//!
//! Each line is one gate record: the gate name, then its integer qubit
//! indices, then its floating-point angles, all whitespace-separated:
//!
//! ```text
//! H 0
//! CNOT 0 1
//! RZ 2 1.5707963267948966
//! ```
//!
//! The first `n_skip` lines of the stream are discarded; blank lines are
//! ignored.

use crate::error::{IoError, Result};
use qvec_core::Circuit;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

struct RecordFields<'a> {
    line_number: usize,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> RecordFields<'a> {
    fn index(&mut self) -> Result<usize> {
        let token = self
            .tokens
            .next()
            .ok_or_else(|| IoError::parse(self.line_number, "missing qubit index"))?;
        token
            .parse()
            .map_err(|_| IoError::parse(self.line_number, format!("bad qubit index {token:?}")))
    }

    fn angle(&mut self) -> Result<f64> {
        let token = self
            .tokens
            .next()
            .ok_or_else(|| IoError::parse(self.line_number, "missing angle"))?;
        token
            .parse()
            .map_err(|_| IoError::parse(self.line_number, format!("bad angle {token:?}")))
    }

    fn finish(mut self) -> Result<()> {
        match self.tokens.next() {
            Some(extra) => {
                Err(IoError::parse(self.line_number, format!("unexpected trailing field {extra:?}")))
            }
            None => Ok(()),
        }
    }
}

fn add_record(circuit: &mut Circuit, name: &str, mut fields: RecordFields<'_>) -> Result<()> {
    match name {
        "H" => circuit.add_h_gate(fields.index()?)?,
        "X" => circuit.add_x_gate(fields.index()?)?,
        "Y" => circuit.add_y_gate(fields.index()?)?,
        "Z" => circuit.add_z_gate(fields.index()?)?,
        "SX" => circuit.add_sx_gate(fields.index()?)?,
        "RX" => {
            let target = fields.index()?;
            circuit.add_rx_gate(target, fields.angle()?)?;
        }
        "RY" => {
            let target = fields.index()?;
            circuit.add_ry_gate(target, fields.angle()?)?;
        }
        "RZ" => {
            let target = fields.index()?;
            circuit.add_rz_gate(target, fields.angle()?)?;
        }
        "P" | "PHASE" => {
            let target = fields.index()?;
            circuit.add_p_gate(target, fields.angle()?)?;
        }
        "CH" => {
            let control = fields.index()?;
            circuit.add_ch_gate(control, fields.index()?)?;
        }
        "CX" | "CNOT" => {
            let control = fields.index()?;
            circuit.add_cx_gate(control, fields.index()?)?;
        }
        "CY" => {
            let control = fields.index()?;
            circuit.add_cy_gate(control, fields.index()?)?;
        }
        "CZ" => {
            let control = fields.index()?;
            circuit.add_cz_gate(control, fields.index()?)?;
        }
        "CSX" => {
            let control = fields.index()?;
            circuit.add_csx_gate(control, fields.index()?)?;
        }
        "CRX" => {
            let control = fields.index()?;
            let target = fields.index()?;
            circuit.add_crx_gate(control, target, fields.angle()?)?;
        }
        "CRY" => {
            let control = fields.index()?;
            let target = fields.index()?;
            circuit.add_cry_gate(control, target, fields.angle()?)?;
        }
        "CRZ" => {
            let control = fields.index()?;
            let target = fields.index()?;
            circuit.add_crz_gate(control, target, fields.angle()?)?;
        }
        "CP" | "CPHASE" => {
            let control = fields.index()?;
            let target = fields.index()?;
            circuit.add_cp_gate(control, target, fields.angle()?)?;
        }
        "M" | "MEASURE" => {
            let qubit = fields.index()?;
            circuit.add_m_gate(qubit, qubit)?;
        }
        other => {
            return Err(IoError::UnknownGate {
                name: other.to_string(),
                line: fields.line_number,
            })
        }
    }

    fields.finish()
}

/// Read a circuit from any buffered source
///
/// # Errors
/// Fails on unknown gate names, missing or malformed fields, trailing
/// fields, or qubit indices outside `n_qubits`.
pub fn read_tangelo_circuit_from<R: BufRead>(
    n_qubits: usize,
    reader: R,
    n_skip: usize,
) -> Result<Circuit> {
    let mut circuit = Circuit::new(n_qubits);

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        if line_index < n_skip {
            continue;
        }

        let line_number = line_index + 1;
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue; // blank line
        };

        let fields = RecordFields { line_number, tokens };
        add_record(&mut circuit, name, fields)?;
    }

    Ok(circuit)
}

/// Read a circuit from a file on disk
pub fn read_tangelo_circuit(
    n_qubits: usize,
    path: impl AsRef<Path>,
    n_skip: usize,
) -> Result<Circuit> {
    let file = File::open(path)?;
    read_tangelo_circuit_from(n_qubits, BufReader::new(file), n_skip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvec_core::{CircuitElement, Gate};

    fn read(source: &str, n_qubits: usize, n_skip: usize) -> Result<Circuit> {
        read_tangelo_circuit_from(n_qubits, source.as_bytes(), n_skip)
    }

    #[test]
    fn reads_a_mixed_gate_sequence() {
        let source = "H 0\nCNOT 0 1\nRZ 1 0.5\nCPHASE 1 0 0.25\nM 1\n";
        let circuit = read(source, 2, 0).unwrap();

        let gates: Vec<_> = circuit
            .elements()
            .map(|element| match element {
                CircuitElement::Gate(gate) => *gate,
                _ => panic!("expected only gates"),
            })
            .collect();

        assert_eq!(gates.len(), 5);
        assert!(matches!(gates[0], Gate::H { target: 0 }));
        assert!(matches!(gates[1], Gate::CX { control: 0, target: 1 }));
        assert!(matches!(gates[2], Gate::RZ { target: 1, angle } if (angle - 0.5).abs() < 1e-12));
        assert!(
            matches!(gates[3], Gate::CP { control: 1, target: 0, angle } if (angle - 0.25).abs() < 1e-12)
        );
        assert!(matches!(gates[4], Gate::M { qubit: 1, bit: 1 }));
        assert!(circuit.is_qubit_measured(1));
    }

    #[test]
    fn skips_leading_lines_and_blanks() {
        let source = "generated by tool\nversion 2\n\nX 0\n\n";
        let circuit = read(source, 1, 2).unwrap();
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn rejects_unknown_gate_names() {
        let err = read("FOO 0\n", 1, 0).unwrap_err();
        assert!(matches!(err, IoError::UnknownGate { line: 1, .. }));
    }

    #[test]
    fn rejects_malformed_fields() {
        assert!(matches!(read("RX 0\n", 1, 0).unwrap_err(), IoError::Parse { line: 1, .. }));
        assert!(matches!(read("H zero\n", 1, 0).unwrap_err(), IoError::Parse { line: 1, .. }));
        assert!(matches!(read("H 0 1\n", 2, 0).unwrap_err(), IoError::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let err = read("X 5\n", 2, 0).unwrap_err();
        assert!(matches!(err, IoError::Circuit(_)));
    }
}
