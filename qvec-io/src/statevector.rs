//! Binary statevector persistence
//!
//! The blob layout is an 8-byte magic, a little-endian `u64` qubit count,
//! then 2^n amplitudes as `(re, im)` pairs of little-endian `f64`. Every
//! byte of every amplitude is preserved, so save followed by load
//! round-trips bit-exactly.

use crate::error::{IoError, Result};
use num_complex::Complex64;
use qvec_state::{QuantumState, MAX_QUBITS};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: &[u8; 8] = b"QVECSV01";

/// Write a statevector blob to any sink
pub fn save_statevector<W: Write>(mut writer: W, state: &QuantumState) -> Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_all(&(state.n_qubits() as u64).to_le_bytes())?;

    for amplitude in state.amplitudes() {
        writer.write_all(&amplitude.re.to_le_bytes())?;
        writer.write_all(&amplitude.im.to_le_bytes())?;
    }

    Ok(())
}

/// Write a statevector blob to a file
pub fn save_statevector_to_file(path: impl AsRef<Path>, state: &QuantumState) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    save_statevector(&mut writer, state)?;
    writer.flush()?;
    Ok(())
}

fn read_f64<R: Read>(reader: &mut R) -> Result<f64> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes)?;
    Ok(f64::from_le_bytes(bytes))
}

/// Read a statevector blob from any source
pub fn load_statevector<R: Read>(mut reader: R) -> Result<QuantumState> {
    let mut magic = [0u8; 8];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(IoError::MalformedStatevector("bad magic bytes".to_string()));
    }

    let mut header = [0u8; 8];
    reader.read_exact(&mut header)?;
    let n_qubits = u64::from_le_bytes(header) as usize;
    if n_qubits == 0 || n_qubits > MAX_QUBITS {
        return Err(IoError::MalformedStatevector(format!(
            "qubit count {n_qubits} outside 1..={MAX_QUBITS}"
        )));
    }

    let dimension = 1usize << n_qubits;
    let mut amplitudes = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let re = read_f64(&mut reader)?;
        let im = read_f64(&mut reader)?;
        amplitudes.push(Complex64::new(re, im));
    }

    let mut trailing = [0u8; 1];
    if reader.read(&mut trailing)? != 0 {
        return Err(IoError::MalformedStatevector("trailing bytes after amplitudes".to_string()));
    }

    Ok(QuantumState::from_amplitudes(amplitudes)?)
}

/// Read a statevector blob from a file
pub fn load_statevector_from_file(path: impl AsRef<Path>) -> Result<QuantumState> {
    let file = File::open(path)?;
    load_statevector(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvec_core::Endian;

    #[test]
    fn round_trip_is_bit_exact() {
        let state = QuantumState::from_amplitudes(vec![
            Complex64::new(0.5, 0.1),
            Complex64::new(-0.5, 0.1),
            Complex64::new(0.1, 0.6855654600401044),
            Complex64::new(0.0, 0.0),
        ])
        .unwrap();

        let mut blob = Vec::new();
        save_statevector(&mut blob, &state).unwrap();
        let loaded = load_statevector(blob.as_slice()).unwrap();

        assert_eq!(loaded.n_qubits(), state.n_qubits());
        for (original, reloaded) in state.amplitudes().iter().zip(loaded.amplitudes()) {
            assert_eq!(original.re.to_bits(), reloaded.re.to_bits());
            assert_eq!(original.im.to_bits(), reloaded.im.to_bits());
        }
    }

    #[test]
    fn round_trip_through_a_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("statevector.dat0");

        let state = QuantumState::from_bitstring("101", Endian::Little).unwrap();
        save_statevector_to_file(&path, &state).unwrap();
        let loaded = load_statevector_from_file(&path).unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn bad_magic_and_truncation_are_rejected() {
        let state = QuantumState::new(1).unwrap();
        let mut blob = Vec::new();
        save_statevector(&mut blob, &state).unwrap();

        let mut corrupted = blob.clone();
        corrupted[0] = b'x';
        assert!(matches!(
            load_statevector(corrupted.as_slice()).unwrap_err(),
            IoError::MalformedStatevector(_)
        ));

        let truncated = &blob[..blob.len() - 4];
        assert!(matches!(load_statevector(truncated).unwrap_err(), IoError::Io(_)));

        let mut padded = blob;
        padded.push(0);
        assert!(matches!(
            load_statevector(padded.as_slice()).unwrap_err(),
            IoError::MalformedStatevector(_)
        ));
    }
}
