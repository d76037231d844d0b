//! Probability extraction from a quantum state
//!
//! Probabilities are the squared magnitudes of the amplitudes; no
//! renormalization is applied anywhere in this module.

use crate::error::{Result, StateError};
use crate::state::QuantumState;
use ahash::AHashMap;
use qvec_core::bits::{is_valid_marginal_bitstring, state_index_to_bitstring};
use qvec_core::{Endian, QuantumError, MARGINALIZED_QUBIT};

/// The probability of each basis state, indexed little-endian
pub fn probabilities_raw(state: &QuantumState) -> Vec<f64> {
    state.amplitudes().iter().map(|a| a.norm_sqr()).collect()
}

/// The probability of each basis state, keyed by bitstring
///
/// Every basis state appears in the map, including those with probability
/// zero. Keys are rendered under the requested endianness.
pub fn probabilities(state: &QuantumState, endian: Endian) -> AHashMap<String, f64> {
    let n_qubits = state.n_qubits();
    state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(index, amp)| {
            let bitstring = state_index_to_bitstring(index, n_qubits, endian)
                .unwrap_or_else(|_| unreachable!("amplitude index within dimension"));
            (bitstring, amp.norm_sqr())
        })
        .collect()
}

/// The total probability of every basis state matching a marginal bitstring
///
/// The bitstring may contain `'_'` for qubits to marginalize over; fixed
/// positions must match exactly.
///
/// # Errors
/// Fails if the string contains characters outside {'0','1','_'} or its
/// length differs from the qubit count.
pub fn marginal_probability(
    state: &QuantumState,
    bitstring: &str,
    endian: Endian,
) -> Result<f64> {
    if !is_valid_marginal_bitstring(bitstring) {
        return Err(StateError::Conversion(QuantumError::MalformedBitstring(
            bitstring.to_string(),
        )));
    }

    let n_qubits = state.n_qubits();
    if bitstring.len() != n_qubits {
        return Err(StateError::DimensionMismatch {
            expected: n_qubits,
            actual: bitstring.len(),
        });
    }

    // (qubit index, required bit) for every non-marginalized position
    let fixed: Vec<(usize, usize)> = bitstring
        .chars()
        .enumerate()
        .filter(|&(_, c)| c != MARGINALIZED_QUBIT)
        .map(|(position, c)| {
            let qubit = match endian {
                Endian::Little => position,
                Endian::Big => n_qubits - position - 1,
            };
            (qubit, usize::from(c == '1'))
        })
        .collect();

    let total = state
        .amplitudes()
        .iter()
        .enumerate()
        .filter(|&(index, _)| fixed.iter().all(|&(qubit, bit)| (index >> qubit) & 1 == bit))
        .map(|(_, amp)| amp.norm_sqr())
        .sum();

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn raw_probabilities_of_basis_states() {
        for index in 0..4 {
            let state = QuantumState::from_basis_index(index, 2).unwrap();
            let probs = probabilities_raw(&state);
            for (i, p) in probs.iter().enumerate() {
                let expected = if i == index { 1.0 } else { 0.0 };
                assert_relative_eq!(*p, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn raw_probabilities_mix_real_and_imaginary_parts() {
        let state = QuantumState::from_amplitudes(vec![
            Complex64::new(0.6, 0.8),
            Complex64::new(0.0, 0.0),
        ])
        .unwrap();
        let probs = probabilities_raw(&state);
        assert_relative_eq!(probs[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(probs[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn keyed_probabilities_include_zero_entries() {
        let state = QuantumState::from_bitstring("10", Endian::Little).unwrap();
        let probs = probabilities(&state, Endian::Little);

        assert_eq!(probs.len(), 4);
        assert_relative_eq!(probs["10"], 1.0, epsilon = 1e-12);
        assert_relative_eq!(probs["00"], 0.0, epsilon = 1e-12);
        assert_relative_eq!(probs["01"], 0.0, epsilon = 1e-12);
        assert_relative_eq!(probs["11"], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn keyed_probabilities_follow_the_requested_endianness() {
        // amplitude on index 1 = qubit 0 set
        let state = QuantumState::from_basis_index(1, 2).unwrap();

        let little = probabilities(&state, Endian::Little);
        assert_relative_eq!(little["10"], 1.0, epsilon = 1e-12);

        let big = probabilities(&state, Endian::Big);
        assert_relative_eq!(big["01"], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn marginal_probability_sums_over_marginalized_qubits() {
        // (|00⟩ + |11⟩)/√2 over indices 0 and 3
        let amp = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let state = QuantumState::from_amplitudes(vec![amp, zero, zero, amp]).unwrap();

        // qubit 1 fixed to 1, qubit 0 marginalized
        let p = marginal_probability(&state, "_1", Endian::Little).unwrap();
        assert_relative_eq!(p, 0.5, epsilon = 1e-12);

        let p = marginal_probability(&state, "__", Endian::Little).unwrap();
        assert_relative_eq!(p, 1.0, epsilon = 1e-12);

        let p = marginal_probability(&state, "11", Endian::Little).unwrap();
        assert_relative_eq!(p, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn marginal_probability_validates_its_input() {
        let state = QuantumState::new(2).unwrap();
        assert!(marginal_probability(&state, "0x", Endian::Little).is_err());
        assert!(matches!(
            marginal_probability(&state, "0", Endian::Little),
            Err(StateError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }
}
