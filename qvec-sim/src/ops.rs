//! In-place amplitude updates over a single index pair
//!
//! Each function touches exactly the indices it is handed; the pair
//! generators guarantee disjoint coverage. The cheap specializations (swap,
//! superpose, turn, phase) avoid the full 2x2 multiply for the gates that
//! do not need it.

use num_complex::Complex64;
use qvec_core::Matrix2x2;

/// Pauli-X action: exchange the two amplitudes
#[inline]
pub fn swap_amplitudes(amplitudes: &mut [Complex64], i0: usize, i1: usize) {
    amplitudes.swap(i0, i1);
}

/// Hadamard action: (a, b) → ((a+b)/√2, (a−b)/√2)
#[inline]
pub fn superpose_amplitudes(amplitudes: &mut [Complex64], i0: usize, i1: usize) {
    let a = amplitudes[i0];
    let b = amplitudes[i1];
    amplitudes[i0] = std::f64::consts::FRAC_1_SQRT_2 * (a + b);
    amplitudes[i1] = std::f64::consts::FRAC_1_SQRT_2 * (a - b);
}

/// RX(θ) action: rotate the pair by [[cos, −i·sin], [−i·sin, cos]] at θ/2
#[inline]
pub fn turn_amplitudes(amplitudes: &mut [Complex64], i0: usize, i1: usize, theta: f64) {
    let cos = (theta / 2.0).cos();
    let sin = (theta / 2.0).sin();
    let a = amplitudes[i0];
    let b = amplitudes[i1];

    amplitudes[i0] = Complex64::new(a.re * cos + b.im * sin, a.im * cos - b.re * sin);
    amplitudes[i1] = Complex64::new(b.re * cos + a.im * sin, b.im * cos - a.re * sin);
}

/// Phase action on the |1⟩ half of the pair: amplitude ← amplitude·e^{iθ}
#[inline]
pub fn phase_amplitude(amplitudes: &mut [Complex64], i1: usize, theta: f64) {
    amplitudes[i1] *= Complex64::from_polar(1.0, theta);
}

/// Pauli-Z action on the |1⟩ half of the pair
#[inline]
pub fn negate_amplitude(amplitudes: &mut [Complex64], i1: usize) {
    amplitudes[i1] = -amplitudes[i1];
}

/// Generic 2x2 action on a pair
///
/// With a = amplitudes\[i0\] and b = amplitudes\[i1\]:
/// amplitudes\[i0\] = M00·a + M01·b, amplitudes\[i1\] = M10·a + M11·b.
#[inline]
pub fn general_gate_transform(
    amplitudes: &mut [Complex64],
    i0: usize,
    i1: usize,
    matrix: &Matrix2x2,
) {
    let a = amplitudes[i0];
    let b = amplitudes[i1];
    amplitudes[i0] = matrix.elem00 * a + matrix.elem01 * b;
    amplitudes[i1] = matrix.elem10 * a + matrix.elem11 * b;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qvec_core::matrices::{h_gate, rx_gate};
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    fn basis_pair() -> Vec<Complex64> {
        vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]
    }

    #[test]
    fn swap_exchanges_amplitudes() {
        let mut amps = basis_pair();
        swap_amplitudes(&mut amps, 0, 1);
        assert_relative_eq!(amps[0].re, 0.0);
        assert_relative_eq!(amps[1].re, 1.0);
    }

    #[test]
    fn superpose_matches_the_hadamard_matrix() {
        let mut fast = basis_pair();
        superpose_amplitudes(&mut fast, 0, 1);

        let mut general = basis_pair();
        general_gate_transform(&mut general, 0, 1, &h_gate());

        for (f, g) in fast.iter().zip(&general) {
            assert_relative_eq!(f.re, g.re, epsilon = 1e-12);
            assert_relative_eq!(f.im, g.im, epsilon = 1e-12);
        }
        assert_relative_eq!(fast[0].re, FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn turn_matches_the_rx_matrix() {
        for theta in [0.0, 0.3, PI / 2.0, PI, 2.5 * PI] {
            let mut fast = vec![Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)];
            turn_amplitudes(&mut fast, 0, 1, theta);

            let mut general = vec![Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)];
            general_gate_transform(&mut general, 0, 1, &rx_gate(theta));

            for (f, g) in fast.iter().zip(&general) {
                assert_relative_eq!(f.re, g.re, epsilon = 1e-12);
                assert_relative_eq!(f.im, g.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn phase_touches_only_the_one_half() {
        let mut amps = vec![Complex64::new(0.6, 0.0), Complex64::new(0.8, 0.0)];
        phase_amplitude(&mut amps, 1, PI / 2.0);
        assert_relative_eq!(amps[0].re, 0.6, epsilon = 1e-12);
        assert_relative_eq!(amps[1].re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(amps[1].im, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn negate_flips_the_sign() {
        let mut amps = vec![Complex64::new(0.0, 0.0), Complex64::new(0.5, -0.5)];
        negate_amplitude(&mut amps, 1);
        assert_relative_eq!(amps[1].re, -0.5);
        assert_relative_eq!(amps[1].im, 0.5);
    }
}
