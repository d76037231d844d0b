//! Canonical matrices for the primitive gate catalog
//!
//! All conventions follow Qiskit: RX(θ) = cos(θ/2)·I − i·sin(θ/2)·X, and so
//! on for the other rotations; P(θ) applies e^{iθ} to |1⟩.

use crate::gate::GateKind;
use crate::matrix::Matrix2x2;
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);

/// Hadamard
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub fn h_gate() -> Matrix2x2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    Matrix2x2::new(h, h, h, -h)
}

/// Pauli-X
/// X = [[0, 1],
///      [1, 0]]
pub fn x_gate() -> Matrix2x2 {
    Matrix2x2::new(ZERO, ONE, ONE, ZERO)
}

/// Pauli-Y
/// Y = [[0, -i],
///      [i,  0]]
pub fn y_gate() -> Matrix2x2 {
    Matrix2x2::new(ZERO, NEG_I, I, ZERO)
}

/// Pauli-Z
/// Z = [[1,  0],
///      [0, -1]]
pub fn z_gate() -> Matrix2x2 {
    Matrix2x2::new(ONE, ZERO, ZERO, NEG_ONE)
}

/// Square root of Pauli-X
/// SX = 1/2 * [[1+i, 1-i],
///             [1-i, 1+i]]
pub fn sx_gate() -> Matrix2x2 {
    let p = Complex64::new(0.5, 0.5);
    let m = Complex64::new(0.5, -0.5);
    Matrix2x2::new(p, m, m, p)
}

/// Rotation about X
/// RX(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)]]
pub fn rx_gate(theta: f64) -> Matrix2x2 {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let neg_i_sin = Complex64::new(0.0, -(theta / 2.0).sin());
    Matrix2x2::new(cos, neg_i_sin, neg_i_sin, cos)
}

/// Rotation about Y
/// RY(θ) = [[cos(θ/2), -sin(θ/2)],
///          [sin(θ/2),  cos(θ/2)]]
pub fn ry_gate(theta: f64) -> Matrix2x2 {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let sin = Complex64::new((theta / 2.0).sin(), 0.0);
    Matrix2x2::new(cos, -sin, sin, cos)
}

/// Rotation about Z
/// RZ(θ) = [[e^(-iθ/2), 0        ],
///          [0,         e^(iθ/2)]]
pub fn rz_gate(theta: f64) -> Matrix2x2 {
    let phase = Complex64::from_polar(1.0, theta / 2.0);
    Matrix2x2::new(phase.conj(), ZERO, ZERO, phase)
}

/// Phase gate
/// P(θ) = [[1, 0      ],
///         [0, e^(iθ)]]
pub fn p_gate(theta: f64) -> Matrix2x2 {
    Matrix2x2::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, theta))
}

/// The target-action matrix of a parameter-free transform gate
///
/// Controlled kinds map to the matrix applied on their target, so CX yields
/// the X matrix.
///
/// # Panics
/// Panics if `kind` is not a non-angle transform gate.
pub fn non_angle_gate(kind: GateKind) -> Matrix2x2 {
    match kind {
        GateKind::H | GateKind::CH => h_gate(),
        GateKind::X | GateKind::CX => x_gate(),
        GateKind::Y | GateKind::CY => y_gate(),
        GateKind::Z | GateKind::CZ => z_gate(),
        GateKind::SX | GateKind::CSX => sx_gate(),
        _ => unreachable!("{kind} is not a non-angle transform gate"),
    }
}

/// The target-action matrix of an angle-parametrized transform gate
///
/// # Panics
/// Panics if `kind` is not an angle transform gate.
pub fn angle_gate(kind: GateKind, theta: f64) -> Matrix2x2 {
    match kind {
        GateKind::RX | GateKind::CRX => rx_gate(theta),
        GateKind::RY | GateKind::CRY => ry_gate(theta),
        GateKind::RZ | GateKind::CRZ => rz_gate(theta),
        GateKind::P | GateKind::CP => p_gate(theta),
        _ => unreachable!("{kind} is not an angle transform gate"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::COMPLEX_ALMOST_EQ_TOLERANCE_SQ;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn named_gates_are_unitary() {
        for matrix in [h_gate(), x_gate(), y_gate(), z_gate(), sx_gate()] {
            assert!(matrix.is_unitary(COMPLEX_ALMOST_EQ_TOLERANCE_SQ));
        }
    }

    #[test]
    fn angle_gates_are_unitary_across_angles() {
        for i in 0..16 {
            let theta = -2.0 * PI + (i as f64) * 0.25 * PI;
            for matrix in [rx_gate(theta), ry_gate(theta), rz_gate(theta), p_gate(theta)] {
                assert!(matrix.is_unitary(COMPLEX_ALMOST_EQ_TOLERANCE_SQ));
            }
        }
    }

    #[test]
    fn hadamard_squares_to_identity() {
        assert!((h_gate() * h_gate()).almost_eq(&Matrix2x2::identity()));
    }

    #[test]
    fn sx_squares_to_x() {
        assert!((sx_gate() * sx_gate()).almost_eq(&x_gate()));
    }

    #[test]
    fn rx_at_zero_is_identity() {
        assert!(rx_gate(0.0).almost_eq(&Matrix2x2::identity()));
    }

    #[test]
    fn rx_at_pi_is_minus_i_x() {
        let rx = rx_gate(PI);
        assert_relative_eq!(rx.elem01.im, -1.0, epsilon = 1e-12);
        assert_relative_eq!(rx.elem10.im, -1.0, epsilon = 1e-12);
        assert_relative_eq!(rx.elem00.re, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn p_at_pi_is_z() {
        assert!(p_gate(PI).almost_eq(&z_gate()));
    }

    #[test]
    fn rz_diagonal_phases() {
        let rz = rz_gate(PI / 2.0);
        assert_relative_eq!(rz.elem00.re, (PI / 4.0).cos(), epsilon = 1e-12);
        assert_relative_eq!(rz.elem00.im, -(PI / 4.0).sin(), epsilon = 1e-12);
        assert_relative_eq!(rz.elem11.im, (PI / 4.0).sin(), epsilon = 1e-12);
    }

    #[test]
    fn controlled_kinds_share_target_matrices() {
        assert!(non_angle_gate(GateKind::CX).almost_eq(&x_gate()));
        assert!(angle_gate(GateKind::CRY, 0.3).almost_eq(&ry_gate(0.3)));
    }
}
