//! 2x2 complex matrix algebra for single-qubit unitaries

use num_complex::Complex64;
use std::ops::{Add, Mul};

/// Default squared tolerance for complex and matrix comparisons
pub const COMPLEX_ALMOST_EQ_TOLERANCE_SQ: f64 = 1.0e-6;

/// Compare two complex numbers within a squared-magnitude tolerance
#[inline]
pub fn complex_almost_eq(left: Complex64, right: Complex64, tolerance_sq: f64) -> bool {
    (left - right).norm_sqr() < tolerance_sq
}

/// A dense 2x2 complex matrix
///
/// When used as a gate the matrix is expected to be unitary within the
/// comparison tolerance; [`Matrix2x2::is_unitary`] checks this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2x2 {
    /// Top-left entry
    pub elem00: Complex64,
    /// Top-right entry
    pub elem01: Complex64,
    /// Bottom-left entry
    pub elem10: Complex64,
    /// Bottom-right entry
    pub elem11: Complex64,
}

impl Matrix2x2 {
    /// Construct a matrix from its four entries in row-major order
    pub const fn new(
        elem00: Complex64,
        elem01: Complex64,
        elem10: Complex64,
        elem11: Complex64,
    ) -> Self {
        Self { elem00, elem01, elem10, elem11 }
    }

    /// The 2x2 identity matrix
    pub const fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Conjugate transpose (adjoint)
    pub fn conjugate_transpose(&self) -> Self {
        Self::new(
            self.elem00.conj(),
            self.elem10.conj(),
            self.elem01.conj(),
            self.elem11.conj(),
        )
    }

    /// Determinant
    pub fn determinant(&self) -> Complex64 {
        self.elem00 * self.elem11 - self.elem01 * self.elem10
    }

    /// Trace
    pub fn trace(&self) -> Complex64 {
        self.elem00 + self.elem11
    }

    /// Principal square root via the closed form for 2x2 matrices
    ///
    /// With trace τ and determinant δ, s = √δ and t = √(τ + 2s); the root is
    /// (M + sI) / t. Both square roots take the principal branch.
    pub fn square_root(&self) -> Self {
        let s = self.determinant().sqrt();
        let t = (self.trace() + 2.0 * s).sqrt();

        Self::new(
            (self.elem00 + s) / t,
            self.elem01 / t,
            self.elem10 / t,
            (self.elem11 + s) / t,
        )
    }

    /// Element-wise comparison within a squared-magnitude tolerance
    pub fn almost_eq_with(&self, other: &Self, tolerance_sq: f64) -> bool {
        complex_almost_eq(self.elem00, other.elem00, tolerance_sq)
            && complex_almost_eq(self.elem01, other.elem01, tolerance_sq)
            && complex_almost_eq(self.elem10, other.elem10, tolerance_sq)
            && complex_almost_eq(self.elem11, other.elem11, tolerance_sq)
    }

    /// Element-wise comparison with the default tolerance
    pub fn almost_eq(&self, other: &Self) -> bool {
        self.almost_eq_with(other, COMPLEX_ALMOST_EQ_TOLERANCE_SQ)
    }

    /// Check that the adjoint inverts the matrix within tolerance
    pub fn is_unitary(&self, tolerance_sq: f64) -> bool {
        let product = self.conjugate_transpose() * *self;
        product.almost_eq_with(&Self::identity(), tolerance_sq)
    }
}

impl Mul for Matrix2x2 {
    type Output = Matrix2x2;

    fn mul(self, rhs: Matrix2x2) -> Matrix2x2 {
        Matrix2x2::new(
            self.elem00 * rhs.elem00 + self.elem01 * rhs.elem10,
            self.elem00 * rhs.elem01 + self.elem01 * rhs.elem11,
            self.elem10 * rhs.elem00 + self.elem11 * rhs.elem10,
            self.elem10 * rhs.elem01 + self.elem11 * rhs.elem11,
        )
    }
}

impl Add for Matrix2x2 {
    type Output = Matrix2x2;

    fn add(self, rhs: Matrix2x2) -> Matrix2x2 {
        Matrix2x2::new(
            self.elem00 + rhs.elem00,
            self.elem01 + rhs.elem01,
            self.elem10 + rhs.elem10,
            self.elem11 + rhs.elem11,
        )
    }
}
