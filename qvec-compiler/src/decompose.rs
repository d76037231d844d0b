//! Decomposition of 2x2 unitaries into primitive parametrized gates
//!
//! A matrix is first probed against every single primitive it could be (the
//! named gates, then each rotation family, then the phase gate). Failing
//! that, its determinant phase is stripped and the special-unitary remainder
//! is expressed as an RZ·RY·RZ sequence; the stripped phase comes back as a
//! trailing P gate so the emitted product reproduces the input exactly.

use qvec_core::gate::GateKind;
use qvec_core::matrices::{
    h_gate, p_gate, rx_gate, ry_gate, rz_gate, sx_gate, x_gate, y_gate, z_gate,
};
use qvec_core::{Gate, Matrix2x2};

/// One step of a decomposition: a primitive kind plus its angle, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveGate {
    pub kind: GateKind,
    pub angle: Option<f64>,
}

impl PrimitiveGate {
    fn plain(kind: GateKind) -> Self {
        Self { kind, angle: None }
    }

    fn with_angle(kind: GateKind, angle: f64) -> Self {
        Self { kind, angle: Some(angle) }
    }
}

/// The phase angle of the determinant
fn determinant_angle(matrix: &Matrix2x2) -> f64 {
    let det = matrix.determinant();
    det.im.atan2(det.re)
}

/// Probe the matrix against each primitive gate in catalog order
///
/// Parameter-free gates are preferred: [[1, 0], [0, -1]] decomposes as Z,
/// not as an RZ with a synthesized angle.
fn decompose_to_single_primitive(matrix: &Matrix2x2, tolerance_sq: f64) -> Option<PrimitiveGate> {
    let named = [
        (GateKind::H, h_gate()),
        (GateKind::X, x_gate()),
        (GateKind::Y, y_gate()),
        (GateKind::Z, z_gate()),
        (GateKind::SX, sx_gate()),
    ];
    for (kind, candidate) in named {
        if matrix.almost_eq_with(&candidate, tolerance_sq) {
            return Some(PrimitiveGate::plain(kind));
        }
    }

    // every rotation family has cos(θ/2) as the real part of elem11
    let real_11 = matrix.elem11.re.clamp(-1.0, 1.0);
    let theta = real_11.acos();
    if matrix.almost_eq_with(&rx_gate(2.0 * theta), tolerance_sq) {
        return Some(PrimitiveGate::with_angle(GateKind::RX, 2.0 * theta));
    }
    if matrix.almost_eq_with(&ry_gate(2.0 * theta), tolerance_sq) {
        return Some(PrimitiveGate::with_angle(GateKind::RY, 2.0 * theta));
    }
    if matrix.almost_eq_with(&rz_gate(2.0 * theta), tolerance_sq) {
        return Some(PrimitiveGate::with_angle(GateKind::RZ, 2.0 * theta));
    }

    let phase = matrix.elem11.im.atan2(matrix.elem11.re);
    if matrix.almost_eq_with(&p_gate(phase), tolerance_sq) {
        return Some(PrimitiveGate::with_angle(GateKind::P, phase));
    }

    None
}

/// ZYZ rotations reproducing a special-unitary matrix
///
/// With |M00| = cos θ, λ = arg M00, and μ = arg M01, the gate sequence
/// [RZ(μ−λ), RY(−2θ), RZ(−λ−μ)] multiplies out to M exactly. Terms whose
/// defining magnitude (|λ−μ|, |2θ|, |λ+μ|) stays below the squared
/// tolerance are omitted.
fn decompose_special_unitary(matrix: &Matrix2x2, tolerance_sq: f64) -> Vec<PrimitiveGate> {
    let abs_00 = matrix.elem00.norm().clamp(0.0, 1.0);
    let theta = abs_00.acos();
    let lambda = matrix.elem00.im.atan2(matrix.elem00.re);
    let mu = matrix.elem01.im.atan2(matrix.elem01.re);

    let mut gates = Vec::new();

    if (lambda - mu).abs() > tolerance_sq {
        gates.push(PrimitiveGate::with_angle(GateKind::RZ, mu - lambda));
    }
    if (2.0 * theta).abs() > tolerance_sq {
        gates.push(PrimitiveGate::with_angle(GateKind::RY, -2.0 * theta));
    }
    if (lambda + mu).abs() > tolerance_sq {
        gates.push(PrimitiveGate::with_angle(GateKind::RZ, -(lambda + mu)));
    }

    gates
}

/// Express an arbitrary 2x2 unitary as a sequence of primitive gates
///
/// The returned gates apply in list order; their matrix product (last gate
/// leftmost) equals the input within tolerance.
pub fn decompose_unitary(matrix: &Matrix2x2, tolerance_sq: f64) -> Vec<PrimitiveGate> {
    if let Some(primitive) = decompose_to_single_primitive(matrix, tolerance_sq) {
        return vec![primitive];
    }

    let det_angle = determinant_angle(matrix);
    if det_angle.abs() < tolerance_sq {
        return decompose_special_unitary(matrix, tolerance_sq);
    }

    let special = p_gate(-det_angle) * *matrix;
    let mut gates = decompose_special_unitary(&special, tolerance_sq);
    gates.push(PrimitiveGate::with_angle(GateKind::P, det_angle));
    gates
}

/// Decompose a U gate into one-target primitive gate instructions
pub fn decompose_one_target_gate(
    target: usize,
    matrix: &Matrix2x2,
    tolerance_sq: f64,
) -> Vec<Gate> {
    decompose_unitary(matrix, tolerance_sq)
        .into_iter()
        .map(|primitive| match (primitive.kind, primitive.angle) {
            (GateKind::H, _) => Gate::H { target },
            (GateKind::X, _) => Gate::X { target },
            (GateKind::Y, _) => Gate::Y { target },
            (GateKind::Z, _) => Gate::Z { target },
            (GateKind::SX, _) => Gate::SX { target },
            (GateKind::RX, Some(angle)) => Gate::RX { target, angle },
            (GateKind::RY, Some(angle)) => Gate::RY { target, angle },
            (GateKind::RZ, Some(angle)) => Gate::RZ { target, angle },
            (GateKind::P, Some(angle)) => Gate::P { target, angle },
            (kind, angle) => unreachable!("decomposition produced {kind} with angle {angle:?}"),
        })
        .collect()
}

/// Decompose a CU gate into one-control-one-target primitive instructions
pub fn decompose_one_control_one_target_gate(
    control: usize,
    target: usize,
    matrix: &Matrix2x2,
    tolerance_sq: f64,
) -> Vec<Gate> {
    decompose_unitary(matrix, tolerance_sq)
        .into_iter()
        .map(|primitive| match (primitive.kind, primitive.angle) {
            (GateKind::H, _) => Gate::CH { control, target },
            (GateKind::X, _) => Gate::CX { control, target },
            (GateKind::Y, _) => Gate::CY { control, target },
            (GateKind::Z, _) => Gate::CZ { control, target },
            (GateKind::SX, _) => Gate::CSX { control, target },
            (GateKind::RX, Some(angle)) => Gate::CRX { control, target, angle },
            (GateKind::RY, Some(angle)) => Gate::CRY { control, target, angle },
            (GateKind::RZ, Some(angle)) => Gate::CRZ { control, target, angle },
            (GateKind::P, Some(angle)) => Gate::CP { control, target, angle },
            (kind, angle) => unreachable!("decomposition produced {kind} with angle {angle:?}"),
        })
        .collect()
}
