//! The closed gate catalog
//!
//! [`Gate`] is the instruction form stored in circuits: each variant carries
//! exactly the payload its kind needs. [`GateKind`] is the payload-free tag
//! used by the catalog predicates and by code that dispatches on kind alone.

use smallvec::{smallvec, SmallVec};
use std::fmt;

/// A gate instruction with its per-kind arguments
///
/// `U` and `CU` do not carry their matrix inline; they reference the
/// enclosing circuit's matrix pool by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Hadamard
    H { target: usize },
    /// Pauli-X
    X { target: usize },
    /// Pauli-Y
    Y { target: usize },
    /// Pauli-Z
    Z { target: usize },
    /// Square root of Pauli-X
    SX { target: usize },
    /// Rotation about the X axis
    RX { target: usize, angle: f64 },
    /// Rotation about the Y axis
    RY { target: usize, angle: f64 },
    /// Rotation about the Z axis
    RZ { target: usize, angle: f64 },
    /// Phase gate
    P { target: usize, angle: f64 },
    /// Controlled Hadamard
    CH { control: usize, target: usize },
    /// Controlled Pauli-X
    CX { control: usize, target: usize },
    /// Controlled Pauli-Y
    CY { control: usize, target: usize },
    /// Controlled Pauli-Z
    CZ { control: usize, target: usize },
    /// Controlled square root of Pauli-X
    CSX { control: usize, target: usize },
    /// Controlled X rotation
    CRX { control: usize, target: usize, angle: f64 },
    /// Controlled Y rotation
    CRY { control: usize, target: usize, angle: f64 },
    /// Controlled Z rotation
    CRZ { control: usize, target: usize, angle: f64 },
    /// Controlled phase
    CP { control: usize, target: usize, angle: f64 },
    /// Generic unitary; `matrix_index` points into the circuit's pool
    U { target: usize, matrix_index: usize },
    /// Controlled generic unitary
    CU { control: usize, target: usize, matrix_index: usize },
    /// Measurement of a qubit into a classical bit
    M { qubit: usize, bit: usize },
}

/// The payload-free kind tag of a [`Gate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    SX,
    RX,
    RY,
    RZ,
    P,
    CH,
    CX,
    CY,
    CZ,
    CSX,
    CRX,
    CRY,
    CRZ,
    CP,
    U,
    CU,
    M,
}

impl GateKind {
    /// One target, no parameter: H, X, Y, Z, SX
    pub const fn is_one_target_transform(self) -> bool {
        matches!(self, Self::H | Self::X | Self::Y | Self::Z | Self::SX)
    }

    /// One target, one angle: RX, RY, RZ, P
    pub const fn is_one_target_one_angle_transform(self) -> bool {
        matches!(self, Self::RX | Self::RY | Self::RZ | Self::P)
    }

    /// One control and one target, no parameter: CH, CX, CY, CZ, CSX
    pub const fn is_one_control_one_target_transform(self) -> bool {
        matches!(self, Self::CH | Self::CX | Self::CY | Self::CZ | Self::CSX)
    }

    /// One control, one target, one angle: CRX, CRY, CRZ, CP
    pub const fn is_one_control_one_target_one_angle_transform(self) -> bool {
        matches!(self, Self::CRX | Self::CRY | Self::CRZ | Self::CP)
    }

    /// Acts on a single qubit (includes U, excludes M)
    pub const fn is_single_qubit_transform(self) -> bool {
        self.is_one_target_transform()
            || self.is_one_target_one_angle_transform()
            || matches!(self, Self::U)
    }

    /// Acts on a control/target qubit pair (includes CU)
    pub const fn is_double_qubit_transform(self) -> bool {
        self.is_one_control_one_target_transform()
            || self.is_one_control_one_target_one_angle_transform()
            || matches!(self, Self::CU)
    }

    /// Transform without an angle parameter
    pub const fn is_non_angle_transform(self) -> bool {
        self.is_one_target_transform() || self.is_one_control_one_target_transform()
    }

    /// Transform parametrized by an angle
    pub const fn is_angle_transform(self) -> bool {
        self.is_one_target_one_angle_transform()
            || self.is_one_control_one_target_one_angle_transform()
    }

    /// Gate the simulator supports directly, without decomposition
    pub const fn is_primitive(self) -> bool {
        self.is_non_angle_transform() || self.is_angle_transform()
    }

    /// The catalog name of the kind
    pub const fn name(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::SX => "SX",
            Self::RX => "RX",
            Self::RY => "RY",
            Self::RZ => "RZ",
            Self::P => "P",
            Self::CH => "CH",
            Self::CX => "CX",
            Self::CY => "CY",
            Self::CZ => "CZ",
            Self::CSX => "CSX",
            Self::CRX => "CRX",
            Self::CRY => "CRY",
            Self::CRZ => "CRZ",
            Self::CP => "CP",
            Self::U => "U",
            Self::CU => "CU",
            Self::M => "M",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Gate {
    /// The kind tag of this gate
    pub const fn kind(&self) -> GateKind {
        match self {
            Gate::H { .. } => GateKind::H,
            Gate::X { .. } => GateKind::X,
            Gate::Y { .. } => GateKind::Y,
            Gate::Z { .. } => GateKind::Z,
            Gate::SX { .. } => GateKind::SX,
            Gate::RX { .. } => GateKind::RX,
            Gate::RY { .. } => GateKind::RY,
            Gate::RZ { .. } => GateKind::RZ,
            Gate::P { .. } => GateKind::P,
            Gate::CH { .. } => GateKind::CH,
            Gate::CX { .. } => GateKind::CX,
            Gate::CY { .. } => GateKind::CY,
            Gate::CZ { .. } => GateKind::CZ,
            Gate::CSX { .. } => GateKind::CSX,
            Gate::CRX { .. } => GateKind::CRX,
            Gate::CRY { .. } => GateKind::CRY,
            Gate::CRZ { .. } => GateKind::CRZ,
            Gate::CP { .. } => GateKind::CP,
            Gate::U { .. } => GateKind::U,
            Gate::CU { .. } => GateKind::CU,
            Gate::M { .. } => GateKind::M,
        }
    }

    /// The target qubit of a single- or double-qubit transform
    ///
    /// For M this is the measured qubit.
    pub const fn target(&self) -> usize {
        match *self {
            Gate::H { target }
            | Gate::X { target }
            | Gate::Y { target }
            | Gate::Z { target }
            | Gate::SX { target }
            | Gate::RX { target, .. }
            | Gate::RY { target, .. }
            | Gate::RZ { target, .. }
            | Gate::P { target, .. }
            | Gate::CH { target, .. }
            | Gate::CX { target, .. }
            | Gate::CY { target, .. }
            | Gate::CZ { target, .. }
            | Gate::CSX { target, .. }
            | Gate::CRX { target, .. }
            | Gate::CRY { target, .. }
            | Gate::CRZ { target, .. }
            | Gate::CP { target, .. }
            | Gate::U { target, .. }
            | Gate::CU { target, .. } => target,
            Gate::M { qubit, .. } => qubit,
        }
    }

    /// The control qubit, if this gate has one
    pub const fn control(&self) -> Option<usize> {
        match *self {
            Gate::CH { control, .. }
            | Gate::CX { control, .. }
            | Gate::CY { control, .. }
            | Gate::CZ { control, .. }
            | Gate::CSX { control, .. }
            | Gate::CRX { control, .. }
            | Gate::CRY { control, .. }
            | Gate::CRZ { control, .. }
            | Gate::CP { control, .. }
            | Gate::CU { control, .. } => Some(control),
            _ => None,
        }
    }

    /// The rotation or phase angle, if this gate has one
    pub const fn angle(&self) -> Option<f64> {
        match *self {
            Gate::RX { angle, .. }
            | Gate::RY { angle, .. }
            | Gate::RZ { angle, .. }
            | Gate::P { angle, .. }
            | Gate::CRX { angle, .. }
            | Gate::CRY { angle, .. }
            | Gate::CRZ { angle, .. }
            | Gate::CP { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// The matrix-pool index of a U/CU gate
    pub const fn matrix_index(&self) -> Option<usize> {
        match *self {
            Gate::U { matrix_index, .. } | Gate::CU { matrix_index, .. } => Some(matrix_index),
            _ => None,
        }
    }

    /// Every qubit index this gate touches
    ///
    /// Most gates touch one or two qubits, so the list stays on the stack.
    pub fn qubits(&self) -> SmallVec<[usize; 2]> {
        match self.control() {
            Some(control) => smallvec![control, self.target()],
            None => smallvec![self.target()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_predicates_partition_the_catalog() {
        let one_target = [GateKind::H, GateKind::X, GateKind::Y, GateKind::Z, GateKind::SX];
        let one_target_one_angle = [GateKind::RX, GateKind::RY, GateKind::RZ, GateKind::P];
        let controlled = [GateKind::CH, GateKind::CX, GateKind::CY, GateKind::CZ, GateKind::CSX];
        let controlled_angle = [GateKind::CRX, GateKind::CRY, GateKind::CRZ, GateKind::CP];

        for kind in one_target {
            assert!(kind.is_one_target_transform());
            assert!(kind.is_single_qubit_transform());
            assert!(kind.is_primitive());
            assert!(!kind.is_double_qubit_transform());
        }
        for kind in one_target_one_angle {
            assert!(kind.is_one_target_one_angle_transform());
            assert!(kind.is_angle_transform());
            assert!(kind.is_primitive());
        }
        for kind in controlled {
            assert!(kind.is_one_control_one_target_transform());
            assert!(kind.is_double_qubit_transform());
            assert!(kind.is_non_angle_transform());
        }
        for kind in controlled_angle {
            assert!(kind.is_one_control_one_target_one_angle_transform());
            assert!(kind.is_double_qubit_transform());
            assert!(kind.is_primitive());
        }

        assert!(GateKind::U.is_single_qubit_transform());
        assert!(GateKind::CU.is_double_qubit_transform());
        for kind in [GateKind::U, GateKind::CU, GateKind::M] {
            assert!(!kind.is_primitive());
        }
    }

    #[test]
    fn gate_accessors() {
        let gate = Gate::CRX { control: 1, target: 3, angle: 0.25 };
        assert_eq!(gate.kind(), GateKind::CRX);
        assert_eq!(gate.target(), 3);
        assert_eq!(gate.control(), Some(1));
        assert_eq!(gate.angle(), Some(0.25));
        assert_eq!(gate.matrix_index(), None);
        assert_eq!(gate.qubits().as_slice(), &[1, 3]);

        let measure = Gate::M { qubit: 2, bit: 0 };
        assert_eq!(measure.target(), 2);
        assert_eq!(measure.qubits().as_slice(), &[2]);
    }

    #[test]
    fn kind_names_round_trip_through_display() {
        assert_eq!(GateKind::CSX.to_string(), "CSX");
        assert_eq!(GateKind::M.to_string(), "M");
    }
}
