//! World axes and the six signed directions along them
//!
//! The collision probes and the ground snap only ever look straight along a
//! world axis, so they work on [`AxisDir`] instead of arbitrary rays.

use crate::vector::Vec3;

/// One of the three world axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// The two axes perpendicular to this one
    #[inline]
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

/// A signed world axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisDir {
    pub axis: Axis,
    /// Points towards +axis
    pub positive: bool,
}

impl AxisDir {
    pub const POS_X: Self = Self::new(Axis::X, true);
    pub const NEG_X: Self = Self::new(Axis::X, false);
    pub const POS_Y: Self = Self::new(Axis::Y, true);
    pub const NEG_Y: Self = Self::new(Axis::Y, false);
    pub const POS_Z: Self = Self::new(Axis::Z, true);
    pub const NEG_Z: Self = Self::new(Axis::Z, false);

    /// Horizontal pairs first, then up and down
    pub const ALL: [Self; 6] = [
        Self::POS_X,
        Self::NEG_X,
        Self::POS_Z,
        Self::NEG_Z,
        Self::POS_Y,
        Self::NEG_Y,
    ];

    #[inline]
    pub const fn new(axis: Axis, positive: bool) -> Self {
        Self { axis, positive }
    }

    /// Unit vector of this direction
    pub fn unit(self) -> Vec3 {
        let s = if self.positive { 1.0 } else { -1.0 };
        match self.axis {
            Axis::X => Vec3::new(s, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, s, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, s),
        }
    }

    /// Point reached after travelling `distance` from `origin`
    #[inline]
    pub fn advance(self, origin: Vec3, distance: f32) -> Vec3 {
        origin + self.unit() * distance
    }
}
