//! # dust_math - Simulation Math
//!
//! Small, copyable math primitives used by the collision resolver, the
//! character controller and the projectile pool.

pub mod axis;
pub mod bounds;
pub mod vector;

pub use axis::*;
pub use bounds::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const FRAC_PI_2: f32 = PI / 2.0;
}

pub mod prelude {
    pub use crate::axis::{Axis, AxisDir};
    pub use crate::bounds::AABB;
    pub use crate::vector::Vec3;
}
