//! Axis-aligned boxes
//!
//! Every collidable in the level is flattened to one of these. Boxes rotated
//! about +Y are refitted with [`AABB::rotate_y`], which over-covers the
//! corners of the original box.

use crate::axis::AxisDir;
use crate::vector::Vec3;

/// Axis-aligned bounding box, `min` and `max` inclusive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extents
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grow by `amount` on every side
    #[inline]
    pub fn expand(&self, amount: f32) -> Self {
        let margin = Vec3::splat(amount);
        Self::new(self.min - margin, self.max + margin)
    }

    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }

    /// Box around this one after rotating it by `angle` about the world Y axis
    pub fn rotate_y(&self, angle: f32) -> Self {
        let (lo, hi) = (self.min, self.max);
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for x in [lo.x, hi.x] {
            for z in [lo.z, hi.z] {
                let turned = Vec3::new(x, 0.0, z).rotate_y(angle);
                min = min.min(turned);
                max = max.max(turned);
            }
        }
        Self::new(Vec3::new(min.x, lo.y, min.z), Vec3::new(max.x, hi.y, max.z))
    }

    /// Distance from `origin` along `dir` to the first point of the box
    ///
    /// `Some(0.0)` when `origin` is inside. `None` when the line along `dir`
    /// passes beside the box or the box lies behind `origin`.
    pub fn axis_distance(&self, origin: Vec3, dir: AxisDir) -> Option<f32> {
        for side in dir.axis.others() {
            let v = side.of(origin);
            if v < side.of(self.min) || v > side.of(self.max) {
                return None;
            }
        }

        let at = dir.axis.of(origin);
        let (lo, hi) = (dir.axis.of(self.min), dir.axis.of(self.max));
        if (lo..=hi).contains(&at) {
            return Some(0.0);
        }
        match dir.positive {
            true if at < lo => Some(lo - at),
            false if at > hi => Some(at - hi),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 1.5 crate standing on the ground at the origin
    fn crate_box() -> AABB {
        AABB::from_center_half_extents(Vec3::new(0.0, 0.75, 0.0), Vec3::splat(0.75))
    }

    #[test]
    fn test_contact_margin_catches_capsule_edge() {
        let margin = crate_box().expand(0.6);
        // Capsule ring point 1.2 from the crate center: within 0.75 + 0.6
        assert!(margin.contains_point(Vec3::new(1.2, 0.5, 0.0)));
        assert!(!crate_box().contains_point(Vec3::new(1.2, 0.5, 0.0)));
        assert!(!margin.contains_point(Vec3::new(1.4, 0.5, 0.0)));
    }

    #[test]
    fn test_quarter_turn_swaps_wall_footprint() {
        // 10 wide, 2 deep wall turned to run along Z
        let wall = AABB::from_center_half_extents(Vec3::new(0.0, 4.0, 0.0), Vec3::new(5.0, 4.0, 1.0));
        let turned = wall.rotate_y(core::f32::consts::FRAC_PI_2);
        assert_relative_eq!(turned.size().x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(turned.size().z, 10.0, epsilon = 1e-5);
        assert_eq!(turned.min.y, 0.0);
        assert_eq!(turned.max.y, 8.0);
    }

    #[test]
    fn test_diagonal_turn_covers_corners() {
        let turned = crate_box().rotate_y(core::f32::consts::FRAC_PI_4);
        let reach = 0.75 * core::f32::consts::SQRT_2;
        assert_relative_eq!(turned.max.x, reach, epsilon = 1e-5);
        assert_relative_eq!(turned.min.z, -reach, epsilon = 1e-5);
    }

    #[test]
    fn test_cast_reaches_crate_face() {
        let b = crate_box();
        // Standing beside the crate, looking at it and away from it
        let origin = Vec3::new(-1.2, 1.0, 0.0);
        assert_relative_eq!(b.axis_distance(origin, AxisDir::POS_X).unwrap(), 0.45, epsilon = 1e-6);
        assert!(b.axis_distance(origin, AxisDir::NEG_X).is_none());
        // Sideways probes pass beside it
        assert!(b.axis_distance(origin, AxisDir::POS_Z).is_none());
        assert!(b.axis_distance(origin, AxisDir::NEG_Y).is_none());
    }

    #[test]
    fn test_cast_down_onto_crate_top() {
        let origin = Vec3::new(0.3, 2.0, -0.3);
        assert_relative_eq!(crate_box().axis_distance(origin, AxisDir::NEG_Y).unwrap(), 0.5, epsilon = 1e-6);
        assert!(crate_box().axis_distance(origin, AxisDir::POS_Y).is_none());
    }

    #[test]
    fn test_cast_from_inside_is_zero() {
        let inside = Vec3::new(0.0, 0.5, 0.0);
        for dir in AxisDir::ALL {
            assert_eq!(crate_box().axis_distance(inside, dir), Some(0.0));
        }
    }
}
