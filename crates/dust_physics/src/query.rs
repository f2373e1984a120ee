//! Collision queries (axis probes against collidables, ground casts)

use crate::cache::CollidablePrimitive;
use dust_math::{AxisDir, Vec3};

/// Nearest collidable found by an axis probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Index of the primitive in the collidable list
    pub primitive: usize,
    /// First point of the primitive along the probe
    pub point: Vec3,
    /// Distance travelled from the probe origin
    pub distance: f32,
}

/// Result of a downward ground cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// Hit point in world space
    pub point: Vec3,
    /// Distance below the cast origin
    pub distance: f32,
}

/// Blocking test used by the character controller
pub trait CollisionQuery {
    /// Whether the player capsule placed at `position` overlaps level geometry
    fn check_collision(&mut self, position: Vec3) -> bool;
}

/// Ground surface lookup used by the ground snap
pub trait GroundQuery {
    /// Look straight down from `origin`, at most `max_distance`
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit>;

    /// Height of the walkable surface; the floor clamp keeps the eye above it
    fn surface_height(&self) -> f32;
}

/// Nearest primitive reached from `origin` along `dir` within `max_distance`
pub fn probe_nearest(
    primitives: &[CollidablePrimitive],
    origin: Vec3,
    dir: AxisDir,
    max_distance: f32,
) -> Option<ProbeHit> {
    primitives
        .iter()
        .enumerate()
        .filter_map(|(index, primitive)| {
            let distance = primitive.bounds.axis_distance(origin, dir)?;
            (distance <= max_distance).then(|| ProbeHit {
                primitive: index,
                point: dir.advance(origin, distance),
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{StaticMesh, StructureId};

    fn collidable(structure: usize, mesh: StaticMesh) -> CollidablePrimitive {
        CollidablePrimitive {
            structure: StructureId(structure),
            bounds: mesh.world_bounds(),
        }
    }

    #[test]
    fn test_nearest_wall_wins() {
        let walls = [
            collidable(0, StaticMesh::grounded(6.0, 0.0, 2.0, 8.0, 10.0)),
            collidable(1, StaticMesh::grounded(3.0, 0.0, 2.0, 8.0, 10.0)),
        ];
        let hit = probe_nearest(&walls, Vec3::new(0.0, 2.0, 0.0), AxisDir::POS_X, 100.0).unwrap();
        assert_eq!(hit.primitive, 1);
        assert_eq!(hit.distance, 2.0);
        assert_eq!(hit.point, Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn test_reach_limits_hits() {
        let walls = [collidable(0, StaticMesh::grounded(6.0, 0.0, 2.0, 8.0, 10.0))];
        let eye = Vec3::new(0.0, 2.0, 0.0);
        assert!(probe_nearest(&walls, eye, AxisDir::POS_X, 4.0).is_none());
        assert!(probe_nearest(&walls, eye, AxisDir::POS_X, 5.0).is_some());
    }

    #[test]
    fn test_over_a_crate_only_down_hits() {
        let crates = [collidable(0, StaticMesh::grounded(0.0, 0.0, 1.5, 1.5, 1.5))];
        let above = Vec3::new(0.0, 2.0, 0.0);
        let hit = probe_nearest(&crates, above, AxisDir::NEG_Y, 0.6).unwrap();
        assert_eq!(hit.distance, 0.5);
        for dir in AxisDir::ALL.into_iter().filter(|d| *d != AxisDir::NEG_Y) {
            assert!(probe_nearest(&crates, above, dir, 10.0).is_none());
        }
    }

    #[test]
    fn test_no_collidables_no_hit() {
        assert!(probe_nearest(&[], Vec3::ZERO, AxisDir::POS_X, 100.0).is_none());
    }
}
