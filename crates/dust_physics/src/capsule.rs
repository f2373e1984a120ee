//! Capsule collision resolver
//!
//! The player is approximated by a vertical capsule that is point-sampled
//! against the collidable bounds, each expanded by the capsule radius plus a
//! skin margin. When no sample point lands inside, six axis probes catch thin
//! geometry the point grid can straddle.
//!
//! Every call runs against the current cached primitive list; nothing is
//! remembered between candidate positions.

use crate::cache::{CollidableCache, CollidablePrimitive};
use crate::config::CapsuleConfig;
use crate::query::{probe_nearest, CollisionQuery};
use dust_math::{AxisDir, Vec3};

/// Tests candidate player positions against static geometry
#[derive(Debug)]
pub struct CapsuleResolver {
    config: CapsuleConfig,
    cache: CollidableCache,
}

impl CapsuleResolver {
    /// Create a resolver reading from `cache`
    pub fn new(config: CapsuleConfig, cache: CollidableCache) -> Self {
        Self { config, cache }
    }

    /// Capsule configuration
    pub fn config(&self) -> &CapsuleConfig {
        &self.config
    }

    /// The collidable cache backing this resolver
    pub fn cache(&self) -> &CollidableCache {
        &self.cache
    }

    /// Mutable access to the cache (for explicit invalidation)
    pub fn cache_mut(&mut self) -> &mut CollidableCache {
        &mut self.cache
    }

    /// Whether the capsule centered at `candidate` overlaps any collidable
    ///
    /// Returns on the first collision found.
    pub fn check_collision(&mut self, candidate: Vec3) -> bool {
        let contact = self.config.contact_distance();
        let primitives = self.cache.get_collidables();
        if primitives.is_empty() {
            return false;
        }

        for point in self.config.sample_points(candidate) {
            for primitive in primitives {
                if primitive.bounds.expand(contact).contains_point(point) {
                    return true;
                }
            }
        }

        Self::probe_primitives(primitives, candidate, contact)
    }

    /// Run only the axis-probe pass at `candidate`
    pub fn probe(&mut self, candidate: Vec3) -> bool {
        let contact = self.config.contact_distance();
        let primitives = self.cache.get_collidables();
        Self::probe_primitives(primitives, candidate, contact)
    }

    fn probe_primitives(primitives: &[CollidablePrimitive], origin: Vec3, contact: f32) -> bool {
        AxisDir::ALL.into_iter().any(|dir| {
            probe_nearest(primitives, origin, dir, contact).map_or(false, |hit| hit.distance < contact)
        })
    }
}

impl CollisionQuery for CapsuleResolver {
    fn check_collision(&mut self, position: Vec3) -> bool {
        CapsuleResolver::check_collision(self, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SharedScene, StaticMesh, StaticScene, StaticStructure, StructureKind};

    fn scene_with(meshes: &[StaticMesh]) -> SharedScene {
        let mut scene = StaticScene::new();
        for (i, mesh) in meshes.iter().enumerate() {
            scene.add_structure(StaticStructure::single(
                format!("block-{i}"),
                StructureKind::Building,
                *mesh,
            ));
        }
        scene.into_shared()
    }

    fn resolver(scene: &SharedScene) -> CapsuleResolver {
        CapsuleResolver::new(CapsuleConfig::default(), CollidableCache::new(scene))
    }

    #[test]
    fn test_empty_scene_never_collides() {
        let scene = StaticScene::new().into_shared();
        let mut resolver = resolver(&scene);
        assert!(!resolver.check_collision(Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_point_inside_expanded_volume_collides() {
        // Wall occupying x in [10, 12]
        let scene = scene_with(&[StaticMesh::grounded(11.0, 0.0, 2.0, 8.0, 20.0)]);
        let mut resolver = resolver(&scene);

        // Center is outside the wall but within radius + skin of its face
        assert!(resolver.check_collision(Vec3::new(9.7, 2.0, 0.0)));
        // Deep inside
        assert!(resolver.check_collision(Vec3::new(11.0, 2.0, 0.0)));
    }

    #[test]
    fn test_far_point_is_clear() {
        let scene = scene_with(&[StaticMesh::grounded(11.0, 0.0, 2.0, 8.0, 20.0)]);
        let mut resolver = resolver(&scene);
        assert!(!resolver.check_collision(Vec3::new(0.0, 2.0, 0.0)));
        assert!(!resolver.check_collision(Vec3::new(8.8, 2.0, 0.0)));
    }

    #[test]
    fn test_capsule_above_low_block_is_clear() {
        // 1.5 tall crate; capsule bottom ring at 3.2 - 0.8 = 2.4
        let scene = scene_with(&[StaticMesh::grounded(0.0, 0.0, 1.5, 1.5, 1.5)]);
        let mut resolver = resolver(&scene);
        assert!(!resolver.check_collision(Vec3::new(0.0, 3.2, 0.0)));
        assert!(resolver.check_collision(Vec3::new(0.0, 2.6, 0.0)));
    }

    #[test]
    fn test_axis_pass_hits_thin_geometry_between_points() {
        // Sheet that is thin on Y and hovers just above the top ring
        let scene = scene_with(&[StaticMesh::new(
            Vec3::new(0.0, 2.95, 0.0),
            Vec3::new(0.01, 0.01, 0.01),
        )]);
        let mut resolver = resolver(&scene);

        // Up probe from y = 2.45 reaches the sheet at 0.495, inside the contact distance
        assert!(resolver.probe(Vec3::new(0.0, 2.45, 0.0)));
        assert!(!resolver.probe(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_query_tracks_scene_changes() {
        let scene = StaticScene::new().into_shared();
        let mut resolver = resolver(&scene);
        let spot = Vec3::new(0.0, 2.0, 0.0);
        assert!(!resolver.check_collision(spot));

        scene.write().add_structure(StaticStructure::single(
            "crate",
            StructureKind::Crate,
            StaticMesh::grounded(0.0, 0.0, 1.5, 1.5, 1.5),
        ));
        assert!(resolver.check_collision(spot));
    }
}
