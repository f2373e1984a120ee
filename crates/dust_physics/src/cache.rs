//! Collidable cache
//!
//! Flattens the static scene into a list of world-space bounds. The list is
//! rebuilt lazily: on first use, after [`CollidableCache::invalidate`], or when
//! the scene revision moved since the last rebuild. Between rebuilds queries
//! read the precomputed bounds directly.

use crate::scene::{SharedScene, StaticScene, StructureId};
use dust_math::AABB;
use parking_lot::RwLock;
use std::sync::Weak;

/// World-space bounds of one static mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollidablePrimitive {
    /// Structure the mesh belongs to
    pub structure: StructureId,
    /// Axis-aligned world bounds
    pub bounds: AABB,
}

/// Lazily rebuilt flat list of collidable primitives
///
/// Holds only a weak handle to the scene; if the scene is dropped the cache
/// reports no collidables.
pub struct CollidableCache {
    scene: Weak<RwLock<StaticScene>>,
    primitives: Vec<CollidablePrimitive>,
    valid: bool,
    seen_revision: u64,
    rebuilds: u64,
}

impl CollidableCache {
    /// Create a cache over a shared scene
    pub fn new(scene: &SharedScene) -> Self {
        Self {
            scene: std::sync::Arc::downgrade(scene),
            primitives: Vec::new(),
            valid: false,
            seen_revision: 0,
            rebuilds: 0,
        }
    }

    /// Mark the cached list stale
    pub fn invalidate(&mut self) {
        if self.valid {
            log::trace!("Collidable cache invalidated");
        }
        self.valid = false;
    }

    /// Whether the next query can use the cached list as-is
    pub fn is_valid(&self) -> bool {
        if !self.valid {
            return false;
        }
        match self.current_revision() {
            Some(revision) => revision == self.seen_revision,
            // Scene is gone: only an already-emptied list is still accurate
            None => self.primitives.is_empty(),
        }
    }

    /// Number of cached primitives (as of the last rebuild)
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the cached list is empty (as of the last rebuild)
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// How many times the list has been rebuilt
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Get the collidable list, rebuilding it first if stale
    pub fn get_collidables(&mut self) -> &[CollidablePrimitive] {
        if !self.is_valid() {
            self.rebuild();
        }
        &self.primitives
    }

    fn current_revision(&self) -> Option<u64> {
        self.scene.upgrade().map(|scene| scene.read().revision())
    }

    fn rebuild(&mut self) {
        self.primitives.clear();
        self.rebuilds += 1;
        self.valid = true;

        let Some(scene) = self.scene.upgrade() else {
            log::debug!("Collidable cache has no scene, treating level as empty");
            self.seen_revision = 0;
            return;
        };

        // Held for the whole traversal so structural writes wait for us
        let scene = scene.read();
        for (id, structure) in scene.structures() {
            for mesh in &structure.meshes {
                self.primitives.push(CollidablePrimitive {
                    structure: id,
                    bounds: mesh.world_bounds(),
                });
            }
        }
        self.seen_revision = scene.revision();

        log::debug!(
            "Collidable cache rebuilt: {} primitives from {} structures (revision {})",
            self.primitives.len(),
            scene.structure_count(),
            self.seen_revision
        );
    }
}

impl std::fmt::Debug for CollidableCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollidableCache")
            .field("primitives", &self.primitives.len())
            .field("valid", &self.valid)
            .field("seen_revision", &self.seen_revision)
            .field("rebuilds", &self.rebuilds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{StaticMesh, StaticStructure, StructureKind};

    fn crate_at(x: f32, z: f32) -> StaticStructure {
        StaticStructure::single("crate", StructureKind::Crate, StaticMesh::grounded(x, z, 1.5, 1.5, 1.5))
    }

    #[test]
    fn test_empty_scene_yields_empty_list() {
        let scene = StaticScene::new().into_shared();
        let mut cache = CollidableCache::new(&scene);
        assert!(cache.get_collidables().is_empty());
    }

    #[test]
    fn test_list_is_cached_until_invalidated() {
        let mut scene = StaticScene::new();
        scene.add_structure(crate_at(0.0, 0.0));
        scene.add_structure(
            StaticStructure::new("arch", StructureKind::Archway)
                .with_mesh(StaticMesh::grounded(-5.0, 0.0, 2.0, 10.0, 2.0))
                .with_mesh(StaticMesh::grounded(5.0, 0.0, 2.0, 10.0, 2.0)),
        );
        let scene = scene.into_shared();
        let mut cache = CollidableCache::new(&scene);

        assert_eq!(cache.get_collidables().len(), 3);
        assert_eq!(cache.rebuild_count(), 1);

        cache.get_collidables();
        assert_eq!(cache.rebuild_count(), 1);

        cache.invalidate();
        assert!(!cache.is_valid());
        assert_eq!(cache.get_collidables().len(), 3);
        assert_eq!(cache.rebuild_count(), 2);
    }

    #[test]
    fn test_structural_change_is_picked_up() {
        let scene = StaticScene::new().into_shared();
        let mut cache = CollidableCache::new(&scene);
        assert!(cache.get_collidables().is_empty());

        scene.write().add_structure(crate_at(3.0, 3.0));
        assert!(!cache.is_valid());
        assert_eq!(cache.get_collidables().len(), 1);
    }

    #[test]
    fn test_dropped_scene_reads_as_empty() {
        let scene = StaticScene::new().into_shared();
        scene.write().add_structure(crate_at(0.0, 0.0));
        let mut cache = CollidableCache::new(&scene);
        assert_eq!(cache.get_collidables().len(), 1);

        drop(scene);
        assert!(!cache.is_valid());
        assert!(cache.get_collidables().is_empty());
    }

    #[test]
    fn test_primitives_remember_structure() {
        let mut scene = StaticScene::new();
        scene.add_structure(crate_at(0.0, 0.0));
        let second = scene.add_structure(crate_at(4.0, 0.0));
        let scene = scene.into_shared();
        let mut cache = CollidableCache::new(&scene);
        assert_eq!(cache.get_collidables()[1].structure, second);
    }
}
