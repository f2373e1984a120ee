//! Static level geometry
//!
//! The scene is owned by the level and shared with the collision cache
//! through a [`SharedScene`] handle. The simulation core only reads it.

use crate::query::{GroundHit, GroundQuery};
use dust_math::{Vec3, AABB};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared, lockable handle to the static scene
pub type SharedScene = Arc<RwLock<StaticScene>>;

/// Index of a structure inside a [`StaticScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureId(pub usize);

/// What a structure represents in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    /// Perimeter or corner wall
    Wall,
    /// Solid building block
    Building,
    /// Multi-part archway
    Archway,
    /// Low barrier
    Barrier,
    /// Cover crate
    Crate,
}

/// A leaf box mesh placed in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticMesh {
    /// World position of the box center
    pub position: [f32; 3],
    /// Full box size (width, height, depth)
    pub size: [f32; 3],
    /// Rotation about +Y in radians
    #[serde(default)]
    pub yaw: f32,
}

impl StaticMesh {
    /// Create an unrotated box
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            position: position.to_array(),
            size: size.to_array(),
            yaw: 0.0,
        }
    }

    /// Box standing on the ground (center at half height)
    pub fn grounded(x: f32, z: f32, width: f32, height: f32, depth: f32) -> Self {
        Self::new(Vec3::new(x, height / 2.0, z), Vec3::new(width, height, depth))
    }

    /// Set rotation about +Y
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    /// World-space axis-aligned bounds of the rotated box
    pub fn world_bounds(&self) -> AABB {
        let center = Vec3::from_array(self.position);
        let half = Vec3::from_array(self.size) * 0.5;

        if self.yaw == 0.0 {
            return AABB::from_center_half_extents(center, half);
        }

        let turned = AABB::from_center_half_extents(Vec3::ZERO, half).rotate_y(self.yaw);
        AABB::new(turned.min + center, turned.max + center)
    }
}

/// A named group of meshes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticStructure {
    pub name: String,
    pub kind: StructureKind,
    pub meshes: Vec<StaticMesh>,
}

impl StaticStructure {
    /// Create an empty structure
    pub fn new(name: impl Into<String>, kind: StructureKind) -> Self {
        Self {
            name: name.into(),
            kind,
            meshes: Vec::new(),
        }
    }

    /// Single-mesh structure
    pub fn single(name: impl Into<String>, kind: StructureKind, mesh: StaticMesh) -> Self {
        Self::new(name, kind).with_mesh(mesh)
    }

    /// Add a mesh
    pub fn with_mesh(mut self, mesh: StaticMesh) -> Self {
        self.meshes.push(mesh);
        self
    }
}

/// All static collidable geometry of a level
///
/// Every structural change bumps [`StaticScene::revision`], which the
/// collidable cache uses to notice it is stale.
#[derive(Debug, Default)]
pub struct StaticScene {
    structures: Vec<Option<StaticStructure>>,
    revision: u64,
}

impl StaticScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the scene in a shared handle
    pub fn into_shared(self) -> SharedScene {
        Arc::new(RwLock::new(self))
    }

    /// Add a structure
    pub fn add_structure(&mut self, structure: StaticStructure) -> StructureId {
        self.structures.push(Some(structure));
        self.revision += 1;
        StructureId(self.structures.len() - 1)
    }

    /// Remove a structure; ids of the remaining structures stay stable
    pub fn remove_structure(&mut self, id: StructureId) -> Option<StaticStructure> {
        let removed = self.structures.get_mut(id.0)?.take();
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.structures.clear();
        self.revision += 1;
    }

    /// Get a structure
    pub fn get(&self, id: StructureId) -> Option<&StaticStructure> {
        self.structures.get(id.0)?.as_ref()
    }

    /// Iterate live structures with their ids
    pub fn structures(&self) -> impl Iterator<Item = (StructureId, &StaticStructure)> {
        self.structures
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (StructureId(i), s)))
    }

    /// Number of live structures
    pub fn structure_count(&self) -> usize {
        self.structures.iter().filter(|s| s.is_some()).count()
    }

    /// Number of leaf meshes across all structures
    pub fn mesh_count(&self) -> usize {
        self.structures().map(|(_, s)| s.meshes.len()).sum()
    }

    /// Structural revision counter
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Flat, bounded ground rectangle
///
/// Not a collidable: only the ground snap looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlane {
    /// Surface height
    pub height: f32,
    /// Half extent along X
    pub half_width: f32,
    /// Half extent along Z
    pub half_depth: f32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            height: 0.0,
            half_width: 100.0,
            half_depth: 75.0,
        }
    }
}

impl GroundPlane {
    /// Whether a horizontal position lies over the ground rectangle
    #[inline]
    pub fn covers(&self, x: f32, z: f32) -> bool {
        x.abs() <= self.half_width && z.abs() <= self.half_depth
    }
}

impl GroundQuery for GroundPlane {
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<GroundHit> {
        let distance = origin.y - self.height;
        if !(0.0..=max_distance).contains(&distance) || !self.covers(origin.x, origin.z) {
            return None;
        }
        Some(GroundHit {
            point: Vec3::new(origin.x, self.height, origin.z),
            distance,
        })
    }

    fn surface_height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grounded_mesh_bounds() {
        let mesh = StaticMesh::grounded(-25.0, 10.0, 15.0, 6.0, 3.0);
        let bounds = mesh.world_bounds();
        assert_eq!(bounds.min, Vec3::new(-32.5, 0.0, 8.5));
        assert_eq!(bounds.max, Vec3::new(-17.5, 6.0, 11.5));
    }

    #[test]
    fn test_rotated_wall_bounds() {
        // A 150-wide wall turned a quarter turn runs along Z
        let mesh = StaticMesh::grounded(-100.0, 0.0, 150.0, 8.0, 2.0)
            .with_yaw(std::f32::consts::FRAC_PI_2);
        let bounds = mesh.world_bounds();
        let size = bounds.size();
        assert_relative_eq!(size.x, 2.0, epsilon = 1e-3);
        assert_relative_eq!(size.y, 8.0, epsilon = 1e-3);
        assert_relative_eq!(size.z, 150.0, epsilon = 1e-3);
        assert_relative_eq!(bounds.center().x, -100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_scene_revision_tracks_changes() {
        let mut scene = StaticScene::new();
        assert_eq!(scene.revision(), 0);

        let id = scene.add_structure(StaticStructure::single(
            "crate",
            StructureKind::Crate,
            StaticMesh::grounded(0.0, 0.0, 1.5, 1.5, 1.5),
        ));
        assert_eq!(scene.revision(), 1);
        assert_eq!(scene.mesh_count(), 1);

        assert!(scene.remove_structure(id).is_some());
        assert_eq!(scene.revision(), 2);
        assert!(scene.remove_structure(id).is_none());
        assert_eq!(scene.revision(), 2);
        assert_eq!(scene.structure_count(), 0);
    }

    #[test]
    fn test_ground_hit_from_above() {
        let ground = GroundPlane::default();
        let hit = ground.cast_down(Vec3::new(0.0, 8.0, 0.0), 10.0).unwrap();
        assert_relative_eq!(hit.distance, 8.0);
        assert_relative_eq!(hit.point.y, 0.0);
    }

    #[test]
    fn test_ground_miss_when_out_of_reach_or_outside() {
        let ground = GroundPlane::default();
        assert!(ground.cast_down(Vec3::new(0.0, 11.6, 0.0), 10.0).is_none());
        assert!(ground.cast_down(Vec3::new(150.0, 5.0, 0.0), 10.0).is_none());
        // Already below the surface
        assert!(ground.cast_down(Vec3::new(0.0, -0.5, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_raised_ground_reports_its_height() {
        let ground = GroundPlane {
            height: 3.0,
            ..GroundPlane::default()
        };
        assert_eq!(ground.surface_height(), 3.0);
        let hit = ground.cast_down(Vec3::new(2.0, 12.0, -1.0), 10.0).unwrap();
        assert_eq!(hit.point, Vec3::new(2.0, 3.0, -1.0));
        assert_relative_eq!(hit.distance, 9.0);
    }
}
