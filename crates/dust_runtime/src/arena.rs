//! Arena layouts
//!
//! A layout is the static geometry of a level plus the spawn points of its
//! targets. The scene is handed out as a [`SharedScene`] so the level can keep
//! editing it while the collision cache reads it.

use dust_combat::TargetSet;
use dust_math::{consts::FRAC_PI_2, Vec3};
use dust_physics::{SharedScene, StaticMesh, StaticScene, StaticStructure, StructureKind};

/// Target spawn points of the desert yard
const YARD_TARGETS: [[f32; 3]; 14] = [
    [-10.0, 2.5, 5.0],
    [10.0, 2.5, 5.0],
    [-5.0, 2.5, 10.0],
    [5.0, 2.5, 10.0],
    [0.0, 2.5, 8.0],
    [-15.0, 3.0, 0.0],
    [15.0, 3.0, 0.0],
    [-10.0, 3.0, -5.0],
    [10.0, 3.0, -5.0],
    [0.0, 3.0, -8.0],
    [-20.0, 3.5, 10.0],
    [20.0, 3.5, 10.0],
    [-25.0, 4.0, 0.0],
    [25.0, 4.0, 0.0],
];

/// Crate positions (x, z)
const YARD_CRATES: [[f32; 2]; 10] = [
    [-25.0, 12.0],
    [25.0, 12.0],
    [-18.0, -8.0],
    [18.0, -8.0],
    [-10.0, 18.0],
    [10.0, 18.0],
    [-5.0, 0.0],
    [5.0, 0.0],
    [-8.0, -12.0],
    [8.0, -12.0],
];

const CRATE_SIZE: f32 = 1.5;

/// Static geometry and target placement of a level
#[derive(Debug, Clone)]
pub struct Arena {
    pub name: String,
    pub structures: Vec<StaticStructure>,
    pub targets: Vec<Vec3>,
}

impl Arena {
    /// An arena with no structures or targets
    pub fn empty() -> Self {
        Self {
            name: "empty".into(),
            structures: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// The desert yard: perimeter walls, a central archway, cover and 14 targets
    pub fn dust_yard() -> Self {
        let mut arena = Self::empty();
        arena.name = "dust_yard".into();

        arena.add_perimeter(200.0, 150.0, 8.0);
        arena.add_archway("center archway", 0.0, 0.0, 12.0, 10.0, 8.0);

        let blocks: [(&str, StructureKind, f32, f32, f32, f32, f32); 12] = [
            ("left wall 1", StructureKind::Building, 15.0, 6.0, 3.0, -25.0, 10.0),
            ("left wall 2", StructureKind::Building, 12.0, 5.0, 3.0, -20.0, -10.0),
            ("right wall 1", StructureKind::Building, 15.0, 6.0, 3.0, 25.0, 10.0),
            ("right wall 2", StructureKind::Building, 12.0, 5.0, 3.0, 20.0, -10.0),
            ("stone block west", StructureKind::Building, 10.0, 4.0, 8.0, -30.0, -15.0),
            ("stone block east", StructureKind::Building, 10.0, 4.0, 8.0, 30.0, -15.0),
            ("barrier west", StructureKind::Barrier, 3.0, 3.0, 20.0, -18.0, 20.0),
            ("barrier east", StructureKind::Barrier, 3.0, 3.0, 20.0, 18.0, 20.0),
            ("fragment 1", StructureKind::Wall, 6.0, 5.0, 2.0, -12.0, 15.0),
            ("fragment 2", StructureKind::Wall, 6.0, 5.0, 2.0, 12.0, 15.0),
            ("fragment 3", StructureKind::Wall, 4.0, 4.0, 2.0, -8.0, -15.0),
            ("fragment 4", StructureKind::Wall, 4.0, 4.0, 2.0, 8.0, -15.0),
        ];
        for (name, kind, width, height, depth, x, z) in blocks {
            arena.structures.push(StaticStructure::single(
                name,
                kind,
                StaticMesh::grounded(x, z, width, height, depth),
            ));
        }

        for (i, [x, z]) in YARD_CRATES.into_iter().enumerate() {
            arena.structures.push(StaticStructure::single(
                format!("crate {}", i + 1),
                StructureKind::Crate,
                StaticMesh::grounded(x, z, CRATE_SIZE, CRATE_SIZE, CRATE_SIZE),
            ));
        }

        arena.targets = YARD_TARGETS.iter().map(|&p| Vec3::from_array(p)).collect();
        arena
    }

    /// Four boundary walls plus corner blocks around a `width` x `depth` field
    fn add_perimeter(&mut self, width: f32, depth: f32, height: f32) {
        let (hw, hd) = (width / 2.0, depth / 2.0);
        let thickness = 2.0;

        let mut walls = StaticStructure::new("perimeter", StructureKind::Wall)
            .with_mesh(StaticMesh::grounded(0.0, -hd, width, height, thickness))
            .with_mesh(StaticMesh::grounded(0.0, hd, width, height, thickness))
            .with_mesh(StaticMesh::grounded(-hw, 0.0, depth, height, thickness).with_yaw(FRAC_PI_2))
            .with_mesh(StaticMesh::grounded(hw, 0.0, depth, height, thickness).with_yaw(FRAC_PI_2));

        for (x, z) in [(-hw, -hd), (hw, -hd), (-hw, hd), (hw, hd)] {
            walls = walls.with_mesh(StaticMesh::grounded(x, z, height, height, thickness));
        }

        self.structures.push(walls);
    }

    /// Two pillars, a top span and two side walls centered on (x, z)
    fn add_archway(&mut self, name: &str, x: f32, z: f32, width: f32, height: f32, depth: f32) {
        let half = width / 2.0;
        let side_height = height - 2.0;

        let arch = StaticStructure::new(name, StructureKind::Archway)
            .with_mesh(StaticMesh::grounded(x - half + 1.0, z, 2.0, height, 2.0))
            .with_mesh(StaticMesh::grounded(x + half - 1.0, z, 2.0, height, 2.0))
            .with_mesh(StaticMesh::new(
                Vec3::new(x, height - 1.0, z),
                Vec3::new(width, 2.0, depth),
            ))
            .with_mesh(StaticMesh::new(
                Vec3::new(x - half, side_height / 2.0 + 1.0, z),
                Vec3::new(2.0, side_height, depth),
            ))
            .with_mesh(StaticMesh::new(
                Vec3::new(x + half, side_height / 2.0 + 1.0, z),
                Vec3::new(2.0, side_height, depth),
            ));

        self.structures.push(arch);
    }

    /// Build the static scene
    pub fn build_scene(&self) -> SharedScene {
        let mut scene = StaticScene::new();
        for structure in &self.structures {
            scene.add_structure(structure.clone());
        }
        log::info!(
            "Arena '{}' built: {} structures, {} meshes",
            self.name,
            scene.structure_count(),
            scene.mesh_count()
        );
        scene.into_shared()
    }

    /// Spawn every target into `targets`
    pub fn spawn_targets(&self, targets: &mut TargetSet) {
        for &position in &self.targets {
            targets.spawn(position);
        }
    }
}
