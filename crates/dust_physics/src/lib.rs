//! Dust Physics - Static Collision and Character Movement
//!
//! This crate resolves first-person player motion against static level
//! geometry. There is no rigid-body solver: the player is a kinematic capsule
//! that is point-sampled against axis-aligned bounds.
//!
//! # Features
//!
//! - Static scene of box meshes grouped into structures
//! - Lazily rebuilt collidable cache with revision tracking
//! - 29-point capsule test plus six axis probes
//! - Character controller with gravity, jumping, wall sliding and ground snap
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  weak   ┌─────────────────┐       ┌─────────────────┐
//! │ StaticScene  │◄────────│ CollidableCache │◄──────│ CapsuleResolver │
//! │ (shared, RW) │         │ (flat AABB list)│       │ check_collision │
//! └──────────────┘         └─────────────────┘       └────────▲────────┘
//!                                                             │
//!      ┌─────────────┐                             ┌──────────┴──────────┐
//!      │ GroundPlane │◄────────── ground snap ─────│ CharacterController │
//!      └─────────────┘                             └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dust_physics::prelude::*;
//!
//! let scene = StaticScene::new().into_shared();
//! let mut resolver = CapsuleResolver::new(CapsuleConfig::default(), CollidableCache::new(&scene));
//! let mut controller = CharacterController::new(MovementConfig::default());
//! controller.set_active(true);
//!
//! let ground = GroundPlane::default();
//! controller.update(1.0 / 60.0, MoveIntent::FORWARD, Vec3::NEG_Z, &mut resolver, &ground);
//! ```

pub mod cache;
pub mod capsule;
pub mod config;
pub mod controller;
pub mod error;
pub mod query;
pub mod scene;

pub mod prelude {
    //! Common imports for collision and movement
    pub use crate::cache::{CollidableCache, CollidablePrimitive};
    pub use crate::capsule::CapsuleResolver;
    pub use crate::config::{CapsuleConfig, MovementConfig};
    pub use crate::controller::{
        CharacterController, HorizontalMove, MoveIntent, PlayerState, StepOutcome, Support,
    };
    pub use crate::error::{PhysicsError, Result};
    pub use crate::query::{CollisionQuery, GroundHit, GroundQuery, ProbeHit};
    pub use crate::scene::{
        GroundPlane, SharedScene, StaticMesh, StaticScene, StaticStructure, StructureId,
        StructureKind,
    };
    pub use dust_math::Vec3;
}

pub use prelude::*;
