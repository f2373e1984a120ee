//! Dust Combat - Projectiles, Weapon Timing and Targets
//!
//! This crate provides the shooting side of the Dust Arena simulation.
//!
//! # Features
//!
//! - Fixed-capacity projectile pool that recycles the oldest shot when full
//! - Weapon cooldown, muzzle flash and recoil timers
//! - Destructible targets with a tick-driven decay animation
//! - Seedable particle bursts
//!
//! # Example
//!
//! ```ignore
//! use dust_combat::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//! let mut targets = TargetSet::default();
//! targets.spawn(Vec3::new(0.0, 2.0, 8.0));
//!
//! let mut pool = ProjectilePool::default();
//! pool.fire(Vec3::new(0.0, 2.0, 0.0), Vec3::Z, 80.0);
//!
//! pool.advance(1.0 / 60.0);
//! for hit in pool.resolve_hits(&mut targets, &mut rng) {
//!     println!("slot {:?} hit target {:?}", hit.slot, hit.target);
//! }
//! targets.advance(1.0 / 60.0);
//! ```

pub mod config;
pub mod error;
pub mod particle;
pub mod projectile;
pub mod target;
pub mod weapon;

pub mod prelude {
    pub use crate::config::{DecayConfig, ProjectileConfig, WeaponConfig};
    pub use crate::error::{CombatError, Result};
    pub use crate::particle::Particle;
    pub use crate::projectile::{HitEvent, Projectile, ProjectilePool, SlotId};
    pub use crate::target::{DecayTransform, Target, TargetId, TargetSet, TargetState};
    pub use crate::weapon::{Shot, Weapon};
    pub use dust_math::Vec3;
}

pub use prelude::*;
