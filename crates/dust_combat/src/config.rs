//! Combat tuning

use crate::error::{CombatError, Result};
use dust_math::Vec3;
use serde::{Deserialize, Serialize};

/// Projectile pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Number of pooled projectiles
    pub capacity: usize,
    /// Seconds a projectile stays active
    pub lifetime: f32,
    /// Projectile-target contact distance
    pub hit_radius: f32,
    /// Launch speed in units/s
    pub speed: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            lifetime: 5.0,
            hit_radius: 2.0,
            speed: 80.0,
        }
    }
}

impl ProjectileConfig {
    /// Set pool capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set lifetime
    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CombatError::InvalidConfig(
                "projectile capacity must be at least 1".into(),
            ));
        }
        if !(self.lifetime > 0.0) {
            return Err(CombatError::InvalidConfig(format!(
                "projectile lifetime must be positive, got {}",
                self.lifetime
            )));
        }
        if !(self.hit_radius > 0.0) {
            return Err(CombatError::InvalidConfig(format!(
                "hit radius must be positive, got {}",
                self.hit_radius
            )));
        }
        if !(self.speed > 0.0) {
            return Err(CombatError::InvalidConfig(format!(
                "projectile speed must be positive, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

/// Weapon timing and muzzle placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Minimum seconds between shots
    pub cooldown: f32,
    /// Seconds a shot counts as in progress
    pub shot_duration: f32,
    /// Muzzle flash display time
    pub muzzle_flash: f32,
    /// Recoil kick display time
    pub recoil: f32,
    /// Spawn offset from the eye as (right, up, forward)
    pub muzzle_offset: [f32; 3],
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.2,
            shot_duration: 0.1,
            muzzle_flash: 0.05,
            recoil: 0.1,
            muzzle_offset: [0.4, -0.4, 1.2],
        }
    }
}

impl WeaponConfig {
    /// Set the cooldown
    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Muzzle offset as a vector of (right, up, forward) amounts
    pub fn muzzle_offset(&self) -> Vec3 {
        Vec3::from_array(self.muzzle_offset)
    }

    pub fn validate(&self) -> Result<()> {
        let timers = [
            ("cooldown", self.cooldown),
            ("shot duration", self.shot_duration),
            ("muzzle flash", self.muzzle_flash),
            ("recoil", self.recoil),
        ];
        for (name, value) in timers {
            if !(value >= 0.0) {
                return Err(CombatError::InvalidConfig(format!(
                    "weapon {name} must not be negative, got {value}"
                )));
            }
        }
        if self.muzzle_offset.iter().any(|c| !c.is_finite()) {
            return Err(CombatError::InvalidConfig("muzzle offset must be finite".into()));
        }
        Ok(())
    }
}

/// Target destruction animation
///
/// Particle values are per-step amounts at `particle_step_rate` steps per
/// second; the decay converts them to rates so any frame time works.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Seconds from hit to removal
    pub duration: f32,
    /// Spin about +Y in rad/s
    pub spin_rate: f32,
    /// Downward drift in units/s
    pub sink_rate: f32,
    /// Particles per burst
    pub particle_count: usize,
    /// Reference step rate of the particle values (Hz)
    pub particle_step_rate: f32,
    /// Horizontal speed range per step
    pub particle_speed: [f32; 2],
    /// Upward speed range per step
    pub particle_lift: [f32; 2],
    /// Velocity lost per step to gravity
    pub particle_gravity: f32,
    /// Life lost per step
    pub particle_fade: f32,
    /// Scale multiplier per step
    pub particle_shrink: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            duration: 0.5,
            spin_rate: 6.0,
            sink_rate: 3.0,
            particle_count: 20,
            particle_step_rate: 60.0,
            particle_speed: [0.5, 1.0],
            particle_lift: [0.2, 0.7],
            particle_gravity: 0.02,
            particle_fade: 0.02,
            particle_shrink: 0.98,
        }
    }
}

impl DecayConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.duration > 0.0) {
            return Err(CombatError::InvalidConfig(format!(
                "decay duration must be positive, got {}",
                self.duration
            )));
        }
        if !(self.particle_step_rate > 0.0) {
            return Err(CombatError::InvalidConfig(
                "particle step rate must be positive".into(),
            ));
        }
        for (name, [low, high]) in [
            ("speed", self.particle_speed),
            ("lift", self.particle_lift),
        ] {
            if !(low <= high) {
                return Err(CombatError::InvalidConfig(format!(
                    "particle {name} range is inverted: {low}..{high}"
                )));
            }
        }
        if !(self.particle_shrink > 0.0 && self.particle_shrink <= 1.0) {
            return Err(CombatError::InvalidConfig(format!(
                "particle shrink must be in (0, 1], got {}",
                self.particle_shrink
            )));
        }
        Ok(())
    }
}
