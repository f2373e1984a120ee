//! Collision and movement configuration

use crate::error::{PhysicsError, Result};
use dust_math::Vec3;
use serde::{Deserialize, Serialize};

/// Player capsule used by the collision resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleConfig {
    /// Horizontal radius of the capsule
    pub radius: f32,

    /// Vertical span between the bottom and top sample rings
    pub height: f32,

    /// Extra margin added to the radius when expanding collidable bounds
    pub skin: f32,

    /// Sample points per horizontal ring
    pub ring_segments: u32,
}

impl Default for CapsuleConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.6,
            skin: 0.1,
            ring_segments: 8,
        }
    }
}

impl CapsuleConfig {
    /// Distance at which geometry counts as touching the capsule
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.radius + self.skin
    }

    /// Number of points produced by [`CapsuleConfig::sample_points`]
    pub fn sample_count(&self) -> usize {
        self.ring_segments as usize * 3 + 5
    }

    /// Sample points of the capsule centered at `center`
    ///
    /// Bottom ring, top ring, middle ring, then the center, then the four
    /// cardinal edge points (+x, -x, +z, -z).
    pub fn sample_points(&self, center: Vec3) -> impl Iterator<Item = Vec3> + '_ {
        let half = self.height / 2.0;
        let rings = [center.y - half, center.y + half, center.y];
        let segments = self.ring_segments.max(1);
        let radius = self.radius;

        let ring_points = rings.into_iter().flat_map(move |y| {
            (0..segments).map(move |i| {
                let angle = (i as f32 / segments as f32) * dust_math::consts::TAU;
                Vec3::new(center.x + angle.cos() * radius, y, center.z + angle.sin() * radius)
            })
        });

        let edges = [
            center,
            Vec3::new(center.x + radius, center.y, center.z),
            Vec3::new(center.x - radius, center.y, center.z),
            Vec3::new(center.x, center.y, center.z + radius),
            Vec3::new(center.x, center.y, center.z - radius),
        ];

        ring_points.chain(edges)
    }

    /// Reject values the resolver cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.radius > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "capsule radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.height >= 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "capsule height must not be negative, got {}",
                self.height
            )));
        }
        if !(self.skin >= 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "capsule skin must not be negative, got {}",
                self.skin
            )));
        }
        if self.ring_segments == 0 {
            return Err(PhysicsError::InvalidConfig(
                "capsule needs at least one ring segment".into(),
            ));
        }
        Ok(())
    }
}

/// Character controller tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Vertical acceleration in units/s² (negative pulls down)
    pub gravity: f32,

    /// Horizontal speed in units/s
    pub move_speed: f32,

    /// Upward velocity added by a jump
    pub jump_velocity: f32,

    /// Height of the eye above the ground surface
    pub eye_height: f32,

    /// How far above the player the ground ray starts
    pub ground_probe_height: f32,

    /// Maximum ground ray length
    pub ground_probe_distance: f32,

    /// Position used on spawn and reset
    pub spawn_point: [f32; 3],
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: -30.0,
            move_speed: 8.0,
            jump_velocity: 8.0,
            eye_height: 1.6,
            ground_probe_height: 10.0,
            ground_probe_distance: 10.0,
            spawn_point: [0.0, 2.0, 0.0],
        }
    }
}

impl MovementConfig {
    /// Spawn point as a vector
    #[inline]
    pub fn spawn(&self) -> Vec3 {
        Vec3::from_array(self.spawn_point)
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set spawn point
    pub fn with_spawn_point(mut self, x: f32, y: f32, z: f32) -> Self {
        self.spawn_point = [x, y, z];
        self
    }

    /// Reject values the controller cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig("gravity must be finite".into()));
        }
        if !(self.move_speed >= 0.0) || !(self.jump_velocity >= 0.0) {
            return Err(PhysicsError::InvalidConfig(
                "move speed and jump velocity must not be negative".into(),
            ));
        }
        if !(self.eye_height > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "eye height must be positive, got {}",
                self.eye_height
            )));
        }
        if !(self.ground_probe_distance > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "ground probe distance must be positive, got {}",
                self.ground_probe_distance
            )));
        }
        if self.spawn_point.iter().any(|c| !c.is_finite()) {
            return Err(PhysicsError::InvalidConfig("spawn point must be finite".into()));
        }
        Ok(())
    }
}
