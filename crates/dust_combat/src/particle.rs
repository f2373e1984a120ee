//! Debris particles thrown out when a target is destroyed

use crate::config::DecayConfig;
use dust_math::{consts::TAU, Vec3};
use rand::Rng;

/// A single debris particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Units per second
    pub velocity: Vec3,
    /// Remaining life; doubles as opacity
    pub life: f32,
    pub scale: f32,
}

impl Particle {
    /// Opacity for display, clamped to [0, 1]
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    /// Integrate one frame
    pub fn advance(&mut self, dt: f32, config: &DecayConfig) {
        let rate = config.particle_step_rate;
        self.position += self.velocity * dt;
        self.velocity.y -= config.particle_gravity * rate * rate * dt;
        self.life -= config.particle_fade * rate * dt;
        self.scale *= config.particle_shrink.powf(dt * rate);
    }
}

/// Ring of particles fanning out from `origin`
///
/// Particle `i` leaves at angle `TAU * i / count` with a random horizontal
/// speed and lift drawn from the configured ranges.
pub fn burst<R>(origin: Vec3, config: &DecayConfig, rng: &mut R) -> Vec<Particle>
where
    R: Rng + ?Sized,
{
    let count = config.particle_count;
    let rate = config.particle_step_rate;
    let [speed_lo, speed_hi] = config.particle_speed;
    let [lift_lo, lift_hi] = config.particle_lift;

    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            let speed = rng.gen_range(speed_lo..=speed_hi);
            let lift = rng.gen_range(lift_lo..=lift_hi);
            Particle {
                position: origin,
                velocity: Vec3::new(angle.cos() * speed, lift, angle.sin() * speed) * rate,
                life: 1.0,
                scale: 1.0,
            }
        })
        .collect()
}
