//! Destructible point targets
//!
//! A target is alive until hit, then plays a short decay (shrink, spin, sink
//! and a particle burst) and is dropped from the set. Decay is progress based
//! and advanced by the frame tick.

use crate::config::DecayConfig;
use crate::error::Result;
use crate::particle::{burst, Particle};
use dust_math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stable identifier of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Lifecycle of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetState {
    Alive,
    /// Hit; decay animation running
    Destroying,
    /// Decay finished; no longer in the set
    Removed,
}

/// Presentational transform applied during decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayTransform {
    /// Uniform scale, 1 when alive, 0 when fully decayed
    pub scale: f32,
    /// Accumulated spin about +Y in radians
    pub yaw: f32,
    /// Downward offset from the spawn position
    pub sink: f32,
}

impl DecayTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        yaw: 0.0,
        sink: 0.0,
    };
}

/// A destructible target
#[derive(Debug, Clone)]
pub struct Target {
    id: TargetId,
    home: Vec3,
    state: TargetState,
    destroyed: bool,
    elapsed: f32,
    transform: DecayTransform,
    particles: Vec<Particle>,
}

impl Target {
    fn new(id: TargetId, home: Vec3) -> Self {
        Self {
            id,
            home,
            state: TargetState::Alive,
            destroyed: false,
            elapsed: 0.0,
            transform: DecayTransform::IDENTITY,
            particles: Vec::new(),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Current position, including the decay sink
    pub fn position(&self) -> Vec3 {
        self.home - Vec3::new(0.0, self.transform.sink, 0.0)
    }

    /// Spawn position
    pub fn home(&self) -> Vec3 {
        self.home
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == TargetState::Alive
    }

    /// Set on the first hit and never cleared
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Decay progress in [0, 1]
    pub fn decay_progress(&self, config: &DecayConfig) -> f32 {
        (self.elapsed / config.duration).min(1.0)
    }

    pub fn transform(&self) -> DecayTransform {
        self.transform
    }

    /// Debris particles of the running decay
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance the decay; returns true once it has finished
    fn advance_decay(&mut self, dt: f32, config: &DecayConfig) -> bool {
        if self.state != TargetState::Destroying {
            return false;
        }

        self.elapsed = (self.elapsed + dt).min(config.duration);
        let progress = self.decay_progress(config);
        self.transform = DecayTransform {
            scale: 1.0 - progress,
            yaw: config.spin_rate * self.elapsed,
            sink: config.sink_rate * self.elapsed,
        };

        for particle in &mut self.particles {
            particle.advance(dt, config);
        }

        if progress >= 1.0 {
            self.state = TargetState::Removed;
            self.particles.clear();
            return true;
        }
        false
    }
}

/// Ordered set of targets
#[derive(Debug, Clone)]
pub struct TargetSet {
    config: DecayConfig,
    targets: Vec<Target>,
    next_id: u32,
}

impl TargetSet {
    /// Create an empty set; fails on a decay config that would misbehave mid-game
    pub fn new(config: DecayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::unchecked(config))
    }

    fn unchecked(config: DecayConfig) -> Self {
        Self {
            config,
            targets: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// Add a live target at `position`
    pub fn spawn(&mut self, position: Vec3) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.targets.push(Target::new(id, position));
        id
    }

    /// Get a target still in the set
    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Lifecycle state of any id ever issued by this set
    pub fn state_of(&self, id: TargetId) -> Option<TargetState> {
        match self.get(id) {
            Some(target) => Some(target.state),
            None if id.0 < self.next_id => Some(TargetState::Removed),
            None => None,
        }
    }

    /// Targets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// Number of targets in the set (alive or decaying)
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of targets not yet hit
    pub fn alive_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_alive()).count()
    }

    /// Destroy a live target and start its decay
    ///
    /// Returns false (and does nothing) for an unknown or already destroyed target.
    pub fn destroy<R>(&mut self, id: TargetId, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let Some(target) = self.targets.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if !target.is_alive() {
            log::trace!("Target {} already destroyed", id.0);
            return false;
        }

        target.destroyed = true;
        target.state = TargetState::Destroying;
        target.elapsed = 0.0;
        target.particles = burst(target.home, &self.config, rng);

        log::info!("Target {} destroyed at {:?}", id.0, target.home.to_array());
        true
    }

    /// Advance every decay by `dt`; returns the targets removed this step
    pub fn advance(&mut self, dt: f32) -> Vec<TargetId> {
        if !(dt > 0.0) {
            return Vec::new();
        }

        let config = &self.config;
        let mut removed = Vec::new();
        for target in &mut self.targets {
            if target.advance_decay(dt, config) {
                removed.push(target.id);
            }
        }

        if !removed.is_empty() {
            self.targets.retain(|t| t.state != TargetState::Removed);
            log::debug!("Removed {} decayed targets", removed.len());
        }
        removed
    }

    /// Drop every target
    pub fn clear(&mut self) {
        self.targets.clear();
    }
}

impl Default for TargetSet {
    fn default() -> Self {
        Self::unchecked(DecayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f32 = 1.0 / 60.0;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0xD057)
    }

    #[test]
    fn test_inverted_particle_range_is_rejected() {
        let mut config = DecayConfig::default();
        config.particle_speed = [1.0, 0.5];
        assert!(TargetSet::new(config).is_err());

        let mut config = DecayConfig::default();
        config.particle_lift = [0.7, 0.2];
        assert!(TargetSet::new(config).is_err());

        assert!(TargetSet::new(DecayConfig::default()).is_ok());
    }

    #[test]
    fn test_spawn_keeps_insertion_order() {
        let mut set = TargetSet::default();
        let a = set.spawn(Vec3::new(-10.0, 2.5, 5.0));
        let b = set.spawn(Vec3::new(10.0, 2.5, 5.0));
        let ids: Vec<_> = set.iter().map(Target::id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(set.alive_count(), 2);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut set = TargetSet::default();
        let mut rng = rng();
        let id = set.spawn(Vec3::new(0.0, 2.5, 8.0));

        assert!(set.destroy(id, &mut rng));
        let particles = set.get(id).unwrap().particles().to_vec();
        assert_eq!(particles.len(), 20);

        assert!(!set.destroy(id, &mut rng));
        let target = set.get(id).unwrap();
        assert!(target.is_destroyed());
        assert_eq!(target.state(), TargetState::Destroying);
        assert_eq!(target.particles(), &particles[..]);
    }

    #[test]
    fn test_destroy_unknown_is_noop() {
        let mut set = TargetSet::default();
        assert!(!set.destroy(TargetId(99), &mut rng()));
    }

    #[test]
    fn test_decay_runs_then_removes() {
        let mut set = TargetSet::default();
        let mut rng = rng();
        let keep = set.spawn(Vec3::new(5.0, 2.5, 10.0));
        let id = set.spawn(Vec3::new(0.0, 2.5, 8.0));
        set.destroy(id, &mut rng);

        let removed = set.advance(0.25);
        assert!(removed.is_empty());
        let t = set.get(id).unwrap().transform();
        assert_relative_eq!(t.scale, 0.5, epsilon = 1e-5);
        assert_relative_eq!(t.yaw, 1.5, epsilon = 1e-5);
        assert_relative_eq!(t.sink, 0.75, epsilon = 1e-5);
        assert_relative_eq!(set.get(id).unwrap().position().y, 1.75, epsilon = 1e-5);

        let removed = set.advance(0.25);
        assert_eq!(removed, vec![id]);
        assert!(set.get(id).is_none());
        assert_eq!(set.state_of(id), Some(TargetState::Removed));
        assert_eq!(set.len(), 1);
        assert!(set.get(keep).unwrap().is_alive());
    }

    #[test]
    fn test_decay_takes_half_a_second_of_frames() {
        let mut set = TargetSet::default();
        let id = set.spawn(Vec3::ZERO);
        set.destroy(id, &mut rng());

        let mut frames = 0;
        while set.advance(DT).is_empty() {
            frames += 1;
            assert!(frames < 60);
        }
        assert!((29..=30).contains(&frames));
    }

    #[test]
    fn test_alive_targets_do_not_decay() {
        let mut set = TargetSet::default();
        let id = set.spawn(Vec3::new(1.0, 2.0, 3.0));
        assert!(set.advance(1.0).is_empty());
        let t = set.get(id).unwrap();
        assert_eq!(t.transform(), DecayTransform::IDENTITY);
        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(set.state_of(TargetId(5)), None);
    }
}
