//! Projectile pool
//!
//! A fixed set of slots allocated once. Firing takes the first free slot; when
//! every slot is in flight the oldest projectile is recycled. Activation order
//! is tracked in a queue so "oldest" is an O(1) lookup.

use crate::config::ProjectileConfig;
use crate::target::{TargetId, TargetSet};
use dust_math::Vec3;
use rand::Rng;
use std::collections::VecDeque;

/// Index of a projectile slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

/// One pooled projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    /// Units per second
    pub velocity: Vec3,
    /// Seconds left before the slot is released
    pub lifetime: f32,
    active: bool,
}

impl Projectile {
    const IDLE: Self = Self {
        position: Vec3::ZERO,
        velocity: Vec3::ZERO,
        lifetime: 0.0,
        active: false,
    };

    /// Whether the projectile is in flight
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// A projectile reached a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub slot: SlotId,
    pub target: TargetId,
    /// Projectile position at the time of the hit
    pub point: Vec3,
}

/// Bounded pool of projectiles
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    config: ProjectileConfig,
    slots: Vec<Projectile>,
    /// Active slots, oldest first
    order: VecDeque<SlotId>,
}

impl ProjectilePool {
    /// Create a pool with `config.capacity` idle slots
    pub fn new(config: ProjectileConfig) -> Self {
        let capacity = config.capacity;
        log::debug!("Projectile pool created with {} slots", capacity);
        Self {
            config,
            slots: vec![Projectile::IDLE; capacity],
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Create a pool with the default tuning and the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(ProjectileConfig::default().with_capacity(capacity))
    }

    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of projectiles in flight
    pub fn active_count(&self) -> usize {
        self.order.len()
    }

    /// Get a slot
    pub fn get(&self, slot: SlotId) -> Option<&Projectile> {
        self.slots.get(slot.0)
    }

    /// Projectiles in flight with their slots
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &Projectile)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active)
            .map(|(i, p)| (SlotId(i), p))
    }

    /// Launch a projectile from `origin` along `direction` at `speed` units/s
    ///
    /// Returns `None` only for an empty pool or a zero-length direction.
    pub fn fire(&mut self, origin: Vec3, direction: Vec3, speed: f32) -> Option<SlotId> {
        let direction = direction.normalize_or_zero();
        if direction.is_near_zero() {
            log::debug!("Ignoring fire request with no direction");
            return None;
        }

        let slot = match self.slots.iter().position(|p| !p.active) {
            Some(free) => SlotId(free),
            None => {
                let oldest = self.order.pop_front()?;
                log::trace!("Projectile pool exhausted, recycling slot {}", oldest.0);
                oldest
            }
        };

        self.slots[slot.0] = Projectile {
            position: origin,
            velocity: direction * speed,
            lifetime: self.config.lifetime,
            active: true,
        };
        self.order.push_back(slot);

        debug_assert!(self.order.len() <= self.slots.len());
        Some(slot)
    }

    /// Age every projectile by `dt` and move the survivors
    ///
    /// Returns the slots released this step.
    pub fn advance(&mut self, dt: f32) -> Vec<SlotId> {
        let mut expired = Vec::new();
        if !(dt > 0.0) {
            return expired;
        }

        for (index, projectile) in self.slots.iter_mut().enumerate() {
            if !projectile.active {
                continue;
            }

            projectile.lifetime -= dt;

            if projectile.lifetime <= 0.0 {
                projectile.active = false;
                expired.push(SlotId(index));
            } else {
                projectile.position += projectile.velocity * dt;
            }
        }

        if !expired.is_empty() {
            self.order.retain(|slot| !expired.contains(slot));
            log::trace!("{} projectiles expired", expired.len());
        }
        expired
    }

    /// Test every projectile against the live targets
    ///
    /// The first target within the hit radius (in set order) is destroyed and
    /// the projectile released; each projectile hits at most once.
    pub fn resolve_hits<R>(&mut self, targets: &mut TargetSet, rng: &mut R) -> Vec<HitEvent>
    where
        R: Rng + ?Sized,
    {
        let radius = self.config.hit_radius;
        let mut hits = Vec::new();

        for (index, projectile) in self.slots.iter_mut().enumerate() {
            if !projectile.active {
                continue;
            }

            let point = projectile.position;
            let Some(target) = targets
                .iter()
                .find(|t| t.is_alive() && t.position().distance(point) < radius)
                .map(|t| t.id())
            else {
                continue;
            };

            targets.destroy(target, rng);
            projectile.active = false;
            hits.push(HitEvent {
                slot: SlotId(index),
                target,
                point,
            });
        }

        if !hits.is_empty() {
            self.order.retain(|slot| !hits.iter().any(|hit| hit.slot == *slot));
        }
        hits
    }

    /// Release every projectile
    pub fn clear(&mut self) {
        for projectile in &mut self.slots {
            projectile.active = false;
        }
        self.order.clear();
    }
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new(ProjectileConfig::default())
    }
}
