//! Weapon timing
//!
//! Gates fire requests behind a cooldown and a short "shot in progress"
//! window, and keeps the muzzle flash and recoil timers that a renderer reads.

use crate::config::WeaponConfig;
use dust_math::Vec3;

/// Where and which way a shot leaves the weapon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Player weapon state
#[derive(Debug, Clone)]
pub struct Weapon {
    config: WeaponConfig,
    /// Time until the next shot is allowed
    cooldown: f32,
    /// Time until the current shot stops counting as in progress
    shooting: f32,
    flash: f32,
    recoil: f32,
    shots_fired: u64,
}

impl Weapon {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            cooldown: 0.0,
            shooting: 0.0,
            flash: 0.0,
            recoil: 0.0,
            shots_fired: 0,
        }
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    /// Check if can fire
    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0 && self.shooting <= 0.0
    }

    /// Attempt to fire
    ///
    /// Returns the shot leaving an eye at `eye` with view basis
    /// (`forward`, `right`, `up`), or `None` while the weapon is gated.
    pub fn fire(&mut self, eye: Vec3, forward: Vec3, right: Vec3, up: Vec3) -> Option<Shot> {
        if !self.can_fire() {
            log::trace!("Fire request ignored, weapon cooling down");
            return None;
        }

        self.cooldown = self.config.cooldown;
        self.shooting = self.config.shot_duration;
        self.flash = self.config.muzzle_flash;
        self.recoil = self.config.recoil;
        self.shots_fired += 1;

        Some(Shot {
            origin: self.muzzle_position(eye, forward, right, up),
            direction: forward,
        })
    }

    /// Muzzle position for an eye at `eye` with the given view basis
    pub fn muzzle_position(&self, eye: Vec3, forward: Vec3, right: Vec3, up: Vec3) -> Vec3 {
        let offset = self.config.muzzle_offset();
        eye + right * offset.x + up * offset.y + forward * offset.z
    }

    /// Tick every timer
    pub fn update(&mut self, delta_time: f32) {
        for timer in [
            &mut self.cooldown,
            &mut self.shooting,
            &mut self.flash,
            &mut self.recoil,
        ] {
            if *timer > 0.0 {
                *timer = (*timer - delta_time).max(0.0);
            }
        }
    }

    /// Whether the muzzle flash is visible
    pub fn is_flashing(&self) -> bool {
        self.flash > 0.0
    }

    /// Whether the weapon model is kicked back
    pub fn is_recoiling(&self) -> bool {
        self.recoil > 0.0
    }

    /// Remaining cooldown in seconds
    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    pub fn shots_fired(&self) -> u64 {
        self.shots_fired
    }

    /// Clear every timer
    pub fn reset(&mut self) {
        self.cooldown = 0.0;
        self.shooting = 0.0;
        self.flash = 0.0;
        self.recoil = 0.0;
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WeaponConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn fire(weapon: &mut Weapon) -> Option<Shot> {
        weapon.fire(Vec3::new(0.0, 1.6, 0.0), Vec3::NEG_Z, Vec3::X, Vec3::Y)
    }

    #[test]
    fn test_muzzle_offset_in_view_space() {
        let mut weapon = Weapon::default();
        let shot = fire(&mut weapon).unwrap();
        assert_relative_eq!(shot.origin.x, 0.4);
        assert_relative_eq!(shot.origin.y, 1.2);
        assert_relative_eq!(shot.origin.z, -1.2);
        assert_eq!(shot.direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_cooldown_gates_fire() {
        let mut weapon = Weapon::default();
        assert!(fire(&mut weapon).is_some());
        assert!(fire(&mut weapon).is_none());

        // 0.1 s in: still cooling down
        for _ in 0..6 {
            weapon.update(DT);
        }
        assert!(!weapon.can_fire());
        assert!(fire(&mut weapon).is_none());

        for _ in 0..7 {
            weapon.update(DT);
        }
        assert!(weapon.can_fire());
        assert!(fire(&mut weapon).is_some());
        assert_eq!(weapon.shots_fired(), 2);
    }

    #[test]
    fn test_effect_timers_expire() {
        let mut weapon = Weapon::default();
        fire(&mut weapon);
        assert!(weapon.is_flashing());
        assert!(weapon.is_recoiling());

        for _ in 0..4 {
            weapon.update(DT);
        }
        assert!(!weapon.is_flashing());
        assert!(weapon.is_recoiling());

        for _ in 0..3 {
            weapon.update(DT);
        }
        assert!(!weapon.is_recoiling());
    }

    #[test]
    fn test_reset_clears_timers() {
        let mut weapon = Weapon::default();
        fire(&mut weapon);
        weapon.reset();
        assert!(weapon.can_fire());
        assert!(!weapon.is_flashing());
    }
}
