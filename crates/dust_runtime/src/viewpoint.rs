//! First-person viewpoint
//!
//! Yaw 0 looks down -Z; positive yaw turns left (counter-clockwise seen from
//! above). Positive pitch looks up.

use crate::config::LookConfig;
use dust_math::Vec3;

/// Eye position plus look angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub position: Vec3,
    /// Radians about +Y
    pub yaw: f32,
    /// Radians above the horizon
    pub pitch: f32,
}

impl Viewpoint {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Apply pointer motion in pixels
    pub fn look(&mut self, delta: [f32; 2], config: &LookConfig) {
        let [dx, dy] = delta;
        self.yaw -= dx * config.sensitivity;
        self.pitch = (self.pitch - dy * config.sensitivity).clamp(-config.max_pitch, config.max_pitch);
    }

    /// Unit look direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Unit right vector (always horizontal)
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// Unit up vector of the view
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_basis() {
        let view = Viewpoint::default();
        assert_eq!(view.forward(), Vec3::new(-0.0, 0.0, -1.0));
        assert_eq!(view.right(), Vec3::X);
        let up = view.up();
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_right_matches_forward_cross_up() {
        let mut view = Viewpoint::default();
        view.yaw = 0.7;
        let expected = view.forward().horizontal().cross(Vec3::UP).normalize();
        let right = view.right();
        assert_relative_eq!(right.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(right.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn test_look_turns_and_clamps_pitch() {
        let config = LookConfig::default();
        let mut view = Viewpoint::default();

        // Moving the pointer right turns right
        view.look([100.0, 0.0], &config);
        assert_relative_eq!(view.yaw, -0.2, epsilon = 1e-6);
        assert!(view.forward().x > 0.0);

        // Far upward motion clamps just short of vertical
        view.look([0.0, -10_000.0], &config);
        assert_relative_eq!(view.pitch, config.max_pitch);
        assert!(view.forward().y < 1.0);
    }
}
