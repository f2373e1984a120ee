//! First-person character controller
//!
//! Integrates gravity, resolves horizontal motion with per-axis wall sliding,
//! then snaps the viewpoint to the ground. Horizontal and vertical motion are
//! resolved independently against the same [`CollisionQuery`].

use crate::config::MovementConfig;
use crate::query::{CollisionQuery, GroundQuery};
use dust_math::Vec3;

/// Kinematic player state, owned by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Eye position in world space
    pub position: Vec3,
    /// Vertical velocity in units/s
    pub velocity_y: f32,
    /// Standing on something that allows a jump
    pub grounded: bool,
}

impl PlayerState {
    fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            grounded: false,
        }
    }
}

/// Held movement keys for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// No movement
    pub const NONE: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    /// Straight ahead
    pub const FORWARD: Self = Self {
        forward: true,
        ..Self::NONE
    };

    /// Forward axis in {-1, 0, 1}; forward wins when both are held
    pub fn forward_axis(&self) -> f32 {
        if self.forward {
            1.0
        } else if self.backward {
            -1.0
        } else {
            0.0
        }
    }

    /// Strafe axis in {-1, 0, 1}; right wins when both are held
    pub fn strafe_axis(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }

    /// Whether no movement key is held
    pub fn is_idle(&self) -> bool {
        self.forward_axis() == 0.0 && self.strafe_axis() == 0.0
    }
}

/// How the horizontal part of a step resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalMove {
    /// Nothing requested
    Idle,
    /// Combined candidate was clear
    Free,
    /// Combined candidate blocked; the listed axes were committed
    Slid { x: bool, z: bool },
    /// Every candidate blocked
    Blocked,
}

/// What held the player up at the end of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Still in the air
    Airborne,
    /// Ground cast hit the ground plane
    Ground,
    /// Ground cast missed and the floor clamp applied
    Floor,
}

/// Result of one [`CharacterController::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub horizontal: HorizontalMove,
    /// Vertical candidate was blocked and velocity zeroed
    pub vertical_blocked: bool,
    pub support: Support,
}

impl StepOutcome {
    /// Outcome of a frame where the controller was inactive
    pub const FROZEN: Self = Self {
        horizontal: HorizontalMove::Idle,
        vertical_blocked: false,
        support: Support::Airborne,
    };
}

/// Gravity, walking, jumping and ground snapping for the player
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: MovementConfig,
    state: PlayerState,
    active: bool,
}

impl CharacterController {
    /// Create a controller at the configured spawn point, inactive
    pub fn new(config: MovementConfig) -> Self {
        let state = PlayerState::at(config.spawn());
        Self {
            config,
            state,
            active: false,
        }
    }

    /// Movement configuration
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Enter (true) or leave (false) the input-accepting mode
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            log::debug!("Character controller {}", if active { "locked" } else { "unlocked" });
        }
        self.active = active;
    }

    /// Whether updates move the player
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current player state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Current eye position
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Start a jump if grounded; returns whether it took effect
    pub fn jump(&mut self) -> bool {
        if !self.state.grounded {
            return false;
        }
        self.state.velocity_y += self.config.jump_velocity;
        self.state.grounded = false;
        true
    }

    /// Teleport back to spawn with no vertical velocity
    ///
    /// Bypasses collision.
    pub fn reset(&mut self) {
        self.state.position = self.config.spawn();
        self.state.velocity_y = 0.0;
        log::info!("Player reset to spawn {:?}", self.state.position.to_array());
    }

    /// Advance the player by `dt` seconds
    ///
    /// `facing` is the look direction; only its horizontal part is used.
    /// Does nothing while the controller is inactive.
    pub fn update<C, G>(
        &mut self,
        dt: f32,
        intent: MoveIntent,
        facing: Vec3,
        collision: &mut C,
        ground: &G,
    ) -> StepOutcome
    where
        C: CollisionQuery + ?Sized,
        G: GroundQuery + ?Sized,
    {
        if !self.active {
            return StepOutcome::FROZEN;
        }

        self.state.velocity_y += self.config.gravity * dt;

        let horizontal = self.move_horizontal(dt, intent, facing, collision);
        let vertical_blocked = self.move_vertical(dt, collision);
        let support = self.snap_to_ground(ground);

        log::trace!(
            "Player step: pos={:?} vy={:.3} {:?} {:?}",
            self.state.position.to_array(),
            self.state.velocity_y,
            horizontal,
            support
        );

        StepOutcome {
            horizontal,
            vertical_blocked,
            support,
        }
    }

    fn move_horizontal<C>(
        &mut self,
        dt: f32,
        intent: MoveIntent,
        facing: Vec3,
        collision: &mut C,
    ) -> HorizontalMove
    where
        C: CollisionQuery + ?Sized,
    {
        let forward = facing.horizontal().normalize_or_zero();
        let right = forward.cross(Vec3::UP).normalize_or_zero();
        let step = self.config.move_speed * dt;

        let delta = forward * (intent.forward_axis() * step) + right * (intent.strafe_axis() * step);
        if delta.is_near_zero() {
            return HorizontalMove::Idle;
        }

        let origin = self.state.position;
        let candidate = origin + Vec3::new(delta.x, 0.0, delta.z);
        if !collision.check_collision(candidate) {
            self.state.position = candidate;
            return HorizontalMove::Free;
        }

        log::trace!("Combined move blocked, sliding per axis");

        let mut slid_x = false;
        if delta.x != 0.0 {
            let along_x = Vec3::new(origin.x + delta.x, origin.y, origin.z);
            if !collision.check_collision(along_x) {
                self.state.position = along_x;
                slid_x = true;
            }
        }

        let mut slid_z = false;
        if delta.z != 0.0 {
            let current = self.state.position;
            let along_z = Vec3::new(current.x, current.y, current.z + delta.z);
            if !collision.check_collision(along_z) {
                self.state.position = along_z;
                slid_z = true;
            }
        }

        if slid_x || slid_z {
            HorizontalMove::Slid { x: slid_x, z: slid_z }
        } else {
            HorizontalMove::Blocked
        }
    }

    fn move_vertical<C>(&mut self, dt: f32, collision: &mut C) -> bool
    where
        C: CollisionQuery + ?Sized,
    {
        let previous_y = self.state.position.y;
        let candidate_y = previous_y + self.state.velocity_y * dt;
        let candidate = Vec3::new(self.state.position.x, candidate_y, self.state.position.z);

        if !collision.check_collision(candidate) {
            self.state.position = candidate;
            return false;
        }

        // Landing on or bumping into geometry: stop vertical motion in place
        self.state.velocity_y = 0.0;
        if candidate_y < previous_y {
            self.state.position.y = previous_y;
        }
        true
    }

    fn snap_to_ground<G>(&mut self, ground: &G) -> Support
    where
        G: GroundQuery + ?Sized,
    {
        let position = self.state.position;
        let probe_origin = Vec3::new(
            position.x,
            position.y + self.config.ground_probe_height,
            position.z,
        );
        let reach = self.config.ground_probe_distance;

        if let Some(hit) = ground.cast_down(probe_origin, reach) {
            if hit.distance < reach {
                self.state.position.y = hit.point.y + self.config.eye_height;
                self.state.velocity_y = 0.0;
                self.state.grounded = true;
                return Support::Ground;
            }
        }

        let floor = ground.surface_height() + self.config.eye_height;
        if self.state.position.y < floor {
            log::trace!("Ground cast missed, clamping to floor height {}", floor);
            self.state.position.y = floor;
            self.state.velocity_y = 0.0;
            self.state.grounded = true;
            return Support::Floor;
        }

        self.state.grounded = false;
        Support::Airborne
    }
}
