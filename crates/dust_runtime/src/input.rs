//! Per-frame input snapshot
//!
//! Movement keys are held state; fire, jump, reset and pause are edges that
//! are true only on the frame the key or button went down. Pointer capture is
//! reported by the platform layer when it gains or loses the lock.

use dust_physics::MoveIntent;

/// Input sampled for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,

    /// Primary fire pressed this frame
    pub fire: bool,
    /// Jump pressed this frame
    pub jump: bool,
    /// Reset pressed this frame
    pub reset: bool,
    /// Pause toggle pressed this frame
    pub pause: bool,

    /// `Some(true)` when the pointer lock was requested or acquired,
    /// `Some(false)` when it was lost
    pub capture: Option<bool>,

    /// Pointer motion in pixels since the last frame (x right, y down)
    pub look_delta: [f32; 2],
}

impl InputState {
    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Held movement keys
    pub fn move_intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
        }
    }

    /// Set forward held
    pub fn with_forward(mut self) -> Self {
        self.forward = true;
        self
    }

    /// Set fire edge
    pub fn with_fire(mut self) -> Self {
        self.fire = true;
        self
    }

    /// Set jump edge
    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    /// Report a pointer capture change
    pub fn with_capture(mut self, captured: bool) -> Self {
        self.capture = Some(captured);
        self
    }

    /// Add pointer motion
    pub fn with_look(mut self, dx: f32, dy: f32) -> Self {
        self.look_delta = [dx, dy];
        self
    }
}
