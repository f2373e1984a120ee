//! Dust Runtime - Frame Scheduler and Arena
//!
//! Ties the physics and combat crates together into a single per-frame
//! update driven by an input snapshot.
//!
//! # Example
//!
//! ```ignore
//! use dust_runtime::prelude::*;
//!
//! let config = GameConfig::load_or_default()?;
//! let mut world = GameWorld::new(config, &Arena::dust_yard())?;
//!
//! world.update(1.0 / 60.0, &InputState::idle().with_capture(true));
//! let report = world.update(1.0 / 60.0, &InputState::idle().with_forward().with_fire());
//! println!("{}", world.debug_info());
//! ```

pub mod arena;
pub mod config;
pub mod input;
pub mod viewpoint;
pub mod world;

pub mod prelude {
    pub use crate::arena::Arena;
    pub use crate::config::{ConfigError, GameConfig, LookConfig, Result};
    pub use crate::input::InputState;
    pub use crate::viewpoint::Viewpoint;
    pub use crate::world::{FrameReport, GameWorld};
}

pub use prelude::*;
