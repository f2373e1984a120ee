//! Error types for the physics crate
//!
//! Collision queries and movement never fail; only configuration can be
//! rejected.

use thiserror::Error;

/// Physics configuration errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
