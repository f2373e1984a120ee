//! Error types for the combat crate

use thiserror::Error;

/// Combat configuration errors
#[derive(Debug, Error)]
pub enum CombatError {
    /// Invalid configuration
    #[error("Invalid combat configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for combat operations
pub type Result<T> = std::result::Result<T, CombatError>;
