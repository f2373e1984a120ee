//! Game configuration
//!
//! Every tunable of the simulation in one TOML document. All sections are
//! optional; missing values fall back to the built-in defaults.
//!
//! ```toml
//! seed = 7
//!
//! [movement]
//! gravity = -30.0
//! move_speed = 8.0
//!
//! [projectile]
//! capacity = 50
//! lifetime = 5.0
//! ```

use dust_combat::{CombatError, DecayConfig, ProjectileConfig, WeaponConfig};
use dust_physics::{CapsuleConfig, GroundPlane, MovementConfig, PhysicsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "DUST_CONFIG";

/// Environment variable overriding the RNG seed
pub const SEED_ENV: &str = "DUST_SEED";

/// Files searched, in order, when no explicit path is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["dust.toml", "config/dust.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Mouse look tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians per pixel of pointer motion
    pub sensitivity: f32,
    /// Pitch limit in radians (either direction)
    pub max_pitch: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            max_pitch: dust_math::consts::FRAC_PI_2 - 0.001,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for particle bursts
    pub seed: u64,
    pub capsule: CapsuleConfig,
    pub movement: MovementConfig,
    pub look: LookConfig,
    pub ground: GroundPlane,
    pub projectile: ProjectileConfig,
    pub weapon: WeaponConfig,
    pub decay: DecayConfig,

    /// File this config was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl GameConfig {
    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the standard locations
    ///
    /// `DUST_CONFIG` wins over the search list. With no file found the
    /// defaults are used. `DUST_SEED` overrides the seed either way.
    pub fn load_or_default() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let candidates: Vec<PathBuf> = DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect();
        let mut config = Self::resolve(explicit.as_deref(), &candidates)?;

        if let Ok(seed) = std::env::var(SEED_ENV) {
            match seed.trim().parse() {
                Ok(seed) => {
                    config.seed = seed;
                    log::info!("Seed from env: {}", seed);
                }
                Err(_) => log::warn!("Ignoring unparsable {}={:?}", SEED_ENV, seed),
            }
        }

        Ok(config)
    }

    /// Pick the config file: an explicit path must load, otherwise the first
    /// existing candidate is used, otherwise defaults
    pub fn resolve(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load(path)?;
            log::info!("Loaded config from {} ({})", path.display(), CONFIG_ENV);
            return Ok(config);
        }

        for path in candidates {
            if path.is_file() {
                let config = Self::load(path)?;
                log::info!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.capsule.validate()?;
        self.movement.validate()?;
        self.projectile.validate()?;
        self.weapon.validate()?;
        self.decay.validate()?;

        if !(self.look.sensitivity >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "look sensitivity must not be negative, got {}",
                self.look.sensitivity
            )));
        }
        if !(self.look.max_pitch > 0.0 && self.look.max_pitch < dust_math::consts::FRAC_PI_2) {
            return Err(ConfigError::Invalid(format!(
                "max pitch must be in (0, pi/2), got {}",
                self.look.max_pitch
            )));
        }
        if !(self.ground.half_width > 0.0 && self.ground.half_depth > 0.0) {
            return Err(ConfigError::Invalid("ground extents must be positive".into()));
        }
        if !self.ground.height.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "ground height must be finite, got {}",
                self.ground.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_ground_height_must_be_finite() {
        assert!(GameConfig::from_toml_str("[ground]\nheight = nan").is_err());
        assert!(GameConfig::from_toml_str("[ground]\nheight = -2.5").is_ok());
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.projectile.capacity, 50);
        assert_eq!(config.movement.spawn_point, [0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            seed = 42

            [movement]
            move_speed = 12.0

            [projectile]
            capacity = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.movement.move_speed, 12.0);
        assert_eq!(config.movement.gravity, -30.0);
        assert_eq!(config.projectile.capacity, 8);
        assert_eq!(config.projectile.lifetime, 5.0);
        assert_eq!(config.capsule.radius, 0.5);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = GameConfig::from_toml_str("[capsule]\nradius = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Physics(_)));

        let err = GameConfig::from_toml_str("[projectile]\ncapacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Combat(_)));

        let err = GameConfig::from_toml_str("[look]\nmax_pitch = 3.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_toml_str("seed = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[weapon]\ncooldown = 0.5").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.weapon.cooldown, 0.5);
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here/dust.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_resolve_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&second, "seed = 2").unwrap();

        // First candidate missing, second used
        let config = GameConfig::resolve(None, &[first.clone(), second.clone()]).unwrap();
        assert_eq!(config.seed, 2);

        // Explicit path wins
        std::fs::write(&first, "seed = 1").unwrap();
        let config = GameConfig::resolve(Some(&first), &[second.clone()]).unwrap();
        assert_eq!(config.seed, 1);

        // Explicit path that does not exist is an error, not a fallback
        let missing = dir.path().join("missing.toml");
        assert!(GameConfig::resolve(Some(&missing), &[second]).is_err());

        // Nothing found: defaults
        let config = GameConfig::resolve(None, &[missing]).unwrap();
        assert_eq!(config.seed, 0);
        assert!(config.source.is_none());
    }
}
