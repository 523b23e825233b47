use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INITIAL_AMMO: u32 = 1;
pub const DEFAULT_INITIAL_BLAST_RADIUS: u32 = 2;
pub const DEFAULT_INITIAL_BOMB_LIFE: u32 = 9;
/// Countdown value at which a bomb goes off.
pub const TERMINAL_BOMB_LIFE: u32 = 0;
/// Remaining life reported for every flame in a simulator export.
pub const EXPORTED_FLAME_LIFE: u32 = 2;

/// Game constants and self-tracking switches for the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub initial_ammo: u32,
    pub initial_blast_radius: u32,
    pub initial_bomb_life: u32,
    /// Track the controlling agent alongside its opponents.
    pub track_self: bool,
    /// Overwrite the self agent's inferred abilities with its own observation.
    pub self_authoritative: bool,
    /// Log per-tick tracker metrics at debug level.
    pub log_metrics: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            initial_ammo: DEFAULT_INITIAL_AMMO,
            initial_blast_radius: DEFAULT_INITIAL_BLAST_RADIUS,
            initial_bomb_life: DEFAULT_INITIAL_BOMB_LIFE,
            track_self: true,
            self_authoritative: true,
            log_metrics: false,
        }
    }
}

impl EstimatorConfig {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let cfg: EstimatorConfig = serde_yaml::from_reader(BufReader::new(file)).map_err(
            |source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            },
        )?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.initial_bomb_life <= TERMINAL_BOMB_LIFE {
            return Err(ValidationError::InvalidField {
                field: "initial_bomb_life".to_string(),
                message: "bomb life must be at least 1".to_string(),
            });
        }
        if self.initial_blast_radius == 0 {
            return Err(ValidationError::InvalidField {
                field: "initial_blast_radius".to_string(),
                message: "blast radius must be at least 1".to_string(),
            });
        }
        if self.self_authoritative && !self.track_self {
            return Err(ValidationError::InvalidField {
                field: "self_authoritative".to_string(),
                message: "requires track_self".to_string(),
            });
        }
        Ok(())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |raw: String| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON");

        let initial_ammo = read("POMMER_INITIAL_AMMO")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(defaults.initial_ammo);

        let initial_blast_radius = read("POMMER_INITIAL_BLAST_RADIUS")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|value| *value >= 1)
            .unwrap_or(defaults.initial_blast_radius);

        let initial_bomb_life = read("POMMER_INITIAL_BOMB_LIFE")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|value| *value > TERMINAL_BOMB_LIFE)
            .unwrap_or(defaults.initial_bomb_life);

        let track_self = read("POMMER_TRACK_SELF")
            .map(flag)
            .unwrap_or(defaults.track_self);

        let self_authoritative = read("POMMER_SELF_AUTHORITATIVE")
            .map(flag)
            .unwrap_or(defaults.self_authoritative)
            && track_self;

        let log_metrics = read("POMMER_LOG_METRICS")
            .map(flag)
            .unwrap_or(defaults.log_metrics);

        Self {
            initial_ammo,
            initial_blast_radius,
            initial_bomb_life,
            track_self,
            self_authoritative,
            log_metrics,
        }
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
