//! Configuration types for loading installation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]      – tick rate and collision broad phase
//! - [`WallConfig`]        – grid size, ball radius, smoothing window, restoring rate
//! - [`ForceConfig`]       – burst size, force radius, power rate, lifetime, spread
//! - [`CollisionConfig`]   – masses used by the elastic impulse
//! - [`CalibrationConfig`] – sensor-to-simulation scale
//! - [`ScenarioConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every section and field is optional, missing values fall back to the
//! defaults shown here:
//!
//! ```yaml
//! engine:
//!   broad_phase: "all_pairs"  # or "buckets"
//!   tick_hz: 60.0
//!
//! wall:
//!   grid_width: 40
//!   grid_height: 20
//!   ball_radius: 5.0
//!   neighbor_window: 10       # Chebyshev radius d of the smoothing block
//!   restoring_rate: 0.0005
//!
//! force:
//!   spawn_count: 500
//!   force_radius: 1.0
//!   power_rate: 0.4
//!   max_age_ms: 5000
//!   spread_rate: 0.05
//!
//! collision:
//!   m1: 1.0                   # wall particle mass
//!   m2: 1.0                   # force particle mass
//!
//! calibration:
//!   scale: 100.0
//!
//! seed: 42                    # omit for an entropy-seeded spray
//! ```
//!
//! The engine then maps this configuration into its runtime [`Scenario`]
//! (see `simulation::scenario`).
//!
//! [`Scenario`]: crate::simulation::scenario::Scenario

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

/// Errors raised while loading or validating a scenario file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Collision candidate search used by the engine
/// `broad_phase: "all_pairs"` or `broad_phase: "buckets"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadPhaseConfig {
    #[default]
    #[serde(rename = "all_pairs")] // every wall particle against every force particle
    AllPairs,

    #[serde(rename = "buckets")] // force particles hashed into a uniform grid, neighbouring cells only
    Buckets,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub broad_phase: BroadPhaseConfig, // collision candidate search
    pub tick_hz: f64,                  // fixed simulation rate of the viewer/headless loop
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            broad_phase: BroadPhaseConfig::AllPairs,
            tick_hz: 60.0,
        }
    }
}

/// Rest surface made of wall particles
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WallConfig {
    pub grid_width: usize,    // columns
    pub grid_height: usize,   // rows
    pub ball_radius: f64,     // wall particle radius, spacing is twice this
    pub neighbor_window: usize, // smoothing block is (2d+1)^2 minus self
    pub restoring_rate: f64,  // fraction of (rest - x) added to velocity each tick
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 20,
            ball_radius: 5.0,
            neighbor_window: 10,
            restoring_rate: 0.0005,
        }
    }
}

/// Transient force particles injected by the tracked hand
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ForceConfig {
    pub spawn_count: usize, // particles per burst
    pub force_radius: f64,  // collision radius of a force particle
    pub power_rate: f64,    // scale applied to the shoulder->hand vector
    pub max_age_ms: u64,    // lifetime before pruning
    pub spread_rate: f64,   // spread scale per unit of spine-base/left-hand distance
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            spawn_count: 500,
            force_radius: 1.0,
            power_rate: 0.4,
            max_age_ms: 5000,
            spread_rate: 0.05,
        }
    }
}

/// Masses of the elastic impulse
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CollisionConfig {
    pub m1: f64, // wall particle
    pub m2: f64, // force particle
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { m1: 1.0, m2: 1.0 }
    }
}

/// Sensor space -> simulation space mapping
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CalibrationConfig {
    pub scale: f64, // uniform scale, y and z are additionally mirrored
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self { scale: 100.0 }
    }
}

/// Parse a `--log-level` value (`trace`, `debug`, `info`, `warn` or `error`,
/// any case). Anything else is rejected rather than defaulted.
pub fn parse_log_level(level: &str) -> Result<Level, ConfigError> {
    level
        .parse::<Level>()
        .map_err(|_| ConfigError::invalid("log_level", format!("expected trace, debug, info, warn or error, got {level:?}")))
}

/// Accepted range of `engine.tick_hz`
pub const MIN_TICK_HZ: f64 = 1.0;
pub const MAX_TICK_HZ: f64 = 10_000.0;

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub wall: WallConfig,
    pub force: ForceConfig,
    pub collision: CollisionConfig,
    pub calibration: CalibrationConfig,
    pub seed: Option<u64>,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the physics cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.wall;
        if w.grid_width == 0 || w.grid_height == 0 {
            return Err(ConfigError::invalid("wall.grid_width/grid_height", "grid must have at least one row and column"));
        }
        if !(w.ball_radius > 0.0) {
            return Err(ConfigError::invalid("wall.ball_radius", format!("must be > 0, got {}", w.ball_radius)));
        }
        if w.neighbor_window == 0 {
            // a zero window has no neighbours to smooth over
            return Err(ConfigError::invalid("wall.neighbor_window", "must be >= 1"));
        }
        if !w.restoring_rate.is_finite() {
            return Err(ConfigError::invalid("wall.restoring_rate", "must be finite"));
        }

        let f = &self.force;
        if !(f.force_radius > 0.0) {
            return Err(ConfigError::invalid("force.force_radius", format!("must be > 0, got {}", f.force_radius)));
        }
        if !f.power_rate.is_finite() || !f.spread_rate.is_finite() {
            return Err(ConfigError::invalid("force.power_rate/spread_rate", "must be finite"));
        }

        let c = &self.collision;
        if !(c.m1 + c.m2 > 0.0) {
            return Err(ConfigError::invalid("collision.m1/m2", format!("mass sum must be > 0, got {}", c.m1 + c.m2)));
        }

        if !(MIN_TICK_HZ..=MAX_TICK_HZ).contains(&self.engine.tick_hz) {
            return Err(ConfigError::invalid(
                "engine.tick_hz",
                format!("must be within {MIN_TICK_HZ}..={MAX_TICK_HZ}, got {}", self.engine.tick_hz),
            ));
        }
        if !(self.calibration.scale > 0.0) {
            return Err(ConfigError::invalid("calibration.scale", format!("must be > 0, got {}", self.calibration.scale)));
        }

        Ok(())
    }
}
