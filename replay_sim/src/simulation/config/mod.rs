// replay_sim/src/simulation/config/mod.rs

//! Scenario configuration.
//!
//! A scenario describes the room, the ground-truth path, the noise of the
//! simulated sensors and the settings handed to the replay itself. Every
//! section is optional; missing ones fall back to a small square-room demo.

use crate::error::{Result, SimError};
use crate::simulation::trajectory::PathShape;
use crate::simulation::world::Room;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use replay_core::config::ProcessorConfig;
use replay_core::estimation::DeadReckoningConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =========================================================================
// == Top-Level Scenario ==
// =========================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)]
    pub simulation: Simulation,

    #[serde(default)]
    pub world: Room,

    #[serde(default)]
    pub path: PathShape,

    #[serde(default)]
    pub odometry: OdometryNoise,

    #[serde(default)]
    pub lidar: LidarConfig,

    #[serde(default)]
    pub estimator: DeadReckoningConfig,

    /// Settings of the replay itself (laser geometry, snapshots).
    #[serde(default)]
    pub processor: ProcessorConfig,
}

impl ScenarioConfig {
    /// Reads a scenario file, or the built-in defaults when `path` is `None`.
    /// The processor section is then overridden from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut scenario: ScenarioConfig = match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(SimError::MissingScenario(path.to_path_buf()));
                }
                tracing::info!("Loading scenario from: {}", path.display());
                Figment::new().merge(Toml::file(path)).extract()?
            }
            None => {
                tracing::info!("Using the built-in scenario");
                ScenarioConfig::default()
            }
        };
        scenario.processor = scenario.processor.with_env_overrides()?;
        Ok(scenario)
    }

    /// Rejects scenarios the generator cannot run and logs the ones that
    /// run but will not evaluate well (see [`ScenarioConfig::warnings`]).
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        if sim.steps == 0 {
            return Err(SimError::Scenario("`steps` must be positive".into()));
        }
        if !(sim.timestep > 0.0) {
            return Err(SimError::Scenario("`timestep` must be positive".into()));
        }
        if sim.ground_truth_every == 0 {
            return Err(SimError::Scenario(
                "`ground_truth_every` must be at least 1".into(),
            ));
        }
        if self.lidar.beams == 0 || !(self.lidar.max_range > 0.0) {
            return Err(SimError::Scenario(
                "the lidar needs at least one beam and a positive range".into(),
            ));
        }
        let (lower, upper) = self.path.bounds();
        if !self.world.contains(&lower) || !self.world.contains(&upper) {
            return Err(SimError::Scenario(format!(
                "the path spans ({:.2}, {:.2})..({:.2}, {:.2}) and leaves the {}x{} room",
                lower.x, lower.y, upper.x, upper.y, self.world.width, self.world.height
            )));
        }
        for warning in self.warnings() {
            tracing::warn!("{warning}");
        }
        Ok(())
    }

    /// Settings that are legal but defeat part of the replay.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.simulation.ground_truth_every > 1 {
            // The matcher reads the reference stream forward only. The first
            // scan landing on a record without a pose drains the stream.
            warnings.push(format!(
                "`ground_truth_every = {}` leaves records without a reference pose; \
                 scans are taken on arbitrary records, so most of them will not be scored",
                self.simulation.ground_truth_every
            ));
        }
        warnings
    }

    /// The scenario as TOML, with every default filled in.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Number of log records to generate.
    pub steps: usize,
    /// Time between two records [s].
    pub timestep: f64,
    /// Emit a ground-truth pose for every n-th record only.
    pub ground_truth_every: usize,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            steps: 600,
            timestep: 0.1,
            ground_truth_every: 1,
        }
    }
}

/// Zero-mean Gaussian noise added to every odometry increment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OdometryNoise {
    /// Per-axis translation noise [m].
    pub translation_stddev: f64,
    /// Heading noise [deg].
    pub rotation_stddev_deg: f64,
}

impl Default for OdometryNoise {
    fn default() -> Self {
        Self {
            translation_stddev: 0.005,
            rotation_stddev_deg: 0.2,
        }
    }
}

/// Beam count and noise of the simulated lidar. Its angles come from the
/// processor section so the replay projects scans consistently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LidarConfig {
    pub beams: usize,
    /// Range reported when no wall is hit [m].
    pub max_range: f64,
    pub range_noise_stddev: f64,
}

impl Default for LidarConfig {
    fn default() -> Self {
        Self {
            beams: 181,
            max_range: 20.0,
            range_noise_stddev: 0.01,
        }
    }
}
