// replay_core/src/config.rs

//! Processor configuration.
//!
//! Values are layered with `figment`: built-in defaults, then an optional TOML
//! file, then environment variables. Keys are matched case-insensitively, so
//! `SAVE_EACH_STEP` and `save_each_step` name the same option.

use crate::error::{ReplayError, Result};
use crate::io::SnapshotWriter;
use crate::perception::ScanProjector;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::Dict,
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables the processor reads.
pub const ENV_KEYS: [&str; 4] = [
    "LASER_START_ANGLE",
    "LASER_ANGULAR_RES",
    "SAVE_EACH_STEP",
    "OUTPUT_DIR",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Direction of the first beam [deg].
    #[serde(alias = "LASER_START_ANGLE")]
    pub laser_start_angle: f64,
    /// Angle between consecutive beams [deg].
    #[serde(alias = "LASER_ANGULAR_RES")]
    pub laser_angular_res: f64,
    /// Snapshot every N processed scans. 0 disables snapshots.
    #[serde(alias = "SAVE_EACH_STEP")]
    pub save_each_step: u64,
    #[serde(alias = "OUTPUT_DIR")]
    pub output_dir: PathBuf,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            laser_start_angle: -90.0,
            laser_angular_res: 1.0,
            save_each_step: 0,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ProcessorConfig {
    /// Loads the layered configuration. `path`, when given, must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Ok(Self::figment(path)?.extract()?)
    }

    /// The provider stack behind [`ProcessorConfig::load`], for callers that
    /// want to merge further layers on top.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ReplayError::io(
                    path,
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "configuration file not found",
                    ),
                ));
            }
            tracing::debug!(path = %path.display(), "loading processor configuration");
            let table: Dict = Figment::new().merge(Toml::file(path)).extract()?;
            figment = figment.merge(Serialized::defaults(lowercase_keys(table)));
        }
        // Env keys are lower-cased by the provider itself.
        Ok(figment.merge(Env::raw().only(&ENV_KEYS)))
    }

    /// Layers the environment variables on top of an already resolved config,
    /// e.g. one embedded in a larger scenario file.
    pub fn with_env_overrides(self) -> Result<Self> {
        Ok(Figment::from(Serialized::defaults(self))
            .merge(Env::raw().only(&ENV_KEYS))
            .extract()?)
    }

    pub fn projector(&self) -> ScanProjector {
        ScanProjector::from_degrees(self.laser_start_angle, self.laser_angular_res)
    }

    /// `None` when snapshots are disabled.
    pub fn snapshot_writer(&self) -> Option<SnapshotWriter> {
        (self.save_each_step > 0).then(|| SnapshotWriter::new(&self.output_dir))
    }
}

/// Folds top-level keys to lower case so upper-case files merge with the
/// defaults instead of shadowing them.
pub fn lowercase_keys(table: Dict) -> Dict {
    table
        .into_iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use figment::Jail;

    #[test]
    fn defaults_match_the_documented_values() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = ProcessorConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, ProcessorConfig::default());
            assert_abs_diff_eq!(config.laser_start_angle, -90.0);
            assert_abs_diff_eq!(config.laser_angular_res, 1.0);
            assert_eq!(config.save_each_step, 0);
            assert_eq!(config.output_dir, PathBuf::from("."));
            assert!(config.snapshot_writer().is_none());
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "replay.toml",
                r#"
                    LASER_START_ANGLE = -45.0
                    save_each_step = 3
                "#,
            )?;
            let config = ProcessorConfig::load(Some(Path::new("replay.toml")))
                .map_err(|e| e.to_string())?;
            assert_abs_diff_eq!(config.laser_start_angle, -45.0);
            assert_abs_diff_eq!(config.laser_angular_res, 1.0);
            assert_eq!(config.save_each_step, 3);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("replay.toml", "SAVE_EACH_STEP = 3\nOUTPUT_DIR = \"from_file\"")?;
            jail.set_env("SAVE_EACH_STEP", 5);
            jail.set_env("LASER_ANGULAR_RES", 0.5);
            let config = ProcessorConfig::load(Some(Path::new("replay.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.save_each_step, 5);
            assert_abs_diff_eq!(config.laser_angular_res, 0.5);
            assert_eq!(config.output_dir, PathBuf::from("from_file"));
            assert_eq!(
                config.snapshot_writer().map(|w| w.output_dir().to_path_buf()),
                Some(PathBuf::from("from_file"))
            );
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_config_errors() {
        Jail::expect_with(|jail| {
            jail.create_file("replay.toml", "SAVE_EACH_STEP = \"often\"")?;
            match ProcessorConfig::load(Some(Path::new("replay.toml"))) {
                Err(ReplayError::Config(_)) => Ok(()),
                other => Err(format!("expected a config error, got {other:?}").into()),
            }
        });
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        Jail::expect_with(|_jail| {
            match ProcessorConfig::load(Some(Path::new("absent.toml"))) {
                Err(ReplayError::Io { path, .. }) => {
                    assert_eq!(path, PathBuf::from("absent.toml"));
                    Ok(())
                }
                other => Err(format!("expected an I/O error, got {other:?}").into()),
            }
        });
    }

    #[test]
    fn embedded_config_still_honours_the_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("OUTPUT_DIR", "snapshots");
            let embedded = ProcessorConfig {
                save_each_step: 10,
                ..ProcessorConfig::default()
            };
            let config = embedded.with_env_overrides().map_err(|e| e.to_string())?;
            assert_eq!(config.save_each_step, 10);
            assert_eq!(config.output_dir, PathBuf::from("snapshots"));
            Ok(())
        });
    }

    #[test]
    fn projector_uses_degrees() {
        let projector = ProcessorConfig::default().projector();
        assert_abs_diff_eq!(projector.start_angle(), -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(projector.angular_resolution(), 1.0_f64.to_radians(), epsilon = 1e-12);
    }
}
