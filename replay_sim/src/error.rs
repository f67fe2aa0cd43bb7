// replay_sim/src/error.rs

use replay_core::error::ReplayError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a simulated replay.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error("scenario file `{}` not found", .0.display())]
    MissingScenario(PathBuf),

    #[error("failed to parse scenario: {0}")]
    Config(#[from] figment::Error),

    /// The scenario parsed but describes something that cannot be simulated.
    #[error("invalid scenario: {0}")]
    Scenario(String),

    #[error("invalid noise model: {0}")]
    Noise(#[from] rand_distr::NormalError),

    #[error("failed to serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("cannot create output directory `{}`: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
