// replay_core/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures that end a replay.
///
/// Running out of records is not an error, and neither is a missing
/// ground-truth pose; both are handled inside the processor.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The snapshot sink could not be written.
    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The estimator rejected an odometry or scan update.
    #[error("estimator failure: {0}")]
    Estimator(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A record or ground-truth source could not produce its next item.
    #[error("record source failure: {0}")]
    Source(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),
}

impl ReplayError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ReplayError> = std::result::Result<T, E>;
