// replay_core/src/evaluation.rs

//! Accuracy bookkeeping for replays that come with ground truth.
//!
//! The processor scores each matched ground-truth pose with a relative drift
//! error: how far the estimated displacement since the previous match differs
//! from the true displacement over the same interval. [`ErrorStatistics`]
//! condenses the resulting series.

use crate::geometry::RigidPose;
use crate::types::Timestamp;
use nalgebra::Normed;
use serde::{Deserialize, Serialize};

/// One scored ground-truth match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSample<P> {
    pub timestamp: Timestamp,
    pub ground_truth: P,
    /// Position disagreement of the two relative displacements [m].
    pub error: f64,
}

/// Relative drift between two matched pairs.
///
/// Both displacements are expressed as `previous.relative_to(current)`, the
/// same way on both sides, and only the translation parts are compared.
pub fn relative_drift_error<P: RigidPose>(
    last_estimate: &P,
    estimate: &P,
    last_ground_truth: &P,
    ground_truth: &P,
) -> f64 {
    let est_delta = last_estimate.relative_to(estimate);
    let gt_delta = last_ground_truth.relative_to(ground_truth);
    (est_delta.position() - gt_delta.position()).norm()
}

/// Summary statistics of an error series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorStatistics {
    /// Root mean square error
    pub rmse: f64,
    pub mean: f64,
    /// Standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Number of samples
    pub count: usize,
}

impl ErrorStatistics {
    /// Compute statistics from a list of errors. An empty list yields all zeros.
    pub fn from_errors(errors: &[f64]) -> Self {
        if errors.is_empty() {
            return Self::default();
        }

        let count = errors.len();
        let n = count as f64;

        let mean = errors.iter().sum::<f64>() / n;
        let rmse = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();
        let variance = errors.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n;

        let min = errors.iter().copied().fold(f64::INFINITY, f64::min);
        let max = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = errors.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        Self {
            rmse,
            mean,
            std: variance.sqrt(),
            min,
            max,
            median,
            count,
        }
    }

    pub fn from_samples<P>(samples: &[ErrorSample<P>]) -> Self {
        let errors: Vec<f64> = samples.iter().map(|s| s.error).collect();
        Self::from_errors(&errors)
    }

    /// Format as a single-line summary.
    pub fn summary(&self) -> String {
        format!(
            "n: {}, rmse: {:.4}, mean: {:.4}, std: {:.4}, min: {:.4}, max: {:.4}, median: {:.4}",
            self.count, self.rmse, self.mean, self.std, self.min, self.max, self.median
        )
    }
}
