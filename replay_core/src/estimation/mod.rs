// replay_core/src/estimation/mod.rs

use crate::geometry::RigidPose;
use crate::mapping::MapArtifact;
use crate::messages::PointCloud;
use crate::types::HypothesisIndex;

/// The contract for any algorithm the processor can drive: particle filters,
/// graph optimizers, plain dead reckoning.
///
/// Only `process_odom` and `process_scan` may change the estimator. Every
/// query takes `&self`, so exporting a snapshot can never disturb the
/// estimate.
///
/// The `consistent` flag on the queries asks for a view that is synchronized
/// with any background work the estimator runs. Single-threaded estimators
/// can ignore it.
pub trait Estimator {
    type Pose: RigidPose;
    type Map: MapArtifact;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reports the odometry transition between two consecutive log records.
    fn process_odom(&mut self, last: &Self::Pose, current: &Self::Pose) -> Result<(), Self::Error>;

    /// Whether the next scan should be processed. Lets the estimator skip
    /// expensive updates while the robot has barely moved.
    fn scan_required(&self) -> bool;

    /// Integrates the scans taken at the current pose. Multi-sensor
    /// estimators receive one cloud per sensor; the log processor always
    /// passes exactly one.
    fn process_scan(&mut self, clouds: &[PointCloud]) -> Result<(), Self::Error>;

    /// Index of the currently most likely hypothesis.
    fn best_hypothesis_index(&self, consistent: bool) -> HypothesisIndex;

    fn map(&self, index: HypothesisIndex, consistent: bool) -> &Self::Map;

    /// Poses of one hypothesis at every processed scan, oldest first.
    fn trajectory(&self, index: HypothesisIndex, consistent: bool) -> Vec<Self::Pose>;

    /// Current pose of one hypothesis.
    fn pose(&self, index: HypothesisIndex) -> Self::Pose;
}

mod dead_reckoning;

pub use dead_reckoning::{DeadReckoningConfig, DeadReckoningEstimator};
