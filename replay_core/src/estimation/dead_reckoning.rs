// replay_core/src/estimation/dead_reckoning.rs

use crate::estimation::Estimator;
use crate::geometry::{Pose2D, RigidPose};
use crate::mapping::PointMap;
use crate::messages::PointCloud;
use crate::types::HypothesisIndex;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Motion thresholds that gate scan processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadReckoningConfig {
    /// Process the next scan after the robot travelled this far [m].
    pub linear_dist_threshold: f64,
    /// Process the next scan after the robot turned this much [deg].
    pub angular_dist_threshold_deg: f64,
}

impl Default for DeadReckoningConfig {
    fn default() -> Self {
        Self {
            linear_dist_threshold: 0.5,
            angular_dist_threshold_deg: 10.0,
        }
    }
}

/// A single-hypothesis estimator that trusts odometry completely.
///
/// It chains odometry increments onto its own pose, records that pose each
/// time a scan is processed and paints the scan into a [`PointMap`]. Useful
/// as a baseline when comparing real estimators and as a stand-in while
/// exercising the replay pipeline.
#[derive(Debug, Clone)]
pub struct DeadReckoningEstimator {
    pose: Pose2D,
    trajectory: Vec<Pose2D>,
    map: PointMap,
    linear_threshold: f64,
    angular_threshold: f64,
    linear_dist: f64,
    angular_dist: f64,
    num_scans: u64,
}

impl DeadReckoningEstimator {
    pub fn new(config: &DeadReckoningConfig) -> Self {
        Self::with_initial_pose(config, Pose2D::identity())
    }

    pub fn with_initial_pose(config: &DeadReckoningConfig, initial_pose: Pose2D) -> Self {
        Self {
            pose: initial_pose,
            trajectory: Vec::new(),
            map: PointMap::new(),
            linear_threshold: config.linear_dist_threshold,
            angular_threshold: config.angular_dist_threshold_deg.to_radians(),
            linear_dist: 0.0,
            angular_dist: 0.0,
            num_scans: 0,
        }
    }

    pub fn num_scans(&self) -> u64 {
        self.num_scans
    }
}

impl Estimator for DeadReckoningEstimator {
    type Pose = Pose2D;
    type Map = PointMap;
    type Error = Infallible;

    fn process_odom(&mut self, last: &Pose2D, current: &Pose2D) -> Result<(), Infallible> {
        let delta = current.relative_to(last);
        self.pose = delta.compose_onto(&self.pose);
        self.linear_dist += delta.position_norm();
        self.angular_dist += delta.angle_norm();
        tracing::trace!(pose = %self.pose, "dead reckoning update");
        Ok(())
    }

    fn scan_required(&self) -> bool {
        self.num_scans == 0
            || self.linear_dist > self.linear_threshold
            || self.angular_dist > self.angular_threshold
    }

    fn process_scan(&mut self, clouds: &[PointCloud]) -> Result<(), Infallible> {
        for cloud in clouds {
            self.map.insert(&self.pose, cloud);
        }
        self.trajectory.push(self.pose);
        self.linear_dist = 0.0;
        self.angular_dist = 0.0;
        self.num_scans += 1;
        Ok(())
    }

    fn best_hypothesis_index(&self, _consistent: bool) -> HypothesisIndex {
        0
    }

    fn map(&self, _index: HypothesisIndex, _consistent: bool) -> &PointMap {
        &self.map
    }

    fn trajectory(&self, _index: HypothesisIndex, _consistent: bool) -> Vec<Pose2D> {
        self.trajectory.clone()
    }

    fn pose(&self, _index: HypothesisIndex) -> Pose2D {
        self.pose
    }
}
