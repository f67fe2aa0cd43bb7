// replay_sim/src/simulation/sensors/lidar_2d.rs

use crate::simulation::config::LidarConfig;
use crate::simulation::sensors::RangeSensorModel;
use crate::simulation::world::Room;
use nalgebra::Point2;
use rand::RngCore;
use rand_distr::{Distribution, Normal, NormalError};
use replay_core::geometry::Pose2D;
use replay_core::types::RangeScan;

/// A single-plane lidar with a fixed fan of beams.
///
/// The fan matches the processor's laser geometry, so the replay projects the
/// ranges back along the directions they were cast.
#[derive(Debug, Clone)]
pub struct Lidar2DModel {
    start_angle: f64,
    angular_resolution: f64,
    beams: usize,
    max_range: f64,
    range_noise: Normal<f64>,
}

impl Lidar2DModel {
    /// Angles in degrees.
    pub fn new(
        start_angle_deg: f64,
        angular_resolution_deg: f64,
        config: &LidarConfig,
    ) -> Result<Self, NormalError> {
        Ok(Self {
            start_angle: start_angle_deg.to_radians(),
            angular_resolution: angular_resolution_deg.to_radians(),
            beams: config.beams,
            max_range: config.max_range,
            range_noise: Normal::new(0.0, config.range_noise_stddev)?,
        })
    }
}

impl RangeSensorModel for Lidar2DModel {
    fn beam_angles(&self) -> Vec<f64> {
        (0..self.beams)
            .map(|i| self.start_angle + self.angular_resolution * i as f64)
            .collect()
    }

    fn measure(&self, room: &Room, pose: &Pose2D, rng: &mut dyn RngCore) -> RangeScan {
        let origin = Point2::new(pose.x, pose.y);
        self.beam_angles()
            .into_iter()
            .map(|angle| match room.cast_ray(&origin, pose.theta + angle, self.max_range) {
                Some(distance) => {
                    (distance + self.range_noise.sample(rng)).clamp(0.0, self.max_range)
                }
                None => self.max_range,
            })
            .collect()
    }

    fn max_range(&self) -> f64 {
        self.max_range
    }
}
