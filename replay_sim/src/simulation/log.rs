// replay_sim/src/simulation/log.rs

//! Synthetic replay logs.
//!
//! The generator walks the robot along its ground-truth path, corrupts each
//! odometry increment with Gaussian noise and casts a lidar scan from the true
//! pose. The result has the same shape as a recorded log: odometry in its own
//! drifting frame, scans, and a separate ground-truth stream.

use crate::error::Result;
use crate::simulation::config::{OdometryNoise, ScenarioConfig};
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::sensors::lidar_2d::Lidar2DModel;
use crate::simulation::sensors::RangeSensorModel;
use crate::simulation::trajectory::PathShape;
use crate::simulation::world::Room;
use rand_distr::{Distribution, Normal};
use replay_core::geometry::{Pose2D, RigidPose};
use replay_core::messages::{GroundTruthRecord, TimestampedRecord};

/// An in-memory log ready to be replayed.
#[derive(Debug, Clone, Default)]
pub struct SyntheticLog {
    pub records: Vec<TimestampedRecord<Pose2D>>,
    pub ground_truth: Vec<GroundTruthRecord<Pose2D>>,
}

#[derive(Debug, Clone)]
pub struct LogGenerator {
    room: Room,
    path: PathShape,
    sensor: Box<dyn RangeSensorModel>,
    translation_noise: Normal<f64>,
    rotation_noise: Normal<f64>,
    steps: usize,
    timestep: f64,
    ground_truth_every: usize,
}

impl LogGenerator {
    pub fn from_scenario(scenario: &ScenarioConfig) -> Result<Self> {
        let sensor = Lidar2DModel::new(
            scenario.processor.laser_start_angle,
            scenario.processor.laser_angular_res,
            &scenario.lidar,
        )?;
        let OdometryNoise {
            translation_stddev,
            rotation_stddev_deg,
        } = scenario.odometry;

        Ok(Self {
            room: scenario.world,
            path: scenario.path.clone(),
            sensor: Box::new(sensor),
            translation_noise: Normal::new(0.0, translation_stddev)?,
            rotation_noise: Normal::new(0.0, rotation_stddev_deg.to_radians())?,
            steps: scenario.simulation.steps,
            timestep: scenario.simulation.timestep,
            ground_truth_every: scenario.simulation.ground_truth_every.max(1),
        })
    }

    /// Replaces the default lidar with another range sensor.
    pub fn with_sensor(mut self, sensor: Box<dyn RangeSensorModel>) -> Self {
        tracing::debug!(
            beams = sensor.beam_angles().len(),
            max_range = sensor.max_range(),
            "replacing range sensor"
        );
        self.sensor = sensor;
        self
    }

    pub fn sensor(&self) -> &dyn RangeSensorModel {
        self.sensor.as_ref()
    }

    pub fn generate(&self, rng: &mut SimulationRng) -> SyntheticLog {
        let mut log = SyntheticLog {
            records: Vec::with_capacity(self.steps),
            ground_truth: Vec::with_capacity(self.steps / self.ground_truth_every + 1),
        };
        let speed = self.path.speed();

        // Odometry lives in its own frame, anchored at the origin.
        let mut odometry = Pose2D::identity();
        let mut last_truth = self.path.pose_at(0.0);

        for k in 0..self.steps {
            let time = k as f64 * self.timestep;
            let truth = self.path.pose_at(speed * time);

            if k > 0 {
                let increment = truth.relative_to(&last_truth);
                let noisy = Pose2D::new(
                    increment.x + self.translation_noise.sample(&mut rng.0),
                    increment.y + self.translation_noise.sample(&mut rng.0),
                    increment.theta + self.rotation_noise.sample(&mut rng.0),
                );
                odometry = noisy.compose_onto(&odometry);
            }
            last_truth = truth;

            let timestamp = format!("{time:.3}");
            let scan = self.sensor.measure(&self.room, &truth, &mut rng.0);
            if k % self.ground_truth_every == 0 {
                log.ground_truth
                    .push(GroundTruthRecord::new(truth, timestamp.clone()));
            }
            log.records
                .push(TimestampedRecord::new(odometry, scan, timestamp));
        }

        tracing::info!(
            records = log.records.len(),
            ground_truth = log.ground_truth.len(),
            "Generated synthetic log"
        );
        log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::{LidarConfig, Simulation};
    use approx::assert_abs_diff_eq;

    fn noiseless_scenario(steps: usize) -> ScenarioConfig {
        ScenarioConfig {
            simulation: Simulation {
                seed: Some(1),
                steps,
                timestep: 0.1,
                ground_truth_every: 1,
            },
            odometry: OdometryNoise {
                translation_stddev: 0.0,
                rotation_stddev_deg: 0.0,
            },
            lidar: LidarConfig {
                beams: 19,
                range_noise_stddev: 0.0,
                ..LidarConfig::default()
            },
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn log_has_one_record_per_step() {
        let scenario = noiseless_scenario(25);
        let log = LogGenerator::from_scenario(&scenario)
            .unwrap()
            .generate(&mut SimulationRng::new(Some(1)));
        assert_eq!(log.records.len(), 25);
        assert_eq!(log.ground_truth.len(), 25);
        assert_eq!(log.records[3].timestamp, "0.300");
        assert_eq!(log.records[3].timestamp, log.ground_truth[3].timestamp);
        assert!(log.records.iter().all(|r| r.scan.len() == 19));
    }

    #[test]
    fn noiseless_odometry_matches_truth_up_to_its_frame() {
        let scenario = noiseless_scenario(40);
        let log = LogGenerator::from_scenario(&scenario)
            .unwrap()
            .generate(&mut SimulationRng::new(Some(1)));

        // Relative motion between any two records agrees with ground truth.
        let odo = log.records[30].odometry.relative_to(&log.records[10].odometry);
        let truth = log.ground_truth[30].pose.relative_to(&log.ground_truth[10].pose);
        assert_abs_diff_eq!(odo.x, truth.x, epsilon = 1e-9);
        assert_abs_diff_eq!(odo.y, truth.y, epsilon = 1e-9);
        assert_abs_diff_eq!(odo.theta, truth.theta, epsilon = 1e-9);
    }

    #[test]
    fn sparse_ground_truth_skips_records() {
        let mut scenario = noiseless_scenario(10);
        scenario.simulation.ground_truth_every = 3;
        let log = LogGenerator::from_scenario(&scenario)
            .unwrap()
            .generate(&mut SimulationRng::new(Some(1)));
        let stamps: Vec<&str> = log.ground_truth.iter().map(|g| g.timestamp.as_str()).collect();
        assert_eq!(stamps, ["0.000", "0.300", "0.600", "0.900"]);
    }

    #[test]
    fn replacement_sensor_shapes_the_scans() {
        let scenario = noiseless_scenario(5);
        let short_range = LidarConfig {
            beams: 3,
            max_range: 0.5,
            range_noise_stddev: 0.0,
        };
        let generator = LogGenerator::from_scenario(&scenario)
            .unwrap()
            .with_sensor(Box::new(Lidar2DModel::new(-90.0, 90.0, &short_range).unwrap()));
        assert_abs_diff_eq!(generator.sensor().max_range(), 0.5);

        let log = generator.generate(&mut SimulationRng::new(Some(1)));
        // The default path keeps well over half a metre from every wall.
        for record in &log.records {
            assert_eq!(record.scan, vec![0.5; 3]);
        }
    }

    #[test]
    fn same_seed_same_log() {
        let scenario = ScenarioConfig {
            simulation: Simulation {
                steps: 20,
                ..Simulation::default()
            },
            ..ScenarioConfig::default()
        };
        let generator = LogGenerator::from_scenario(&scenario).unwrap();
        let a = generator.generate(&mut SimulationRng::new(Some(42)));
        let b = generator.generate(&mut SimulationRng::new(Some(42)));
        assert_eq!(a.records, b.records);
    }
}
