// replay_sim/src/prelude.rs

// Re-export the entire replay_core prelude so you can easily access
// pure types like `Pose2D`, `LogProcessor`, `Estimator`, etc.
pub use replay_core::prelude::*;

// Re-export common simulation-specific types for easy access.
pub use crate::error::SimError;
pub use crate::simulation::config::{LidarConfig, OdometryNoise, ScenarioConfig, Simulation};
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::log::{LogGenerator, SyntheticLog};
pub use crate::simulation::sensors::{lidar_2d::Lidar2DModel, RangeSensorModel};
pub use crate::simulation::trajectory::PathShape;
pub use crate::simulation::world::Room;
pub use crate::{run, RunReport};
