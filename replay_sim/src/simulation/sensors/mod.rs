// replay_sim/src/simulation/sensors/mod.rs

pub mod lidar_2d;

use crate::simulation::world::Room;
use dyn_clone::DynClone;
use rand::RngCore;
use replay_core::geometry::Pose2D;
use replay_core::types::RangeScan;
use std::fmt::Debug;

/// The contract for any simulated range finder.
///
/// The model owns its scan pattern and its noise; the generator only tells it
/// where the robot truly is.
pub trait RangeSensorModel: Send + Sync + DynClone + Debug {
    /// Beam directions in the sensor frame, in scan order [rad].
    fn beam_angles(&self) -> Vec<f64>;

    /// One noisy scan taken from the true `pose` inside `room`.
    fn measure(&self, room: &Room, pose: &Pose2D, rng: &mut dyn RngCore) -> RangeScan;

    /// Reading reported for beams that hit nothing [m].
    fn max_range(&self) -> f64;
}

// Make the trait object cloneable.
dyn_clone::clone_trait_object!(RangeSensorModel);
