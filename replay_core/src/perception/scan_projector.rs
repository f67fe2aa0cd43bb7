// replay_core/src/perception/scan_projector.rs

use crate::messages::PointCloud;
use nalgebra::Point2;

/// Fixed angular model of a single-plane range finder.
///
/// Beam `i` points along `start_angle + i * angular_resolution` in the sensor
/// frame (+X forward, +Y left). Both parameters are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanProjector {
    start_angle: f64,
    angular_resolution: f64,
}

impl ScanProjector {
    /// Angles in radians.
    pub fn new(start_angle: f64, angular_resolution: f64) -> Self {
        Self {
            start_angle,
            angular_resolution,
        }
    }

    /// Angles in degrees, converted once here.
    pub fn from_degrees(start_angle_deg: f64, angular_resolution_deg: f64) -> Self {
        Self::new(
            start_angle_deg.to_radians(),
            angular_resolution_deg.to_radians(),
        )
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn angular_resolution(&self) -> f64 {
        self.angular_resolution
    }

    /// Direction of beam `index`, in radians.
    pub fn beam_angle(&self, index: usize) -> f64 {
        self.start_angle + self.angular_resolution * index as f64
    }

    /// Polar-to-Cartesian projection of a whole scan.
    ///
    /// The output has exactly one point per range. Zero, negative and
    /// non-finite ranges are passed through untouched; deciding which readings
    /// are usable is left to the estimator.
    pub fn project(&self, ranges: &[f64]) -> PointCloud {
        let mut cloud = PointCloud::with_capacity(ranges.len());
        cloud.points.extend(ranges.iter().enumerate().map(|(i, &range)| {
            let (sin, cos) = self.beam_angle(i).sin_cos();
            Point2::new(range * cos, range * sin)
        }));
        cloud
    }
}
