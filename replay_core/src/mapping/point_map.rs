// replay_core/src/mapping/point_map.rs

use crate::geometry::Pose2D;
use crate::mapping::MapArtifact;
use crate::messages::PointCloud;
use nalgebra::Point2;
use std::io::{self, Write};

/// World-frame accumulation of every scan point an estimator has registered.
///
/// Non-finite points are dropped on insertion so the saved file stays
/// parseable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointMap {
    points: Vec<Point2<f64>>,
}

impl PointMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transforms `cloud` from the sensor frame at `pose` into the map frame.
    pub fn insert(&mut self, pose: &Pose2D, cloud: &PointCloud) {
        self.points.extend(
            cloud
                .iter()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
                .map(|p| pose.transform_point(p)),
        );
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl MapArtifact for PointMap {
    /// One `x y` line per point after a single header line.
    fn save(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# x[m] y[m]")?;
        for p in &self.points {
            writeln!(out, "{} {}", p.x, p.y)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn insert_moves_points_into_map_frame() {
        let mut map = PointMap::new();
        let cloud = PointCloud {
            points: vec![Point2::new(1.0, 0.0), Point2::new(f64::NAN, 0.0)],
        };
        map.insert(&Pose2D::new(2.0, 0.0, FRAC_PI_2), &cloud);

        assert_eq!(map.len(), 1);
        approx::assert_abs_diff_eq!(map.points()[0].x, 2.0, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(map.points()[0].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn save_writes_header_and_points() {
        let mut map = PointMap::new();
        map.insert(
            &Pose2D::default(),
            &PointCloud {
                points: vec![Point2::new(1.5, -2.0)],
            },
        );
        let mut buf = Vec::new();
        map.save(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "# x[m] y[m]\n1.5 -2\n");
    }
}
