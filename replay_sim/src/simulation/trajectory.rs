// replay_sim/src/simulation/trajectory.rs

use nalgebra::Point2;
use replay_core::geometry::Pose2D;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// The ground-truth path the robot follows at constant speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")] // This tells serde to use the "type" field to decide which enum variant to parse
pub enum PathShape {
    /// Counter-clockwise loop starting at the bottom of the circle.
    Circle {
        center: [f64; 2],
        radius: f64,
        /// [m/s]
        speed: f64,
    },
    /// Counter-clockwise lap along the edges of an axis-aligned rectangle,
    /// starting at `min`.
    Rectangle {
        min: [f64; 2],
        max: [f64; 2],
        /// [m/s]
        speed: f64,
    },
}

impl Default for PathShape {
    fn default() -> Self {
        PathShape::Circle {
            center: [5.0, 4.0],
            radius: 2.5,
            speed: 0.5,
        }
    }
}

impl PathShape {
    pub fn speed(&self) -> f64 {
        match self {
            PathShape::Circle { speed, .. } | PathShape::Rectangle { speed, .. } => *speed,
        }
    }

    /// Axis-aligned bounding box of the whole path.
    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        match self {
            PathShape::Circle { center, radius, .. } => (
                Point2::new(center[0] - radius, center[1] - radius),
                Point2::new(center[0] + radius, center[1] + radius),
            ),
            PathShape::Rectangle { min, max, .. } => {
                (Point2::new(min[0], min[1]), Point2::new(max[0], max[1]))
            }
        }
    }

    /// True pose after travelling `distance` metres along the path.
    pub fn pose_at(&self, distance: f64) -> Pose2D {
        match self {
            PathShape::Circle { center, radius, .. } => {
                let phi = distance / radius;
                Pose2D::new(
                    center[0] + radius * phi.sin(),
                    center[1] - radius * phi.cos(),
                    phi,
                )
            }
            PathShape::Rectangle { min, max, .. } => {
                let width = max[0] - min[0];
                let height = max[1] - min[1];
                let s = distance.rem_euclid(2.0 * (width + height));
                if s < width {
                    Pose2D::new(min[0] + s, min[1], 0.0)
                } else if s < width + height {
                    Pose2D::new(max[0], min[1] + (s - width), FRAC_PI_2)
                } else if s < 2.0 * width + height {
                    Pose2D::new(max[0] - (s - width - height), max[1], PI)
                } else {
                    Pose2D::new(min[0], max[1] - (s - 2.0 * width - height), -FRAC_PI_2)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circle_starts_at_the_bottom_heading_east() {
        let path = PathShape::default();
        let start = path.pose_at(0.0);
        assert_abs_diff_eq!(start.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(start.y, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(start.theta, 0.0, epsilon = 1e-12);

        // A quarter lap later the robot is on the east side heading north.
        let quarter = path.pose_at(2.5 * FRAC_PI_2);
        assert_abs_diff_eq!(quarter.x, 7.5, epsilon = 1e-9);
        assert_abs_diff_eq!(quarter.y, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(quarter.theta, FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn rectangle_walks_its_edges() {
        let path = PathShape::Rectangle {
            min: [1.0, 1.0],
            max: [4.0, 3.0],
            speed: 1.0,
        };
        let pose = path.pose_at(4.0);
        assert_abs_diff_eq!(pose.x, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.theta, FRAC_PI_2, epsilon = 1e-12);

        let pose = path.pose_at(9.0);
        assert_abs_diff_eq!(pose.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.y, 2.0, epsilon = 1e-12);

        // One full lap returns to the start.
        let lap = path.pose_at(10.0);
        assert_abs_diff_eq!(lap.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lap.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bounds_cover_the_circle() {
        let (lower, upper) = PathShape::default().bounds();
        assert_eq!(lower, Point2::new(2.5, 1.5));
        assert_eq!(upper, Point2::new(7.5, 6.5));
    }
}
