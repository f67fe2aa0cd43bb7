// replay_sim/src/simulation/world.rs

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// An empty, axis-aligned rectangular room spanning `[0, width] x [0, height]`.
///
/// The walls are the only obstacles the simulated lidar can hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Room {
    pub width: f64,
    pub height: f64,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 8.0,
        }
    }
}

impl Room {
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Distance from `origin` along `angle` to the first wall, if it lies
    /// within `max_range`. `origin` must be inside the room.
    pub fn cast_ray(&self, origin: &Point2<f64>, angle: f64, max_range: f64) -> Option<f64> {
        let direction = Vector2::new(angle.cos(), angle.sin());
        let exit_x = exit_distance(origin.x, direction.x, self.width);
        let exit_y = exit_distance(origin.y, direction.y, self.height);
        let distance = exit_x.min(exit_y);
        (distance <= max_range).then_some(distance)
    }
}

/// Distance along one axis until the ray leaves `[0, extent]`.
fn exit_distance(origin: f64, direction: f64, extent: f64) -> f64 {
    if direction > f64::EPSILON {
        (extent - origin) / direction
    } else if direction < -f64::EPSILON {
        -origin / direction
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn rays_hit_the_nearest_wall() {
        let room = Room {
            width: 10.0,
            height: 4.0,
        };
        let origin = Point2::new(2.0, 1.0);
        assert_abs_diff_eq!(room.cast_ray(&origin, 0.0, 100.0).unwrap(), 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(room.cast_ray(&origin, PI, 100.0).unwrap(), 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(room.cast_ray(&origin, FRAC_PI_2, 100.0).unwrap(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            room.cast_ray(&origin, -FRAC_PI_4, 100.0).unwrap(),
            2.0_f64.sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn walls_beyond_max_range_are_not_seen() {
        let room = Room::default();
        assert!(room.cast_ray(&Point2::new(1.0, 1.0), 0.0, 5.0).is_none());
    }

    #[test]
    fn containment_includes_the_walls() {
        let room = Room::default();
        assert!(room.contains(&Point2::new(0.0, 8.0)));
        assert!(!room.contains(&Point2::new(-0.1, 1.0)));
    }
}
