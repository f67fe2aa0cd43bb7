// replay_core/src/geometry/pose3d.rs

use super::{normalize_angle, RigidPose};
use nalgebra::{Isometry3, Quaternion, RealField, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A spatial rigid pose backed by an `Isometry3<f64>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose3D {
    isometry: Isometry3<f64>,
}

impl Pose3D {
    pub fn new(translation: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(translation), rotation),
        }
    }

    pub fn from_isometry(isometry: Isometry3<f64>) -> Self {
        Self { isometry }
    }

    /// Builds a pose from a position and roll/pitch/yaw angles in radians.
    pub fn from_xyz_rpy(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self::new(
            Vector3::new(x, y, z),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        )
    }

    pub fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.isometry.rotation
    }

    pub fn as_isometry(&self) -> &Isometry3<f64> {
        &self.isometry
    }
}

impl Default for Pose3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidPose for Pose3D {
    const DIM: usize = 3;

    type Position = Vector3<f64>;
    type Isometry<T: RealField> = Isometry3<T>;

    fn identity() -> Self {
        Self {
            isometry: Isometry3::identity(),
        }
    }

    fn compose_onto(&self, other: &Self) -> Self {
        Self {
            isometry: other.isometry * self.isometry,
        }
    }

    fn relative_to(&self, other: &Self) -> Self {
        Self {
            isometry: other.isometry.inverse() * self.isometry,
        }
    }

    fn inverse(&self) -> Self {
        Self {
            isometry: self.isometry.inverse(),
        }
    }

    fn position(&self) -> Vector3<f64> {
        self.isometry.translation.vector
    }

    fn angle_norm(&self) -> f64 {
        self.isometry.rotation.angle()
    }

    fn heading(&self) -> f64 {
        let (_, _, yaw) = self.isometry.rotation.euler_angles();
        normalize_angle(yaw)
    }

    fn to_isometry<T: RealField>(&self) -> Isometry3<T> {
        let t = &self.isometry.translation.vector;
        let q = self.isometry.rotation.quaternion();
        Isometry3::from_parts(
            Translation3::new(
                nalgebra::convert(t.x),
                nalgebra::convert(t.y),
                nalgebra::convert(t.z),
            ),
            UnitQuaternion::new_unchecked(Quaternion::new(
                nalgebra::convert(q.w),
                nalgebra::convert(q.i),
                nalgebra::convert(q.j),
                nalgebra::convert(q.k),
            )),
        )
    }
}
