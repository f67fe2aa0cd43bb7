// replay_core/src/geometry/mod.rs

//! Rigid-pose algebra shared by the processor, the estimators and the
//! error computation.
//!
//! The dimension of a pose is part of its type. `Pose2D` and `Pose3D` both
//! implement [`RigidPose`]; a 2D pose can be embedded into 3D, but there is no
//! way back, so a 3D pose can never be silently truncated.
//!
//! All operations assume finite inputs. NaN or infinite components are a
//! precondition violation and are not checked.

mod pose2d;
mod pose3d;

pub use pose2d::Pose2D;
pub use pose3d::Pose3D;

use nalgebra::{Normed, RealField};
use num_traits::{Float, FloatConst};
use std::fmt::Debug;
use std::ops::{Index, Sub};

/// Wraps an angle into the half-open range `(-π, π]`.
///
/// Generic over the float precision so it can be shared by `f32` sensor code
/// and `f64` pose code.
pub fn normalize_angle<T: Float + FloatConst>(angle: T) -> T {
    let pi = T::PI();
    let two_pi = pi + pi;
    let mut wrapped = angle % two_pi;
    if wrapped <= -pi {
        wrapped = wrapped + two_pi;
    } else if wrapped > pi {
        wrapped = wrapped - two_pi;
    }
    wrapped
}

/// The contract every pose type fulfils, independent of its dimension.
///
/// Composition follows the "oplus" convention: `a.compose_onto(&b)` is the
/// transform `b` followed by `a`, i.e. `b * a`. The inverse operation
/// `a.relative_to(&b)` ("ominus") is `b⁻¹ * a`, the pose of `a` seen from the
/// frame of `b`. Together they satisfy `a.relative_to(&b).compose_onto(&b) ≈ a`.
pub trait RigidPose: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Spatial dimension of the pose (2 or 3).
    const DIM: usize;

    /// Translation vector type (`Vector2<f64>` or `Vector3<f64>`).
    type Position: Copy
        + Debug
        + Sub<Output = Self::Position>
        + Index<usize, Output = f64>
        + Normed<Norm = f64>;

    /// Dense transform type for a given scalar precision.
    type Isometry<T: RealField>;

    /// The identity transform.
    fn identity() -> Self;

    /// Rigid composition: this pose applied after `other`.
    fn compose_onto(&self, other: &Self) -> Self;

    /// The pose of `self` expressed in the frame of `other`.
    fn relative_to(&self, other: &Self) -> Self;

    fn inverse(&self) -> Self;

    fn position(&self) -> Self::Position;

    /// Euclidean norm of the translation.
    fn position_norm(&self) -> f64 {
        self.position().norm()
    }

    /// Magnitude of the wrapped rotation angle, in `[0, π]`.
    fn angle_norm(&self) -> f64;

    /// Planar heading (yaw) in radians, wrapped into `(-π, π]`.
    fn heading(&self) -> f64;

    /// Conversion to a dense transform in the requested precision.
    fn to_isometry<T: RealField>(&self) -> Self::Isometry<T>;

    fn to_isometry_f64(&self) -> Self::Isometry<f64> {
        self.to_isometry::<f64>()
    }

    /// Single-precision variant for components that work in `f32`.
    fn to_isometry_f32(&self) -> Self::Isometry<f32> {
        self.to_isometry::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn normalize_angle_keeps_values_in_range() {
        assert_abs_diff_eq!(normalize_angle(0.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(3.0 * FRAC_PI_2), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-3.0 * FRAC_PI_2), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(2.0 * PI + 0.25), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn normalize_angle_maps_minus_pi_to_pi() {
        assert_abs_diff_eq!(normalize_angle(-PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(PI), PI, epsilon = 1e-12);
    }

    #[test]
    fn normalize_angle_works_in_single_precision() {
        let wrapped = normalize_angle(7.0_f32);
        assert_abs_diff_eq!(wrapped, 7.0 - 2.0 * std::f32::consts::PI, epsilon = 1e-5);
    }
}
