// replay_core/src/geometry/pose2d.rs

use super::{normalize_angle, Pose3D, RigidPose};
use nalgebra::{Isometry2, Point2, RealField, UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A planar rigid pose: position in metres and heading in radians.
///
/// The heading is kept in `(-π, π]` by every constructor and operation.
/// Deserialized poses are wrapped on the way in; a struct literal can still
/// carry an unwrapped `theta`, so readers go through [`RigidPose::heading`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawPose2D")]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

/// Wire form of [`Pose2D`] before the heading is wrapped.
#[derive(Deserialize)]
struct RawPose2D {
    x: f64,
    y: f64,
    theta: f64,
}

impl From<RawPose2D> for Pose2D {
    fn from(raw: RawPose2D) -> Self {
        Self::new(raw.x, raw.y, raw.theta)
    }
}

impl Pose2D {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    pub fn from_position(position: Vector2<f64>, theta: f64) -> Self {
        Self::new(position.x, position.y, theta)
    }

    pub fn from_isometry(iso: &Isometry2<f64>) -> Self {
        Self::new(
            iso.translation.vector.x,
            iso.translation.vector.y,
            iso.rotation.angle(),
        )
    }

    /// `[x, y, θ]`.
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.theta)
    }

    /// Additive perturbation in parameter space (not a composition).
    pub fn boxplus(&self, delta: &Vector3<f64>) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.theta + delta.z)
    }

    /// Parameter-space difference with a wrapped angle component.
    pub fn boxminus(&self, other: &Self) -> Vector3<f64> {
        Vector3::new(
            self.x - other.x,
            self.y - other.y,
            normalize_angle(self.theta - other.theta),
        )
    }

    /// Maps a point from this pose's local frame into the parent frame.
    pub fn transform_point(&self, point: &Point2<f64>) -> Point2<f64> {
        let (sin, cos) = self.theta.sin_cos();
        Point2::new(
            self.x + cos * point.x - sin * point.y,
            self.y + sin * point.x + cos * point.y,
        )
    }

    /// Embeds the pose in the `z = 0` plane with a pure yaw rotation.
    pub fn to_pose3d(&self) -> Pose3D {
        Pose3D::new(
            Vector3::new(self.x, self.y, 0.0),
            UnitQuaternion::from_euler_angles(0.0, 0.0, self.theta),
        )
    }
}

impl RigidPose for Pose2D {
    const DIM: usize = 2;

    type Position = Vector2<f64>;
    type Isometry<T: RealField> = Isometry2<T>;

    fn identity() -> Self {
        Self::default()
    }

    fn compose_onto(&self, other: &Self) -> Self {
        let (sin, cos) = other.theta.sin_cos();
        Self::new(
            other.x + cos * self.x - sin * self.y,
            other.y + sin * self.x + cos * self.y,
            other.theta + self.theta,
        )
    }

    fn relative_to(&self, other: &Self) -> Self {
        self.compose_onto(&other.inverse())
    }

    fn inverse(&self) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            -cos * self.x - sin * self.y,
            sin * self.x - cos * self.y,
            -self.theta,
        )
    }

    fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    fn angle_norm(&self) -> f64 {
        normalize_angle(self.theta).abs()
    }

    fn heading(&self) -> f64 {
        normalize_angle(self.theta)
    }

    fn to_isometry<T: RealField>(&self) -> Isometry2<T> {
        Isometry2::new(
            Vector2::new(nalgebra::convert(self.x), nalgebra::convert(self.y)),
            nalgebra::convert(self.theta),
        )
    }
}

impl From<Pose2D> for Pose3D {
    fn from(pose: Pose2D) -> Self {
        pose.to_pose3d()
    }
}

/// `x y heading_degrees`, the record layout of an exported trajectory.
impl fmt::Display for Pose2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.heading().to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn assert_pose_eq(a: &Pose2D, b: &Pose2D) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = EPS);
        assert_abs_diff_eq!(a.y, b.y, epsilon = EPS);
        assert_abs_diff_eq!(normalize_angle(a.theta - b.theta), 0.0, epsilon = EPS);
    }

    #[test]
    fn constructor_wraps_heading() {
        let pose = Pose2D::new(1.0, 2.0, 2.0 * PI + 1.0);
        assert_abs_diff_eq!(pose.theta, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn compose_onto_applies_other_first() {
        // Move 1m forward after turning left by 90 degrees.
        let step = Pose2D::new(1.0, 0.0, 0.0);
        let base = Pose2D::new(2.0, 3.0, FRAC_PI_2);
        let result = step.compose_onto(&base);
        assert_pose_eq(&result, &Pose2D::new(2.0, 4.0, FRAC_PI_2));
    }

    #[test]
    fn relative_to_round_trips() {
        let poses = [
            Pose2D::new(0.0, 0.0, 0.0),
            Pose2D::new(1.5, -2.0, 0.3),
            Pose2D::new(-4.0, 7.25, -2.9),
            Pose2D::new(10.0, 0.1, PI),
        ];
        for a in &poses {
            for b in &poses {
                let delta = a.relative_to(b);
                assert_pose_eq(&delta.compose_onto(b), a);
            }
        }
    }

    #[test]
    fn relative_to_expresses_pose_in_other_frame() {
        let a = Pose2D::new(1.0, 1.0, FRAC_PI_2);
        let b = Pose2D::new(1.0, 0.0, FRAC_PI_2);
        // `a` sits one metre ahead of `b` along its heading.
        assert_pose_eq(&a.relative_to(&b), &Pose2D::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn inverse_composes_to_identity() {
        let pose = Pose2D::new(3.0, -1.0, 1.2);
        assert_pose_eq(&pose.inverse().compose_onto(&pose), &Pose2D::identity());
        assert_pose_eq(&pose.compose_onto(&pose.inverse()), &Pose2D::identity());
    }

    #[test]
    fn norms() {
        let pose = Pose2D::new(3.0, 4.0, -2.5);
        assert_abs_diff_eq!(pose.position_norm(), 5.0, epsilon = EPS);
        assert_abs_diff_eq!(pose.angle_norm(), 2.5, epsilon = EPS);
    }

    #[test]
    fn isometry_conversions_agree() {
        let pose = Pose2D::new(1.0, -2.0, 0.7);
        let iso = pose.to_isometry_f64();
        assert_pose_eq(&Pose2D::from_isometry(&iso), &pose);

        let iso32 = pose.to_isometry_f32();
        assert_abs_diff_eq!(iso32.translation.vector.x, 1.0_f32, epsilon = 1e-6);
        assert_abs_diff_eq!(iso32.rotation.angle(), 0.7_f32, epsilon = 1e-6);
    }

    #[test]
    fn isometry_matches_composition() {
        let a = Pose2D::new(0.5, 0.2, 0.4);
        let b = Pose2D::new(-1.0, 3.0, -1.1);
        let composed = Pose2D::from_isometry(&(b.to_isometry_f64() * a.to_isometry_f64()));
        assert_pose_eq(&a.compose_onto(&b), &composed);
    }

    #[test]
    fn boxplus_and_boxminus_are_inverse() {
        let a = Pose2D::new(1.0, 2.0, 3.0);
        let b = Pose2D::new(-1.0, 0.5, -3.0);
        let delta = a.boxminus(&b);
        assert_abs_diff_eq!(delta.z, normalize_angle(6.0), epsilon = EPS);
        assert_pose_eq(&b.boxplus(&delta), &a);
    }

    #[test]
    fn transform_point_rotates_then_translates() {
        let pose = Pose2D::new(1.0, 1.0, FRAC_PI_2);
        let p = pose.transform_point(&Point2::new(2.0, 0.0));
        assert_abs_diff_eq!(p.x, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(p.y, 3.0, epsilon = EPS);
    }

    #[test]
    fn embedding_into_3d_preserves_planar_part() {
        let pose = Pose2D::new(1.0, 2.0, -0.8);
        let lifted: Pose3D = pose.into();
        assert_abs_diff_eq!(lifted.position().z, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(lifted.heading(), -0.8, epsilon = EPS);
        assert_abs_diff_eq!(lifted.position_norm(), pose.position_norm(), epsilon = EPS);
    }

    #[test]
    fn literal_with_unwrapped_theta_reports_wrapped_heading() {
        let pose = Pose2D {
            x: 0.0,
            y: 0.0,
            theta: 10.0,
        };
        assert_abs_diff_eq!(pose.heading(), 10.0 - 2.0 * PI, epsilon = EPS);
        let degrees: f64 = pose.to_string().split(' ').nth(2).unwrap().parse().unwrap();
        assert_abs_diff_eq!(degrees, (10.0 - 2.0 * PI).to_degrees(), epsilon = 1e-9);
    }

    #[test]
    fn deserialized_heading_is_wrapped() {
        use figment::{
            providers::{Format, Toml},
            Figment,
        };
        let pose: Pose2D = Figment::new()
            .merge(Toml::string("x = 1.0\ny = -2.0\ntheta = 10.0"))
            .extract()
            .unwrap();
        assert_abs_diff_eq!(pose.x, 1.0);
        assert_abs_diff_eq!(pose.theta, 10.0 - 2.0 * PI, epsilon = EPS);
    }

    #[test]
    fn display_prints_heading_in_degrees() {
        let pose = Pose2D::new(1.5, -2.0, 0.0);
        assert_eq!(pose.to_string(), "1.5 -2 0");
        let turned = Pose2D::new(0.0, 0.0, FRAC_PI_2).to_string();
        let heading: f64 = turned.split(' ').nth(2).unwrap().parse().unwrap();
        assert_abs_diff_eq!(heading, 90.0, epsilon = 1e-9);
    }
}
