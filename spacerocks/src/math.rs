use glam::Vec2 as GlamVec2;
use serde::{Deserialize, Serialize};

/// Facing of every freshly created object. Screen y grows downward, so "up" is negative y.
pub const UP: Vec2 = Vec2 { x: 0.0, y: -1.0 };

/// 2D vector type used for positions, velocities and facings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn to_glam(&self) -> GlamVec2 {
        GlamVec2::new(self.x, self.y)
    }

    pub fn from_glam(v: GlamVec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Computes the dot product of two vectors.
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Euclidean distance between two points.
    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }

    /// Returns this vector rotated by `degrees`.
    ///
    /// Positive angles turn from +x towards +y, which reads as clockwise on a
    /// screen whose vertical axis points down.
    pub fn rotated(self, degrees: f32) -> Self {
        let rotation = GlamVec2::from_angle(degrees.to_radians());
        Self::from_glam(rotation.rotate(self.to_glam()))
    }

    /// Rotates this vector in place by `degrees`. See [`Vec2::rotated`].
    pub fn rotate_ip(&mut self, degrees: f32) {
        *self = self.rotated(degrees);
    }

    /// Signed angle in degrees that rotates `self` onto `other`, in `(-180, 180]`.
    pub fn angle_to(self, other: Self) -> f32 {
        let cross = self.x * other.y - self.y * other.x;
        let degrees = cross.atan2(self.dot(other)).to_degrees();
        if degrees <= -180.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }

    /// Maps each axis into `[0, width)` / `[0, height)` using mathematical modulo.
    pub fn wrapped(self, width: f32, height: f32) -> Self {
        Self::new(wrap_coord(self.x, width), wrap_coord(self.y, height))
    }
}

// rem_euclid of a tiny negative value can round up to exactly `max`.
fn wrap_coord(value: f32, max: f32) -> f32 {
    let wrapped = value.rem_euclid(max);
    if wrapped >= max {
        0.0
    } else {
        wrapped
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from(value: (f32, f32)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rotating_up_by_ninety_points_right() {
        let right = UP.rotated(90.0);
        assert_abs_diff_eq!(right.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(right.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn thirty_degree_steps_compose() {
        let mut direction = UP;
        for _ in 0..12 {
            direction.rotate_ip(30.0);
        }
        assert_abs_diff_eq!(direction.x, UP.x, epsilon = 1e-5);
        assert_abs_diff_eq!(direction.y, UP.y, epsilon = 1e-5);

        let mut half_turn = UP;
        for _ in 0..6 {
            half_turn.rotate_ip(30.0);
        }
        assert_abs_diff_eq!(half_turn.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(half_turn.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        assert_abs_diff_eq!(v.rotated(137.0).length(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn angle_to_is_signed() {
        let right = Vec2::new(1.0, 0.0);
        let down = Vec2::new(0.0, 1.0);
        assert_abs_diff_eq!(right.angle_to(down), 90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(down.angle_to(right), -90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(UP.angle_to(-UP), 180.0, epsilon = 1e-4);
        assert_abs_diff_eq!(UP.angle_to(UP), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn angle_to_matches_rotation() {
        let v = UP.rotated(-60.0);
        assert_abs_diff_eq!(UP.angle_to(v), -60.0, epsilon = 1e-4);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_abs_diff_eq!(
            Vec2::new(1.0, 1.0).distance(Vec2::new(4.0, 5.0)),
            5.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn wrap_uses_mathematical_modulo() {
        let w = Vec2::new(-10.0, 610.0).wrapped(800.0, 600.0);
        assert_abs_diff_eq!(w.x, 790.0, epsilon = 1e-4);
        assert_abs_diff_eq!(w.y, 10.0, epsilon = 1e-4);

        let far = Vec2::new(-2401.5, 1800.0).wrapped(800.0, 600.0);
        assert_abs_diff_eq!(far.x, 798.5, epsilon = 1e-3);
        assert_abs_diff_eq!(far.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn wrap_never_reaches_upper_bound() {
        let w = Vec2::new(-1e-7, -1e-9).wrapped(800.0, 600.0);
        assert!(w.x >= 0.0 && w.x < 800.0);
        assert!(w.y >= 0.0 && w.y < 600.0);
    }
}
