//! Immutable 2D vector with a cached magnitude
//!
//! Every operation returns a new value. The magnitude is computed once when
//! the vector is built, so hot paths (bounding-sphere tests, normalization)
//! never recompute the square root.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D vector value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec2", into = "Vec2")]
pub struct Vector2 {
    v: Vec2,
    magnitude: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self {
        v: Vec2::ZERO,
        magnitude: 0.0,
    };

    pub fn new(x: f32, y: f32) -> Self {
        Self::from(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.v.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.v.y
    }

    /// Length of the vector (cached)
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn add_scalar(&self, x: f32, y: f32) -> Self {
        Self::new(self.v.x + x, self.v.y + y)
    }

    pub fn sub_scalar(&self, x: f32, y: f32) -> Self {
        Self::new(self.v.x - x, self.v.y - y)
    }

    pub fn dot(&self, other: Vector2) -> f32 {
        self.v.dot(other.v)
    }

    /// Angle between the two vectors in radians.
    ///
    /// Zero-length inputs have no direction; the angle is reported as 0.
    pub fn angle_from(&self, other: Vector2) -> f32 {
        let denom = self.magnitude * other.magnitude;
        if denom == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Unit vector in the same direction, or zero for a zero vector
    pub fn normalize(&self) -> Self {
        if self.magnitude == 0.0 {
            return Self::ZERO;
        }
        *self / self.magnitude
    }

    pub fn inverse_x(&self) -> Self {
        Self::new(-self.v.x, self.v.y)
    }

    pub fn inverse_y(&self) -> Self {
        Self::new(self.v.x, -self.v.y)
    }

    pub fn with_x(&self, x: f32) -> Self {
        Self::new(x, self.v.y)
    }

    pub fn with_y(&self, y: f32) -> Self {
        Self::new(self.v.x, y)
    }

    /// Distance between two points
    pub fn distance(&self, other: Vector2) -> f32 {
        (*self - other).magnitude
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self {
            v,
            magnitude: v.length(),
        }
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        v.v
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::from(self.v + rhs.v)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::from(self.v - rhs.v)
    }
}

/// Component-wise product
impl Mul for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::from(self.v * rhs.v)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f32) -> Vector2 {
        Vector2::from(self.v * rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f32) -> Vector2 {
        Vector2::from(self.v / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::from(-self.v)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.v.x, self.v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_magnitude_three_four_five() {
        assert_eq!(Vector2::new(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
        assert_eq!(Vector2::new(0.0, 0.0).normalize(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = Vector2::new(3.0, -4.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
        assert!((n.x() - 0.6).abs() < 1e-6);
        assert!((n.y() + 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_arithmetic_returns_new_values() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 5.0);

        assert_eq!(a + b, Vector2::new(4.0, 7.0));
        assert_eq!(b - a, Vector2::new(2.0, 3.0));
        assert_eq!(a * b, Vector2::new(3.0, 10.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vector2::new(1.5, 2.5));
        assert_eq!(a.add_scalar(1.0, -1.0), Vector2::new(2.0, 1.0));
        assert_eq!(a.sub_scalar(1.0, -1.0), Vector2::new(0.0, 3.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        assert_eq!(a.dot(b), 13.0);
        // Operands are untouched
        assert_eq!(a, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn test_axis_inversion() {
        let v = Vector2::new(2.0, -7.0);
        assert_eq!(v.inverse_x(), Vector2::new(-2.0, -7.0));
        assert_eq!(v.inverse_y(), Vector2::new(2.0, 7.0));
        assert_eq!(v.with_x(1.0), Vector2::new(1.0, -7.0));
        assert_eq!(v.with_y(1.0), Vector2::new(2.0, 1.0));
    }

    #[test]
    fn test_angle_from() {
        let right = Vector2::new(1.0, 0.0);
        let up = Vector2::new(0.0, 3.0);
        let left = Vector2::new(-2.0, 0.0);

        assert!((right.angle_from(up) - FRAC_PI_2).abs() < 1e-5);
        assert!((right.angle_from(left) - PI).abs() < 1e-5);
        assert!(right.angle_from(right).abs() < 1e-3);
        assert_eq!(right.angle_from(Vector2::ZERO), 0.0);
    }

    #[test]
    fn test_serde_recomputes_magnitude() {
        let json = serde_json::to_string(&Vector2::new(3.0, 4.0)).unwrap();
        let back: Vector2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back.magnitude(), 5.0);
        assert_eq!(back.to_string(), "(3, 4)");
    }

    proptest! {
        #[test]
        fn prop_magnitude_matches_components(x in -1.0e3f32..1.0e3, y in -1.0e3f32..1.0e3) {
            let v = Vector2::new(x, y);
            let expected = (x * x + y * y).sqrt();
            prop_assert!((v.magnitude() - expected).abs() <= 1e-3 * expected.max(1.0));
        }

        #[test]
        fn prop_derived_vectors_keep_magnitude_invariant(
            x in -1.0e3f32..1.0e3,
            y in -1.0e3f32..1.0e3,
            s in -10.0f32..10.0,
        ) {
            let v = Vector2::new(x, y) * s + Vector2::new(y, x);
            let expected = (v.x() * v.x() + v.y() * v.y()).sqrt();
            prop_assert!((v.magnitude() - expected).abs() <= 1e-3 * expected.max(1.0));
        }
    }
}
