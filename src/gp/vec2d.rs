//! 2D vector.

use crate::precision;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector in cartesian coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2d {
    x: f64,
    y: f64,
}

impl Vec2d {
    /// Creates a zero vector.
    #[inline]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Creates a vector with given components.
    #[inline]
    pub const fn from_coords(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the X component.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the Y component.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Dot product.
    #[inline]
    pub const fn dot(&self, other: &Vec2d) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar cross product (z component of the 3D cross).
    #[inline]
    pub const fn crossed(&self, other: &Vec2d) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the length.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.square_magnitude().sqrt()
    }

    /// Returns the squared length.
    #[inline]
    pub const fn square_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns a scaled copy.
    #[inline]
    pub const fn scaled(&self, factor: f64) -> Vec2d {
        Vec2d { x: self.x * factor, y: self.y * factor }
    }

    /// Returns the unit vector with the same direction.
    /// Fails on a vector of negligible length.
    pub fn normalized(&self) -> Result<Vec2d> {
        let m = self.magnitude();
        if m <= precision::RESOLUTION {
            return Err(KernelError::InvalidGeometry(
                "cannot normalize a zero-length vector".into(),
            ));
        }
        Ok(self.scaled(1.0 / m))
    }
}

impl Add for Vec2d {
    type Output = Vec2d;
    #[inline]
    fn add(self, other: Vec2d) -> Vec2d {
        Vec2d::from_coords(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2d {
    type Output = Vec2d;
    #[inline]
    fn sub(self, other: Vec2d) -> Vec2d {
        Vec2d::from_coords(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2d {
    type Output = Vec2d;
    #[inline]
    fn neg(self) -> Vec2d {
        Vec2d::from_coords(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2d {
    type Output = Vec2d;
    #[inline]
    fn mul(self, factor: f64) -> Vec2d {
        self.scaled(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2d_dot_cross() {
        let a = Vec2d::from_coords(1.0, 0.0);
        let b = Vec2d::from_coords(0.0, 2.0);
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(a.crossed(&b), 2.0);
        assert_eq!(b.crossed(&a), -2.0);
    }

    #[test]
    fn test_vec2d_magnitude() {
        let v = Vec2d::from_coords(3.0, 4.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2d_normalized() {
        let v = Vec2d::from_coords(0.0, 2.0).normalized().unwrap();
        assert!((v.magnitude() - 1.0).abs() < 1e-12);
        assert!(Vec2d::new().normalized().is_err());
    }
}
