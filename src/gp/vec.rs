//! 3D vector.

use crate::precision;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 3D vector in cartesian coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vec3 {
    /// Creates a zero vector.
    #[inline]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Creates a vector with given components.
    #[inline]
    pub const fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
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

    /// Returns the Z component.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Dot product.
    #[inline]
    pub const fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub const fn crossed(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Returns the length.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.square_magnitude().sqrt()
    }

    /// Returns the squared length.
    #[inline]
    pub const fn square_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns a scaled copy.
    #[inline]
    pub const fn scaled(&self, factor: f64) -> Vec3 {
        Vec3 { x: self.x * factor, y: self.y * factor, z: self.z * factor }
    }

    /// Returns the unit vector with the same direction.
    /// Fails on a vector of negligible length.
    pub fn normalized(&self) -> Result<Vec3> {
        let m = self.magnitude();
        if m <= precision::RESOLUTION {
            return Err(KernelError::InvalidGeometry(
                "cannot normalize a zero-length vector".into(),
            ));
        }
        Ok(self.scaled(1.0 / m))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::from_coords(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::from_coords(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::from_coords(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, factor: f64) -> Vec3 {
        self.scaled(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_cross() {
        let x = Vec3::from_coords(1.0, 0.0, 0.0);
        let y = Vec3::from_coords(0.0, 1.0, 0.0);
        assert_eq!(x.crossed(&y), Vec3::from_coords(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_vec3_magnitude() {
        let v = Vec3::from_coords(2.0, 3.0, 6.0);
        assert!((v.magnitude() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec3_normalized() {
        assert!(Vec3::new().normalized().is_err());
        let v = Vec3::from_coords(0.0, 0.0, 3.0).normalized().unwrap();
        assert!((v.z() - 1.0).abs() < 1e-12);
    }
}
