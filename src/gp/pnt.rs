//! 3D point.

use crate::gp::Vec3;
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 3D point in cartesian coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pnt {
    x: f64,
    y: f64,
    z: f64,
}

impl Pnt {
    /// Creates a point at the origin.
    #[inline]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Creates a point with given coordinates.
    #[inline]
    pub const fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the X coordinate.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the Y coordinate.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns the Z coordinate.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Returns the distance to another point.
    #[inline]
    pub fn distance(&self, other: &Pnt) -> f64 {
        self.square_distance(other).sqrt()
    }

    /// Returns the squared distance to another point.
    #[inline]
    pub const fn square_distance(&self, other: &Pnt) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Checks if this point is equal to another within tolerance.
    #[inline]
    pub fn is_equal(&self, other: &Pnt, tolerance: f64) -> bool {
        self.square_distance(other) <= tolerance * tolerance
    }

    /// Checks coincidence under the ambient distance tolerance.
    #[inline]
    pub fn identical(&self, other: &Pnt) -> bool {
        self.square_distance(other) <= Tolerance::current().distance2()
    }

    /// Linear interpolation towards another point.
    #[inline]
    pub fn lerp(&self, other: &Pnt, ratio: f64) -> Pnt {
        Pnt::from_coords(
            self.x + ratio * (other.x - self.x),
            self.y + ratio * (other.y - self.y),
            self.z + ratio * (other.z - self.z),
        )
    }

    /// Returns translated copy.
    #[inline]
    pub fn translated(&self, vec: Vec3) -> Pnt {
        Pnt::from_coords(self.x + vec.x(), self.y + vec.y(), self.z + vec.z())
    }
}

impl Add<Vec3> for Pnt {
    type Output = Pnt;
    #[inline]
    fn add(self, vec: Vec3) -> Pnt {
        self.translated(vec)
    }
}

impl Sub for Pnt {
    type Output = Vec3;
    #[inline]
    fn sub(self, other: Pnt) -> Vec3 {
        Vec3::from_coords(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}
