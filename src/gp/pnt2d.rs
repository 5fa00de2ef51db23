//! 2D point.

use crate::gp::Vec2d;
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point in cartesian coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pnt2d {
    x: f64,
    y: f64,
}

impl Pnt2d {
    /// Creates a point at the origin (0, 0).
    #[inline]
    pub const fn new() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Creates a point with given coordinates.
    #[inline]
    pub const fn from_coords(x: f64, y: f64) -> Self {
        Self { x, y }
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

    /// Returns the distance to another point.
    #[inline]
    pub fn distance(&self, other: &Pnt2d) -> f64 {
        self.square_distance(other).sqrt()
    }

    /// Returns the squared distance to another point.
    #[inline]
    pub const fn square_distance(&self, other: &Pnt2d) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Checks if this point is equal to another within tolerance.
    #[inline]
    pub fn is_equal(&self, other: &Pnt2d, tolerance: f64) -> bool {
        self.square_distance(other) <= tolerance * tolerance
    }

    /// Checks coincidence under the ambient distance tolerance.
    #[inline]
    pub fn identical(&self, other: &Pnt2d) -> bool {
        self.square_distance(other) <= Tolerance::current().distance2()
    }

    /// Linear interpolation towards another point.
    /// `ratio` 0 yields `self`, 1 yields `other`.
    #[inline]
    pub fn lerp(&self, other: &Pnt2d, ratio: f64) -> Pnt2d {
        Pnt2d::from_coords(
            self.x + ratio * (other.x - self.x),
            self.y + ratio * (other.y - self.y),
        )
    }

    /// Returns translated copy.
    #[inline]
    pub fn translated(&self, vec: Vec2d) -> Pnt2d {
        Pnt2d::from_coords(self.x + vec.x(), self.y + vec.y())
    }
}

impl Add<Vec2d> for Pnt2d {
    type Output = Pnt2d;
    #[inline]
    fn add(self, vec: Vec2d) -> Pnt2d {
        self.translated(vec)
    }
}

impl Sub for Pnt2d {
    type Output = Vec2d;
    #[inline]
    fn sub(self, other: Pnt2d) -> Vec2d {
        Vec2d::from_coords(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pnt2d_distance() {
        let p1 = Pnt2d::from_coords(0.0, 0.0);
        let p2 = Pnt2d::from_coords(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-12);
        assert_eq!(p1.square_distance(&p2), 25.0);
    }

    #[test]
    fn test_pnt2d_is_equal() {
        let p1 = Pnt2d::from_coords(1.0, 2.0);
        let p2 = Pnt2d::from_coords(1.0 + 1e-8, 2.0);
        assert!(p1.is_equal(&p2, 1e-7));
        assert!(!p1.is_equal(&p2, 1e-9));
    }

    #[test]
    fn test_pnt2d_lerp() {
        let p1 = Pnt2d::from_coords(0.0, 0.0);
        let p2 = Pnt2d::from_coords(2.0, 4.0);
        let mid = p1.lerp(&p2, 0.5);
        assert_eq!(mid, Pnt2d::from_coords(1.0, 2.0));
    }

    #[test]
    fn test_pnt2d_sub_gives_vector() {
        let v = Pnt2d::from_coords(3.0, 5.0) - Pnt2d::from_coords(1.0, 2.0);
        assert_eq!((v.x(), v.y()), (2.0, 3.0));
    }
}
