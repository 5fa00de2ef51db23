//! 2D unit direction.

use crate::gp::Vec2d;
use crate::precision;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A normalized 2D direction. The unit-length invariant is maintained by
/// construction; deserialized values are trusted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dir2d {
    x: f64,
    y: f64,
}

impl Dir2d {
    /// The +X direction.
    #[inline]
    pub const fn x_dir() -> Self {
        Self { x: 1.0, y: 0.0 }
    }

    /// The +Y direction.
    #[inline]
    pub const fn y_dir() -> Self {
        Self { x: 0.0, y: 1.0 }
    }

    /// Creates a direction from components, normalizing them.
    /// Fails on a vector of negligible length.
    pub fn from_coords(x: f64, y: f64) -> Result<Self> {
        let m = (x * x + y * y).sqrt();
        if m <= precision::RESOLUTION {
            return Err(KernelError::InvalidGeometry(
                "cannot build a direction from a zero-length vector".into(),
            ));
        }
        Ok(Self { x: x / m, y: y / m })
    }

    /// Creates a direction from a vector.
    #[inline]
    pub fn from_vec(v: &Vec2d) -> Result<Self> {
        Self::from_coords(v.x(), v.y())
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

    /// Returns this direction as a vector.
    #[inline]
    pub const fn vec(&self) -> Vec2d {
        Vec2d::from_coords(self.x, self.y)
    }

    /// Counter-clockwise perpendicular.
    #[inline]
    pub const fn perpendicular(&self) -> Dir2d {
        Dir2d { x: -self.y, y: self.x }
    }

    /// Opposite direction.
    #[inline]
    pub const fn reversed(&self) -> Dir2d {
        Dir2d { x: -self.x, y: -self.y }
    }

    /// Dot product.
    #[inline]
    pub const fn dot(&self, other: &Dir2d) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar cross product.
    #[inline]
    pub const fn crossed(&self, other: &Dir2d) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Angle from +X, in (-pi, pi].
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Returns a copy rotated by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Dir2d {
        let (sin, cos) = angle.sin_cos();
        Dir2d {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir2d_normalizes() {
        let d = Dir2d::from_coords(3.0, 4.0).unwrap();
        assert!((d.x() - 0.6).abs() < 1e-12);
        assert!((d.y() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_dir2d_zero_rejected() {
        assert!(Dir2d::from_coords(0.0, 0.0).is_err());
    }

    #[test]
    fn test_dir2d_perpendicular() {
        let d = Dir2d::x_dir().perpendicular();
        assert_eq!(d, Dir2d::y_dir());
        assert_eq!(Dir2d::x_dir().crossed(&d), 1.0);
    }

    #[test]
    fn test_dir2d_rotated() {
        let d = Dir2d::x_dir().rotated(std::f64::consts::FRAC_PI_2);
        assert!((d.x()).abs() < 1e-12);
        assert!((d.y() - 1.0).abs() < 1e-12);
    }
}
