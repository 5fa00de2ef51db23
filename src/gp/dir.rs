//! 3D unit direction.

use crate::gp::Vec3;
use crate::precision;
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A normalized 3D direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dir {
    x: f64,
    y: f64,
    z: f64,
}

impl Dir {
    /// The +X direction.
    #[inline]
    pub const fn x_dir() -> Self {
        Self { x: 1.0, y: 0.0, z: 0.0 }
    }

    /// The +Y direction.
    #[inline]
    pub const fn y_dir() -> Self {
        Self { x: 0.0, y: 1.0, z: 0.0 }
    }

    /// The +Z direction.
    #[inline]
    pub const fn z_dir() -> Self {
        Self { x: 0.0, y: 0.0, z: 1.0 }
    }

    /// Creates a direction from components, normalizing them.
    /// Fails on a vector of negligible length.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Result<Self> {
        let m = (x * x + y * y + z * z).sqrt();
        if m <= precision::RESOLUTION {
            return Err(KernelError::InvalidGeometry(
                "cannot build a direction from a zero-length vector".into(),
            ));
        }
        Ok(Self { x: x / m, y: y / m, z: z / m })
    }

    /// Creates a direction from a vector.
    #[inline]
    pub fn from_vec(v: &Vec3) -> Result<Self> {
        Self::from_coords(v.x(), v.y(), v.z())
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

    /// Returns this direction as a vector.
    #[inline]
    pub const fn vec(&self) -> Vec3 {
        Vec3::from_coords(self.x, self.y, self.z)
    }

    /// Opposite direction.
    #[inline]
    pub const fn reversed(&self) -> Dir {
        Dir { x: -self.x, y: -self.y, z: -self.z }
    }

    /// Dot product.
    #[inline]
    pub const fn dot(&self, other: &Dir) -> f64 {
        self.vec().dot(&other.vec())
    }

    /// Some unit vector perpendicular to this direction.
    ///
    /// Crosses with the coordinate axis this direction is least aligned
    /// with, so the result is well conditioned.
    pub fn perpendicular(&self) -> Dir {
        let ax = self.x.abs();
        let ay = self.y.abs();
        let az = self.z.abs();
        let axis = if ax <= ay && ax <= az {
            Vec3::from_coords(1.0, 0.0, 0.0)
        } else if ay <= ax && ay <= az {
            Vec3::from_coords(0.0, 1.0, 0.0)
        } else {
            Vec3::from_coords(0.0, 0.0, 1.0)
        };
        let v = self.vec().crossed(&axis);
        // Unit by construction: the chosen axis is never parallel to self.
        let m = v.magnitude();
        Dir { x: v.x() / m, y: v.y() / m, z: v.z() / m }
    }
}
