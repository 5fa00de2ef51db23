//! 3D ellipse.

use crate::gp::{Ax2, Pnt};
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// An ellipse in 3D space, lying in the z = 0 plane of its placement
/// frame, with radii along the frame's x and y directions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Elips {
    position: Ax2,
    x_radius: f64,
    y_radius: f64,
}

impl Elips {
    /// Creates an ellipse.
    pub fn new(position: Ax2, x_radius: f64, y_radius: f64) -> Result<Self> {
        if x_radius <= 0.0 || y_radius <= 0.0 {
            return Err(KernelError::InvalidGeometry(format!(
                "ellipse radii must be positive, got ({x_radius}, {y_radius})"
            )));
        }
        Ok(Self { position, x_radius, y_radius })
    }

    /// Returns the center.
    #[inline]
    pub const fn center(&self) -> Pnt {
        self.position.origin()
    }

    /// Returns the placement frame.
    #[inline]
    pub const fn position(&self) -> Ax2 {
        self.position
    }

    /// Radius along the frame's x direction.
    #[inline]
    pub const fn x_radius(&self) -> f64 {
        self.x_radius
    }

    /// Radius along the frame's y direction.
    #[inline]
    pub const fn y_radius(&self) -> f64 {
        self.y_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elips_new() {
        let e = Elips::new(Ax2::standard(), 3.0, 2.0).unwrap();
        assert_eq!(e.x_radius(), 3.0);
        assert!(Elips::new(Ax2::standard(), 3.0, 0.0).is_err());
    }
}
