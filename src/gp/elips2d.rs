//! 2D ellipse.

use crate::gp::{Ax22d, Pnt2d};
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A 2D ellipse defined by a placement frame and two radii along the
/// frame's axes.
///
/// Parameterization: `P(t) = center + rx cos(t) X + ry sin(t) Y`,
/// periodic over `[0, 2pi)`. The x radius is not required to be the
/// larger one; algorithms that need the major axis swap internally.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Elips2d {
    position: Ax22d,
    x_radius: f64,
    y_radius: f64,
}

impl Elips2d {
    /// Creates an ellipse.
    pub fn new(position: Ax22d, x_radius: f64, y_radius: f64) -> Result<Self> {
        if x_radius <= 0.0 || y_radius <= 0.0 {
            return Err(KernelError::InvalidGeometry(format!(
                "ellipse radii must be positive, got ({x_radius}, {y_radius})"
            )));
        }
        Ok(Self { position, x_radius, y_radius })
    }

    /// Returns the center.
    #[inline]
    pub const fn center(&self) -> Pnt2d {
        self.position.origin()
    }

    /// Returns the placement frame.
    #[inline]
    pub const fn position(&self) -> Ax22d {
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

    /// The larger of the two radii.
    #[inline]
    pub fn major_radius(&self) -> f64 {
        self.x_radius.max(self.y_radius)
    }

    /// The smaller of the two radii.
    #[inline]
    pub fn minor_radius(&self) -> f64 {
        self.x_radius.min(self.y_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elips2d_new() {
        let e = Elips2d::new(Ax22d::standard(), 4.0, 2.0).unwrap();
        assert_eq!(e.major_radius(), 4.0);
        assert_eq!(e.minor_radius(), 2.0);
    }

    #[test]
    fn test_elips2d_rejects_nonpositive_radii() {
        assert!(Elips2d::new(Ax22d::standard(), 0.0, 1.0).is_err());
        assert!(Elips2d::new(Ax22d::standard(), 1.0, -2.0).is_err());
    }

    #[test]
    fn test_elips2d_minor_axis_along_x() {
        let e = Elips2d::new(Ax22d::standard(), 2.0, 4.0).unwrap();
        assert_eq!(e.x_radius(), 2.0);
        assert_eq!(e.major_radius(), 4.0);
    }
}
