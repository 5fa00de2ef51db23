//! 2D hyperbola.

use crate::gp::{Ax22d, Pnt2d};
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// One branch of a 2D hyperbola, defined by a placement frame and two
/// radii.
///
/// Parameterization in the local frame: `x = a cosh(t)`, `y = b sinh(t)`,
/// where `a` is the x radius (distance from center to vertex) and `b`
/// the y radius (asymptote slope `b/a`). Only the branch opening towards
/// the frame's +x is represented. The parameter domain is infinite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hypr2d {
    position: Ax22d,
    x_radius: f64,
    y_radius: f64,
}

impl Hypr2d {
    /// Creates a hyperbola.
    pub fn new(position: Ax22d, x_radius: f64, y_radius: f64) -> Result<Self> {
        if x_radius <= 0.0 || y_radius <= 0.0 {
            return Err(KernelError::InvalidGeometry(format!(
                "hyperbola radii must be positive, got ({x_radius}, {y_radius})"
            )));
        }
        Ok(Self { position, x_radius, y_radius })
    }

    /// Returns the center (intersection of the asymptotes).
    #[inline]
    pub const fn center(&self) -> Pnt2d {
        self.position.origin()
    }

    /// Returns the placement frame.
    #[inline]
    pub const fn position(&self) -> Ax22d {
        self.position
    }

    /// Distance from center to vertex.
    #[inline]
    pub const fn x_radius(&self) -> f64 {
        self.x_radius
    }

    /// Conjugate radius.
    #[inline]
    pub const fn y_radius(&self) -> f64 {
        self.y_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypr2d_new() {
        let h = Hypr2d::new(Ax22d::standard(), 2.0, 1.0).unwrap();
        assert_eq!(h.x_radius(), 2.0);
        assert_eq!(h.y_radius(), 1.0);
    }

    #[test]
    fn test_hypr2d_rejects_nonpositive_radii() {
        assert!(Hypr2d::new(Ax22d::standard(), -1.0, 1.0).is_err());
    }
}
