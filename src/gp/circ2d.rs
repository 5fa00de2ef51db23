//! 2D circle.

use crate::gp::{Ax22d, Dir2d, Pnt2d};
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A 2D circle defined by a placement frame and a radius.
///
/// Parameterization: `P(t) = center + r cos(t) X + r sin(t) Y`,
/// periodic over `[0, 2pi)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circ2d {
    position: Ax22d,
    radius: f64,
}

impl Circ2d {
    /// Creates a circle centered at `center` with the standard orientation.
    pub fn new(center: Pnt2d, radius: f64) -> Result<Self> {
        Self::from_axis(Ax22d::from_origin_x_direction(center, Dir2d::x_dir()), radius)
    }

    /// Creates a circle with an explicit placement frame.
    pub fn from_axis(position: Ax22d, radius: f64) -> Result<Self> {
        if radius <= 0.0 {
            return Err(KernelError::InvalidGeometry(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        Ok(Self { position, radius })
    }

    /// Returns the center.
    #[inline]
    pub const fn center(&self) -> Pnt2d {
        self.position.origin()
    }

    /// Returns the radius.
    #[inline]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the placement frame.
    #[inline]
    pub const fn position(&self) -> Ax22d {
        self.position
    }

    /// Signed distance from a point to the circle.
    /// Positive outside, negative inside, zero on the circle.
    #[inline]
    pub fn distance(&self, point: &Pnt2d) -> f64 {
        point.distance(&self.center()) - self.radius
    }

    /// Checks if a point is on the circle within tolerance.
    #[inline]
    pub fn contains(&self, point: &Pnt2d, tolerance: f64) -> bool {
        self.distance(point).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circ2d_new() {
        let c = Circ2d::new(Pnt2d::from_coords(1.0, 2.0), 3.0).unwrap();
        assert_eq!(c.radius(), 3.0);
        assert_eq!(c.center().x(), 1.0);
    }

    #[test]
    fn test_circ2d_rejects_nonpositive_radius() {
        assert!(Circ2d::new(Pnt2d::new(), 0.0).is_err());
        assert!(Circ2d::new(Pnt2d::new(), -1.0).is_err());
    }

    #[test]
    fn test_circ2d_distance() {
        let c = Circ2d::new(Pnt2d::new(), 5.0).unwrap();
        assert!(c.distance(&Pnt2d::from_coords(5.0, 0.0)).abs() < 1e-12);
        assert!((c.distance(&Pnt2d::from_coords(10.0, 0.0)) - 5.0).abs() < 1e-12);
        assert!(c.contains(&Pnt2d::from_coords(0.0, 5.0), 1e-10));
    }
}
