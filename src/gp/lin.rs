//! 3D line.

use crate::gp::{Dir, Pnt};
use serde::{Deserialize, Serialize};

/// An infinite 3D line, parameterized by signed arc length from its
/// location point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lin {
    location: Pnt,
    direction: Dir,
}

impl Lin {
    /// Creates a line through `location` along `direction`.
    #[inline]
    pub const fn new(location: Pnt, direction: Dir) -> Self {
        Self { location, direction }
    }

    /// Returns the location point (parameter 0).
    #[inline]
    pub const fn location(&self) -> Pnt {
        self.location
    }

    /// Returns the unit direction.
    #[inline]
    pub const fn direction(&self) -> Dir {
        self.direction
    }

    /// Evaluates the point at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Pnt {
        self.location.translated(self.direction.vec().scaled(t))
    }

    /// Parameter of the orthogonal projection of `p`.
    #[inline]
    pub fn parameter_of(&self, p: &Pnt) -> f64 {
        (*p - self.location).dot(&self.direction.vec())
    }

    /// Distance of `p` from the line.
    #[inline]
    pub fn distance(&self, p: &Pnt) -> f64 {
        (*p - self.location).crossed(&self.direction.vec()).magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lin_point_at() {
        let l = Lin::new(Pnt::from_coords(1.0, 0.0, 0.0), Dir::z_dir());
        assert_eq!(l.point_at(2.0), Pnt::from_coords(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_lin_distance() {
        let l = Lin::new(Pnt::new(), Dir::x_dir());
        assert!((l.distance(&Pnt::from_coords(5.0, 3.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}
