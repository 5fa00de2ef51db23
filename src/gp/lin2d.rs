//! 2D line.

use crate::gp::{Ax2d, Dir2d, Pnt2d, Vec2d};
use serde::{Deserialize, Serialize};

/// An infinite 2D line, parameterized by signed arc length from its
/// location point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lin2d {
    position: Ax2d,
}

impl Lin2d {
    /// Creates a line through `location` along `direction`.
    #[inline]
    pub const fn new(location: Pnt2d, direction: Dir2d) -> Self {
        Self { position: Ax2d::new(location, direction) }
    }

    /// Returns the location point (parameter 0).
    #[inline]
    pub const fn location(&self) -> Pnt2d {
        self.position.origin()
    }

    /// Returns the unit direction.
    #[inline]
    pub const fn direction(&self) -> Dir2d {
        self.position.direction()
    }

    /// Evaluates the point at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Pnt2d {
        self.location().translated(self.direction().vec().scaled(t))
    }

    /// Parameter of the orthogonal projection of `p`.
    #[inline]
    pub fn parameter_of(&self, p: &Pnt2d) -> f64 {
        (*p - self.location()).dot(&self.direction().vec())
    }

    /// Signed distance of `p` from the line (positive on the left of the
    /// direction).
    #[inline]
    pub fn signed_distance(&self, p: &Pnt2d) -> f64 {
        let v: Vec2d = *p - self.location();
        self.direction().vec().crossed(&v)
    }

    /// Checks if `p` lies on the line within `tolerance`.
    #[inline]
    pub fn contains(&self, p: &Pnt2d, tolerance: f64) -> bool {
        self.signed_distance(p).abs() <= tolerance
    }
}
