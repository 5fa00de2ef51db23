//! 2D axis (origin plus direction).

use crate::gp::{Dir2d, Pnt2d};
use serde::{Deserialize, Serialize};

/// An axis in the 2D plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ax2d {
    origin: Pnt2d,
    direction: Dir2d,
}

impl Ax2d {
    /// Creates an axis.
    #[inline]
    pub const fn new(origin: Pnt2d, direction: Dir2d) -> Self {
        Self { origin, direction }
    }

    /// Returns the origin.
    #[inline]
    pub const fn origin(&self) -> Pnt2d {
        self.origin
    }

    /// Returns the direction.
    #[inline]
    pub const fn direction(&self) -> Dir2d {
        self.direction
    }
}
