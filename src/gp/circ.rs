//! 3D circle.

use crate::gp::{Ax2, Pnt};
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A circle in 3D space, lying in the z = 0 plane of its placement frame.
///
/// Parameterization: `P(t) = center + r cos(t) X + r sin(t) Y`,
/// periodic over `[0, 2pi)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circ {
    position: Ax2,
    radius: f64,
}

impl Circ {
    /// Creates a circle.
    pub fn new(position: Ax2, radius: f64) -> Result<Self> {
        if radius <= 0.0 {
            return Err(KernelError::InvalidGeometry(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        Ok(Self { position, radius })
    }

    /// Returns the center.
    #[inline]
    pub const fn center(&self) -> Pnt {
        self.position.origin()
    }

    /// Returns the radius.
    #[inline]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the placement frame.
    #[inline]
    pub const fn position(&self) -> Ax2 {
        self.position
    }
}
