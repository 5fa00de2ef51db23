//! 2D parabola.

use crate::gp::{Ax22d, Pnt2d};
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A 2D parabola defined by a placement frame and its focal distance.
///
/// Parameterization in the local frame: `x = f t^2`, `y = 2 f t`, so the
/// vertex is at the frame origin and the axis of symmetry is the frame's
/// x direction. The parameter domain is infinite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parab2d {
    position: Ax22d,
    focal: f64,
}

impl Parab2d {
    /// Creates a parabola.
    pub fn new(position: Ax22d, focal: f64) -> Result<Self> {
        if focal <= 0.0 {
            return Err(KernelError::InvalidGeometry(format!(
                "parabola focal distance must be positive, got {focal}"
            )));
        }
        Ok(Self { position, focal })
    }

    /// Returns the vertex.
    #[inline]
    pub const fn vertex(&self) -> Pnt2d {
        self.position.origin()
    }

    /// Returns the placement frame.
    #[inline]
    pub const fn position(&self) -> Ax22d {
        self.position
    }

    /// Returns the focal distance.
    #[inline]
    pub const fn focal(&self) -> f64 {
        self.focal
    }
}
