//! 3D placement frame (origin, main z direction, x reference).

use crate::gp::{Dir, Pnt, Vec3};
use crate::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A right-handed coordinate system in 3D space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ax2 {
    origin: Pnt,
    zdir: Dir,
    xdir: Dir,
    ydir: Dir,
}

impl Ax2 {
    /// Creates a placement from origin, main (z) direction and an x
    /// reference. The x reference is orthogonalized against z; it must
    /// not be parallel to z.
    pub fn new(origin: Pnt, zdir: Dir, x_ref: Dir) -> Result<Self> {
        let x = x_ref.vec() - zdir.vec().scaled(zdir.vec().dot(&x_ref.vec()));
        let xdir = Dir::from_vec(&x).map_err(|_| {
            KernelError::InvalidGeometry(
                "placement x reference is parallel to the main direction".into(),
            )
        })?;
        let y = zdir.vec().crossed(&xdir.vec());
        let ydir = Dir::from_vec(&y)?;
        Ok(Self { origin, zdir, xdir, ydir })
    }

    /// Creates a placement from origin and main direction, with an
    /// arbitrary well-conditioned x direction.
    pub fn from_z_axis(origin: Pnt, zdir: Dir) -> Self {
        let xdir = zdir.perpendicular();
        let y = zdir.vec().crossed(&xdir.vec());
        // xdir is unit and perpendicular to zdir, so y normalizes cleanly.
        let ydir = Dir::from_vec(&y).unwrap_or(xdir);
        Self { origin, zdir, xdir, ydir }
    }

    /// The standard placement at the world origin.
    pub fn standard() -> Self {
        Self {
            origin: Pnt::new(),
            zdir: Dir::z_dir(),
            xdir: Dir::x_dir(),
            ydir: Dir::y_dir(),
        }
    }

    /// Returns the origin.
    #[inline]
    pub const fn origin(&self) -> Pnt {
        self.origin
    }

    /// Returns the main (z) direction.
    #[inline]
    pub const fn z_direction(&self) -> Dir {
        self.zdir
    }

    /// Returns the x direction.
    #[inline]
    pub const fn x_direction(&self) -> Dir {
        self.xdir
    }

    /// Returns the y direction.
    #[inline]
    pub const fn y_direction(&self) -> Dir {
        self.ydir
    }

    /// Maps local coordinates into world space.
    #[inline]
    pub fn point_at(&self, x: f64, y: f64, z: f64) -> Pnt {
        self.origin.translated(
            self.xdir.vec().scaled(x) + self.ydir.vec().scaled(y) + self.zdir.vec().scaled(z),
        )
    }

    /// Maps a local displacement into a world vector.
    #[inline]
    pub fn vec_at(&self, x: f64, y: f64, z: f64) -> Vec3 {
        self.xdir.vec().scaled(x) + self.ydir.vec().scaled(y) + self.zdir.vec().scaled(z)
    }

    /// Expresses a world point in local coordinates.
    #[inline]
    pub fn to_local(&self, p: &Pnt) -> (f64, f64, f64) {
        let v = *p - self.origin;
        (
            v.dot(&self.xdir.vec()),
            v.dot(&self.ydir.vec()),
            v.dot(&self.zdir.vec()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ax2_orthogonalizes_x_reference() {
        let ax = Ax2::new(
            Pnt::new(),
            Dir::z_dir(),
            Dir::from_coords(1.0, 0.0, 0.5).unwrap(),
        )
        .unwrap();
        assert!(ax.x_direction().dot(&ax.z_direction()).abs() < 1e-12);
    }

    #[test]
    fn test_ax2_rejects_parallel_x_reference() {
        assert!(Ax2::new(Pnt::new(), Dir::z_dir(), Dir::z_dir()).is_err());
    }

    #[test]
    fn test_ax2_round_trip() {
        let ax = Ax2::from_z_axis(
            Pnt::from_coords(1.0, -2.0, 0.5),
            Dir::from_coords(1.0, 1.0, 1.0).unwrap(),
        );
        let p = ax.point_at(0.3, -0.7, 2.0);
        let (x, y, z) = ax.to_local(&p);
        assert!((x - 0.3).abs() < 1e-12);
        assert!((y + 0.7).abs() < 1e-12);
        assert!((z - 2.0).abs() < 1e-12);
    }
}
