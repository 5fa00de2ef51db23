//! 2D placement frame (origin plus two perpendicular directions).

use crate::gp::{Dir2d, Pnt2d, Vec2d};
use serde::{Deserialize, Serialize};

/// A right-handed coordinate system in the 2D plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ax22d {
    origin: Pnt2d,
    xdir: Dir2d,
    ydir: Dir2d,
}

impl Ax22d {
    /// Creates a placement from origin and x direction; the y direction is
    /// the counter-clockwise perpendicular.
    #[inline]
    pub const fn from_origin_x_direction(origin: Pnt2d, xdir: Dir2d) -> Self {
        Self { origin, xdir, ydir: xdir.perpendicular() }
    }

    /// The standard placement at the world origin.
    #[inline]
    pub const fn standard() -> Self {
        Self::from_origin_x_direction(Pnt2d::new(), Dir2d::x_dir())
    }

    /// Returns the origin.
    #[inline]
    pub const fn origin(&self) -> Pnt2d {
        self.origin
    }

    /// Returns the x direction.
    #[inline]
    pub const fn x_direction(&self) -> Dir2d {
        self.xdir
    }

    /// Returns the y direction.
    #[inline]
    pub const fn y_direction(&self) -> Dir2d {
        self.ydir
    }

    /// Rotation angle of the x direction from the world +X.
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.xdir.angle()
    }

    /// Maps local coordinates into world space.
    #[inline]
    pub fn point_at(&self, x: f64, y: f64) -> Pnt2d {
        Pnt2d::from_coords(
            self.origin.x() + x * self.xdir.x() + y * self.ydir.x(),
            self.origin.y() + x * self.xdir.y() + y * self.ydir.y(),
        )
    }

    /// Maps a local displacement into a world vector.
    #[inline]
    pub fn vec_at(&self, x: f64, y: f64) -> Vec2d {
        Vec2d::from_coords(
            x * self.xdir.x() + y * self.ydir.x(),
            x * self.xdir.y() + y * self.ydir.y(),
        )
    }

    /// Expresses a world point in local coordinates.
    #[inline]
    pub fn to_local(&self, p: &Pnt2d) -> (f64, f64) {
        let v = *p - self.origin;
        (v.dot(&self.xdir.vec()), v.dot(&self.ydir.vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ax22d_round_trip() {
        let frame = Ax22d::from_origin_x_direction(
            Pnt2d::from_coords(1.0, 1.0),
            Dir2d::from_coords(1.0, 1.0).unwrap(),
        );
        let p = frame.point_at(2.0, -1.0);
        let (x, y) = frame.to_local(&p);
        assert!((x - 2.0).abs() < 1e-12);
        assert!((y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ax22d_right_handed() {
        let frame = Ax22d::standard();
        assert_eq!(frame.x_direction().crossed(&frame.y_direction()), 1.0);
    }
}
