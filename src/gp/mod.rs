//! Geometric primitives: points, vectors, directions, placements and
//! the analytic conic carriers built on them.
//!
//! 2D types carry a `2d` suffix; 3D types do not.

mod ax2;
mod ax22d;
mod ax2d;
mod circ;
mod circ2d;
mod dir;
mod dir2d;
mod elips;
mod elips2d;
mod hypr2d;
mod lin;
mod lin2d;
mod parab2d;
mod pnt;
mod pnt2d;
mod vec;
mod vec2d;

pub use ax2::Ax2;
pub use ax22d::Ax22d;
pub use ax2d::Ax2d;
pub use circ::Circ;
pub use circ2d::Circ2d;
pub use dir::Dir;
pub use dir2d::Dir2d;
pub use elips::Elips;
pub use elips2d::Elips2d;
pub use hypr2d::Hypr2d;
pub use lin::Lin;
pub use lin2d::Lin2d;
pub use parab2d::Parab2d;
pub use pnt::Pnt;
pub use pnt2d::Pnt2d;
pub use vec::Vec3;
pub use vec2d::Vec2d;
