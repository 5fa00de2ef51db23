//! Axis-aligned bounding boxes.

mod box_2d;
mod box_3d;

pub use box_2d::BndBox2d;
pub use box_3d::BndBox3d;
