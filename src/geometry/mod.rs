//! Planar value types: points, axis-aligned rectangles and splitting axes.

mod axis;
mod point;
mod rect;

pub use axis::Axis;
pub use point::Point;
pub(crate) use rect::Corner;
pub use rect::Rect;
