//! A 2-d tree storing a set of unique planar points.
//!
//! Each node of a [`KdTree`] holds one point and the axis-aligned region that point subdivides.
//! Nodes at even depth split their region vertically on `x`, nodes at odd depth horizontally on
//! `y`. The regions let the tree answer three kinds of queries without visiting every point:
//!
//! - membership, with [`KdTree::contains`],
//! - axis-aligned range search, with [`KdTree::range`], which skips every subtree whose region
//!   misses the query rectangle,
//! - nearest-neighbor search, with [`KdTree::nearest`], a branch-and-bound search that skips
//!   every subtree whose region is farther away than the best point found so far.
//!
//! The tree is not balanced and points cannot be removed.
//!
//! ```
//! use planar_kdtree::{KdTreeBuilder, Point, Rect};
//!
//! let mut builder = KdTreeBuilder::new_with_domain(Rect::try_new(0., 0., 100., 100.)?);
//! builder.add(54., 1.)?;
//! builder.add(97., 21.)?;
//! builder.add(65., 35.)?;
//! let tree = builder.finish()?;
//!
//! assert_eq!(tree.size(), 3);
//! assert_eq!(tree.nearest_xy(60., 30.)?, Some(Point::try_new(65., 35.)?));
//! # Ok::<(), planar_kdtree::KdTreeError>(())
//! ```

mod error;
pub mod geometry;
pub mod kdtree;
mod r#trait;
mod r#type;

pub use error::{KdTreeError, Result};
pub use geometry::{Axis, Point, Rect};
pub use kdtree::{KdTree, KdTreeBuilder};
pub use r#trait::PointIndex;
pub use r#type::CoordFloat;

#[cfg(test)]
pub(crate) mod test;
