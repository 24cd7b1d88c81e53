use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::kdtree::KdTree;
use crate::r#type::CoordFloat;

/// A set of unique points answering membership, range and nearest-neighbor queries.
///
/// [`KdTree`] is the indexed implementation. Any other implementation, such as an exhaustive
/// scan over a sorted set, must return the same answers: the same membership, the same range
/// results as a set, and a nearest point at the same distance.
pub trait PointIndex<N: CoordFloat> {
    /// Add `point` if not already present. Returns `true` if it was added.
    fn insert(&mut self, point: Point<N>) -> Result<bool>;

    /// Returns `true` if a point equal to `point` is stored.
    fn contains(&self, point: &Point<N>) -> bool;

    /// All stored points inside `rect`, boundary included, in unspecified order.
    fn range(&self, rect: &Rect<N>) -> Vec<Point<N>>;

    /// A stored point at minimum distance from `query`, or `None` if empty.
    fn nearest(&self, query: &Point<N>) -> Option<Point<N>>;

    /// The number of distinct stored points.
    fn size(&self) -> usize;

    /// Returns `true` if no point is stored.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<N: CoordFloat> PointIndex<N> for KdTree<N> {
    fn insert(&mut self, point: Point<N>) -> Result<bool> {
        KdTree::insert(self, point)
    }

    fn contains(&self, point: &Point<N>) -> bool {
        KdTree::contains(self, point)
    }

    fn range(&self, rect: &Rect<N>) -> Vec<Point<N>> {
        KdTree::range(self, rect)
    }

    fn nearest(&self, query: &Point<N>) -> Option<Point<N>> {
        KdTree::nearest(self, query)
    }

    fn size(&self) -> usize {
        KdTree::size(self)
    }

    fn is_empty(&self) -> bool {
        KdTree::is_empty(self)
    }
}
