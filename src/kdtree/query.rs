//! Range, radius and nearest-neighbor search.
//!
//! Every search keeps its state (result buffer, best candidate, traversal stack) in a value
//! owned by the call, never on the tree, so concurrent readers cannot observe each other.

use geo_traits::{CoordTrait, RectTrait};
#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tinyvec::TinyVec;
use tracing::trace;

use crate::error::{KdTreeError, Result};
use crate::geometry::{Axis, Point, Rect};
use crate::kdtree::index::{KdTree, Node};
use crate::r#type::CoordFloat;

/// Pending subtrees, each with the axis its root splits on. Deep (unbalanced) trees spill onto
/// the heap.
type Stack<'a, N> = TinyVec<[(Option<&'a Node<N>>, Axis); 32]>;

impl<N: CoordFloat> KdTree<N> {
    /// Search the tree for points within the given rectangle, boundary included.
    ///
    /// A subtree is skipped entirely when its region does not intersect `rect`. The order of
    /// the returned points is unspecified.
    pub fn range(&self, rect: &Rect<N>) -> Vec<Point<N>> {
        self.range_with_visits(rect).0
    }

    /// [`Self::range`], also returning how many nodes the search popped off its stack.
    pub(crate) fn range_with_visits(&self, rect: &Rect<N>) -> (Vec<Point<N>>, usize) {
        let mut result = vec![];
        let mut visited = 0;

        let mut stack: Stack<'_, N> = TinyVec::new();
        stack.push((self.root.as_deref(), Axis::X));

        while let Some((link, axis)) = stack.pop() {
            let Some(node) = link else {
                continue;
            };
            visited += 1;

            if !node.region.intersects(rect) {
                continue;
            }
            if rect.contains(&node.point) {
                result.push(node.point);
            }

            // a region that intersects the query says nothing about the node's own point, so
            // both halves are searched
            stack.push((node.right_top.as_deref(), axis.next()));
            stack.push((node.left_bottom.as_deref(), axis.next()));
        }

        trace!(visited, found = result.len(), "range search finished");
        (result, visited)
    }

    /// Validate a rectangle from any [`RectTrait`] implementation and search it.
    pub fn range_rect(&self, rect: &impl RectTrait<T = N>) -> Result<Vec<Point<N>>> {
        Ok(self.range(&Rect::try_from_rect(rect)?))
    }

    /// Validate and search the rectangle `[min_x, max_x] × [min_y, max_y]`.
    pub fn range_xy(&self, min_x: N, min_y: N, max_x: N, max_y: N) -> Result<Vec<Point<N>>> {
        Ok(self.range(&Rect::try_new(min_x, min_y, max_x, max_y)?))
    }

    /// Search the tree for points within `radius` of `center`, boundary included.
    ///
    /// Returns [`KdTreeError::InvalidArgument`] if `radius` is negative or not finite.
    pub fn within(&self, center: &Point<N>, radius: N) -> Result<Vec<Point<N>>> {
        if !radius.is_finite() || radius < N::zero() {
            return Err(KdTreeError::InvalidArgument(format!(
                "Radius must be finite and non-negative, got {:?}.",
                radius
            )));
        }

        let r2 = radius * radius;
        let mut result = vec![];

        let mut stack: Stack<'_, N> = TinyVec::new();
        stack.push((self.root.as_deref(), Axis::X));

        while let Some((link, axis)) = stack.pop() {
            let Some(node) = link else {
                continue;
            };
            if node.region.distance_squared_to(center) > r2 {
                continue;
            }
            if node.point.distance_squared_to(center) <= r2 {
                result.push(node.point);
            }

            stack.push((node.right_top.as_deref(), axis.next()));
            stack.push((node.left_bottom.as_deref(), axis.next()));
        }

        Ok(result)
    }

    /// Find the stored point closest to `query`, or `None` if the tree is empty.
    ///
    /// Among points at the same minimum distance, the first one reached is returned: the search
    /// starts at the root and always descends into the child on the query's side of the split
    /// before the other one, and a later point only replaces the best so far if it is strictly
    /// closer. The answer is therefore fixed for a given tree, but may differ between trees
    /// built from the same points in a different order.
    pub fn nearest(&self, query: &Point<N>) -> Option<Point<N>> {
        self.nearest_with_visits(query).map(|(best, _)| best)
    }

    /// [`Self::nearest`], also returning how many nodes survived the distance prune.
    pub(crate) fn nearest_with_visits(&self, query: &Point<N>) -> Option<(Point<N>, usize)> {
        let root = self.root.as_deref()?;
        let mut search = NearestSearch::new(*query, root.point);
        search.run(root);
        trace!(visited = search.visited, "nearest neighbor search finished");
        Some((search.best, search.visited))
    }

    /// Validate a coordinate from any [`CoordTrait`] implementation and find its nearest
    /// neighbor.
    pub fn nearest_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<Option<Point<N>>> {
        Ok(self.nearest(&Point::try_from_coord(coord)?))
    }

    /// Validate a point given by its coordinates and find its nearest neighbor.
    pub fn nearest_xy(&self, x: N, y: N) -> Result<Option<Point<N>>> {
        Ok(self.nearest(&Point::try_new(x, y)?))
    }

    /// Run [`Self::nearest`] for each query. With the `rayon` feature the queries run in
    /// parallel against this tree.
    pub fn nearest_many(&self, queries: &[Point<N>]) -> Vec<Option<Point<N>>> {
        #[cfg(feature = "rayon")]
        {
            queries.par_iter().map(|query| self.nearest(query)).collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            queries.iter().map(|query| self.nearest(query)).collect()
        }
    }

    /// Run [`Self::range`] for each rectangle. With the `rayon` feature the queries run in
    /// parallel against this tree.
    pub fn range_many(&self, rects: &[Rect<N>]) -> Vec<Vec<Point<N>>> {
        #[cfg(feature = "rayon")]
        {
            rects.par_iter().map(|rect| self.range(rect)).collect()
        }

        #[cfg(not(feature = "rayon"))]
        {
            rects.iter().map(|rect| self.range(rect)).collect()
        }
    }
}

/// Branch-and-bound state of a single nearest-neighbor query.
struct NearestSearch<N: CoordFloat> {
    query: Point<N>,
    best: Point<N>,
    best_dist: N,
    visited: usize,
}

impl<N: CoordFloat> NearestSearch<N> {
    fn new(query: Point<N>, seed: Point<N>) -> Self {
        Self {
            query,
            best: seed,
            best_dist: seed.distance_squared_to(&query),
            visited: 0,
        }
    }

    fn run(&mut self, root: &Node<N>) {
        let mut stack: Stack<'_, N> = TinyVec::new();
        stack.push((Some(root), Axis::X));

        while let Some((link, axis)) = stack.pop() {
            let Some(node) = link else {
                continue;
            };

            // The prune test runs when a subtree is popped, so the far side of a split is
            // checked against a bound already tightened by the whole near side.
            if node.region.distance_squared_to(&self.query) > self.best_dist {
                continue;
            }
            self.visited += 1;

            let dist = node.point.distance_squared_to(&self.query);
            if dist < self.best_dist {
                self.best_dist = dist;
                self.best = node.point;
            }

            let (near, far) = if axis.is_below(&self.query, &node.point) {
                (&node.left_bottom, &node.right_top)
            } else {
                (&node.right_top, &node.left_bottom)
            };

            // popped in reverse: near side first
            stack.push((far.as_deref(), axis.next()));
            stack.push((near.as_deref(), axis.next()));
        }
    }
}
