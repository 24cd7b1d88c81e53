use tracing::debug;

use crate::error::{KdTreeError, Result};
use crate::geometry::{Point, Rect};
use crate::kdtree::KdTree;
use crate::r#type::CoordFloat;

/// A builder to create a [`KdTree`] from a sequence of points.
///
/// Points are validated as they are added and inserted in the order they were added when the
/// builder is finished. Duplicates are dropped.
#[derive(Debug, Clone)]
pub struct KdTreeBuilder<N: CoordFloat = f64> {
    domain: Rect<N>,
    points: Vec<Point<N>>,
}

impl<N: CoordFloat> KdTreeBuilder<N> {
    /// Create a new builder over the unit square.
    pub fn new() -> Self {
        Self::new_with_domain(Rect::unit())
    }

    /// Create a new builder over the provided domain.
    pub fn new_with_domain(domain: Rect<N>) -> Self {
        Self {
            domain,
            points: vec![],
        }
    }

    /// Create a new builder over the provided domain, with room for `num_items` points.
    pub fn with_capacity(domain: Rect<N>, num_items: usize) -> Self {
        Self {
            domain,
            points: Vec::with_capacity(num_items),
        }
    }

    /// The domain the tree will cover.
    pub fn domain(&self) -> &Rect<N> {
        &self.domain
    }

    /// Add a point given by its coordinates, returning the number of points added so far.
    pub fn add(&mut self, x: N, y: N) -> Result<usize> {
        self.add_point(Point::try_new(x, y)?)
    }

    /// Add a point, returning the number of points added so far.
    ///
    /// Returns [`KdTreeError::InvalidArgument`] if `point` lies outside the builder's domain.
    pub fn add_point(&mut self, point: Point<N>) -> Result<usize> {
        if !self.domain.contains(&point) {
            return Err(KdTreeError::InvalidArgument(format!(
                "Point ({:?}, {:?}) is outside of the tree domain {:?}.",
                point.x(),
                point.y(),
                self.domain
            )));
        }
        self.points.push(point);
        Ok(self.points.len())
    }

    /// Add every point of `points`, stopping at the first invalid one.
    pub fn extend<I: IntoIterator<Item = Point<N>>>(&mut self, points: I) -> Result<usize> {
        for point in points {
            self.add_point(point)?;
        }
        Ok(self.points.len())
    }

    /// Consume this builder, inserting every added point into a new tree.
    pub fn finish(self) -> Result<KdTree<N>> {
        let mut tree = KdTree::with_domain(self.domain);
        for point in self.points.iter() {
            tree.insert(*point)?;
        }
        debug!(
            added = self.points.len(),
            size = tree.size(),
            "finished building tree"
        );
        Ok(tree)
    }
}

impl<N: CoordFloat> Default for KdTreeBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}
