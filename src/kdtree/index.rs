use std::fmt;

use geo_traits::CoordTrait;
use tracing::{debug, trace};

use crate::error::{KdTreeError, Result};
use crate::geometry::{Axis, Point, Rect};
use crate::r#type::CoordFloat;

/// A node of the tree, holding one stored point.
pub(crate) struct Node<N: CoordFloat> {
    pub(crate) point: Point<N>,

    /// The region this node's point subdivides. Set once when the node is created, from the
    /// parent's region clipped at the parent's point.
    pub(crate) region: Rect<N>,

    /// Points whose coordinate on the splitting axis is strictly less than `point`'s.
    pub(crate) left_bottom: Option<Box<Node<N>>>,

    /// Points whose coordinate on the splitting axis is greater than or equal to `point`'s.
    pub(crate) right_top: Option<Box<Node<N>>>,
}

impl<N: CoordFloat> Node<N> {
    pub(crate) fn new(point: Point<N>, region: Rect<N>) -> Self {
        Self {
            point,
            region,
            left_bottom: None,
            right_top: None,
        }
    }
}

/// A 2-d tree storing a set of unique points within a fixed rectangular domain.
///
/// The tree is not balanced: its shape depends on insertion order. Every node splits its region
/// in two at its point, vertically at even depths and horizontally at odd depths.
///
/// Queries take `&self` and keep all of their search state on the stack, so any number of
/// readers may share one tree across threads. Insertion takes `&mut self`.
///
/// ```
/// use planar_kdtree::{KdTree, Point, Rect};
///
/// let mut tree = KdTree::new();
/// tree.insert(Point::try_new(0.5, 0.5)?)?;
/// tree.insert(Point::try_new(0.25, 0.5)?)?;
/// tree.insert(Point::try_new(0.75, 0.5)?)?;
///
/// let found = tree.range(&Rect::try_new(0.6, 0.4, 0.78, 0.6)?);
/// assert_eq!(found, vec![Point::try_new(0.75, 0.5)?]);
///
/// let nearest = tree.nearest(&Point::try_new(0.3, 0.4)?);
/// assert_eq!(nearest, Some(Point::try_new(0.25, 0.5)?));
/// # Ok::<(), planar_kdtree::KdTreeError>(())
/// ```
pub struct KdTree<N: CoordFloat = f64> {
    pub(crate) root: Option<Box<Node<N>>>,
    pub(crate) domain: Rect<N>,
    pub(crate) size: usize,
}

impl<N: CoordFloat> KdTree<N> {
    /// Create an empty tree over the unit square `[0, 1] × [0, 1]`.
    pub fn new() -> Self {
        Self::with_domain(Rect::unit())
    }

    /// Create an empty tree over the given domain.
    pub fn with_domain(domain: Rect<N>) -> Self {
        Self {
            root: None,
            domain,
            size: 0,
        }
    }

    /// The region covered by the root node. All stored points lie inside it.
    pub fn domain(&self) -> &Rect<N> {
        &self.domain
    }

    /// The number of distinct points stored in this tree.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if no point has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Add `point` to the tree if it is not already present.
    ///
    /// Returns `Ok(true)` when the point was added and `Ok(false)` when an equal point was
    /// already stored, in which case the tree is left untouched.
    ///
    /// Returns [`KdTreeError::InvalidArgument`] if `point` lies outside [`Self::domain`].
    pub fn insert(&mut self, point: Point<N>) -> Result<bool> {
        self.check_in_domain(&point)?;

        let mut link = &mut self.root;
        let mut region = self.domain;
        let mut axis = Axis::X;
        let mut depth = 0;

        while let Some(node) = link {
            if node.point == point {
                trace!(?point, depth, "point already stored, skipping insert");
                return Ok(false);
            }

            let below = axis.is_below(&point, &node.point);
            let child = if below {
                &mut node.left_bottom
            } else {
                &mut node.right_top
            };
            if child.is_none() {
                region = if below {
                    node.region.below(axis, &node.point)
                } else {
                    node.region.above(axis, &node.point)
                };
            }

            link = child;
            axis = axis.next();
            depth += 1;
        }

        *link = Some(Box::new(Node::new(point, region)));
        self.size += 1;
        trace!(?point, ?region, depth, "inserted point");
        Ok(true)
    }

    /// Validate and insert a point given by its coordinates.
    pub fn insert_xy(&mut self, x: N, y: N) -> Result<bool> {
        self.insert(Point::try_new(x, y)?)
    }

    /// Returns `true` if a point equal to `point` is stored in this tree.
    pub fn contains(&self, point: &Point<N>) -> bool {
        let mut link = &self.root;
        let mut axis = Axis::X;

        while let Some(node) = link {
            if node.point == *point {
                return true;
            }

            link = if axis.is_below(point, &node.point) {
                &node.left_bottom
            } else {
                &node.right_top
            };
            axis = axis.next();
        }

        false
    }

    /// Validate a coordinate from any [`CoordTrait`] implementation and look it up.
    pub fn contains_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<bool> {
        Ok(self.contains(&Point::try_from_coord(coord)?))
    }

    /// Validate and look up a point given by its coordinates.
    pub fn contains_xy(&self, x: N, y: N) -> Result<bool> {
        Ok(self.contains(&Point::try_new(x, y)?))
    }

    fn check_in_domain(&self, point: &Point<N>) -> Result<()> {
        if self.domain.contains(point) {
            Ok(())
        } else {
            debug!(?point, domain = ?self.domain, "rejected point outside of the tree domain");
            Err(KdTreeError::InvalidArgument(format!(
                "Point ({:?}, {:?}) is outside of the tree domain {:?}.",
                point.x(),
                point.y(),
                self.domain
            )))
        }
    }
}

impl<N: CoordFloat> Default for KdTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

// The tree is not balanced, so sorted input degenerates into a chain as deep as the tree is
// large. Drop, Clone and PartialEq all walk it with a heap-allocated stack instead of the
// recursion the derived impls would use.

impl<N: CoordFloat> Drop for KdTree<N> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<N>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left_bottom.take());
            stack.extend(node.right_top.take());
        }
    }
}

/// One step of the post-order copy done by [`KdTree::clone`].
enum CloneStep<'a, N: CoordFloat> {
    Visit(Option<&'a Node<N>>),
    Assemble(&'a Node<N>),
}

impl<N: CoordFloat> Clone for KdTree<N> {
    fn clone(&self) -> Self {
        let mut steps = vec![CloneStep::Visit(self.root.as_deref())];
        // finished subtrees, each node's left/bottom child below its right/top one
        let mut built: Vec<Option<Box<Node<N>>>> = vec![];

        while let Some(step) = steps.pop() {
            match step {
                CloneStep::Visit(None) => built.push(None),
                CloneStep::Visit(Some(node)) => {
                    steps.push(CloneStep::Assemble(node));
                    steps.push(CloneStep::Visit(node.right_top.as_deref()));
                    steps.push(CloneStep::Visit(node.left_bottom.as_deref()));
                }
                CloneStep::Assemble(node) => {
                    let right_top = built.pop().flatten();
                    let left_bottom = built.pop().flatten();
                    built.push(Some(Box::new(Node {
                        point: node.point,
                        region: node.region,
                        left_bottom,
                        right_top,
                    })));
                }
            }
        }

        Self {
            root: built.pop().flatten(),
            domain: self.domain,
            size: self.size,
        }
    }
}

impl<N: CoordFloat> PartialEq for KdTree<N> {
    /// Two trees are equal when they have the same domain and the same shape, with equal points
    /// and regions at every node.
    fn eq(&self, other: &Self) -> bool {
        if self.domain != other.domain || self.size != other.size {
            return false;
        }

        let mut stack = vec![(self.root.as_deref(), other.root.as_deref())];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.point != b.point || a.region != b.region {
                        return false;
                    }
                    stack.push((a.left_bottom.as_deref(), b.left_bottom.as_deref()));
                    stack.push((a.right_top.as_deref(), b.right_top.as_deref()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<N: CoordFloat> fmt::Debug for KdTree<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("domain", &self.domain)
            .field("size", &self.size)
            .field("root", &self.root)
            .finish()
    }
}

impl<N: CoordFloat> fmt::Debug for Node<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("point", &self.point)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
