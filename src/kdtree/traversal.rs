//! Utilities to traverse the tree structure.

use geo_traits::{
    Dimensions, GeometryTrait, GeometryType, RectTrait, UnimplementedGeometryCollection,
    UnimplementedLine, UnimplementedLineString, UnimplementedMultiLineString,
    UnimplementedMultiPoint, UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon,
    UnimplementedTriangle,
};
use tinyvec::TinyVec;

use crate::geometry::{Axis, Corner, Point, Rect};
use crate::kdtree::index::{KdTree, Node};
use crate::r#type::CoordFloat;

/// A borrowed node of a [`KdTree`], for manual traversal.
///
/// The node's [`RectTrait`] implementation describes its region.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a, N: CoordFloat> {
    node: &'a Node<N>,
    axis: Axis,
}

impl<'a, N: CoordFloat> NodeRef<'a, N> {
    /// The point stored at this node.
    pub fn point(&self) -> Point<N> {
        self.node.point
    }

    /// The region this node's point subdivides.
    pub fn region(&self) -> Rect<N> {
        self.node.region
    }

    /// The axis this node splits its region on.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The child holding points strictly below this node's coordinate on [`Self::axis`].
    pub fn left_bottom(&self) -> Option<NodeRef<'a, N>> {
        self.node.left_bottom.as_deref().map(|node| NodeRef {
            node,
            axis: self.axis.next(),
        })
    }

    /// The child holding points at or above this node's coordinate on [`Self::axis`].
    pub fn right_top(&self) -> Option<NodeRef<'a, N>> {
        self.node.right_top.as_deref().map(|node| NodeRef {
            node,
            axis: self.axis.next(),
        })
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node.left_bottom.is_none() && self.node.right_top.is_none()
    }

    /// The splitting line of this node, clipped to its region.
    pub fn split(&self) -> Split<N> {
        Split {
            point: self.node.point,
            region: self.node.region,
            axis: self.axis,
        }
    }
}

impl<'a, N: CoordFloat> GeometryTrait for NodeRef<'a, N> {
    type T = N;
    type PointType<'b>
        = UnimplementedPoint<N>
    where
        Self: 'b;
    type LineStringType<'b>
        = UnimplementedLineString<N>
    where
        Self: 'b;
    type PolygonType<'b>
        = UnimplementedPolygon<N>
    where
        Self: 'b;
    type MultiPointType<'b>
        = UnimplementedMultiPoint<N>
    where
        Self: 'b;
    type MultiLineStringType<'b>
        = UnimplementedMultiLineString<N>
    where
        Self: 'b;
    type MultiPolygonType<'b>
        = UnimplementedMultiPolygon<N>
    where
        Self: 'b;
    type GeometryCollectionType<'b>
        = UnimplementedGeometryCollection<N>
    where
        Self: 'b;
    type RectType<'b>
        = NodeRef<'a, N>
    where
        Self: 'b;
    type TriangleType<'b>
        = UnimplementedTriangle<N>
    where
        Self: 'b;
    type LineType<'b>
        = UnimplementedLine<N>
    where
        Self: 'b;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn as_type(
        &self,
    ) -> GeometryType<
        '_,
        Self::PointType<'_>,
        Self::LineStringType<'_>,
        Self::PolygonType<'_>,
        Self::MultiPointType<'_>,
        Self::MultiLineStringType<'_>,
        Self::MultiPolygonType<'_>,
        Self::GeometryCollectionType<'_>,
        Self::RectType<'_>,
        Self::TriangleType<'_>,
        Self::LineType<'_>,
    > {
        GeometryType::Rect(self)
    }
}

impl<N: CoordFloat> RectTrait for NodeRef<'_, N> {
    type CoordType<'a>
        = Corner<N>
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        self.node.region.min()
    }

    fn max(&self) -> Self::CoordType<'_> {
        self.node.region.max()
    }
}

/// One node as seen by a renderer: its point, its region and the axis it splits on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split<N: CoordFloat = f64> {
    pub point: Point<N>,
    pub region: Rect<N>,
    pub axis: Axis,
}

impl<N: CoordFloat> Split<N> {
    /// The endpoints of the splitting line segment.
    ///
    /// An `x` split is the vertical segment through the point spanning the region's height, a
    /// `y` split the horizontal segment spanning its width.
    pub fn line(&self) -> (Point<N>, Point<N>) {
        match self.axis {
            Axis::X => (
                Point::new_unchecked(self.point.x(), self.region.min_y()),
                Point::new_unchecked(self.point.x(), self.region.max_y()),
            ),
            Axis::Y => (
                Point::new_unchecked(self.region.min_x(), self.point.y()),
                Point::new_unchecked(self.region.max_x(), self.point.y()),
            ),
        }
    }
}

/// Pre-order iterator over the nodes of a [`KdTree`], created by [`KdTree::splits`].
///
/// Each node is yielded before its left/bottom subtree, which comes before its right/top
/// subtree.
#[derive(Debug)]
pub struct Splits<'a, N: CoordFloat> {
    stack: TinyVec<[Option<NodeRef<'a, N>>; 32]>,
}

impl<'a, N: CoordFloat> Iterator for Splits<'a, N> {
    type Item = Split<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()??;
        if let Some(child) = node.right_top() {
            self.stack.push(Some(child));
        }
        if let Some(child) = node.left_bottom() {
            self.stack.push(Some(child));
        }
        Some(node.split())
    }
}

/// Pre-order iterator over the points of a [`KdTree`], created by [`KdTree::iter`].
#[derive(Debug)]
pub struct Iter<'a, N: CoordFloat> {
    splits: Splits<'a, N>,
}

impl<'a, N: CoordFloat> Iterator for Iter<'a, N> {
    type Item = Point<N>;

    fn next(&mut self) -> Option<Self::Item> {
        self.splits.next().map(|split| split.point)
    }
}

impl<N: CoordFloat> KdTree<N> {
    /// Access the root node for manual traversal, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, N>> {
        self.root.as_deref().map(|node| NodeRef {
            node,
            axis: Axis::X,
        })
    }

    /// Iterate over every node's point, region and splitting axis, in pre-order.
    ///
    /// This is everything needed to draw the subdivision; nothing is rendered here.
    pub fn splits(&self) -> Splits<'_, N> {
        let mut stack = TinyVec::new();
        if let Some(root) = self.root() {
            stack.push(Some(root));
        }
        Splits { stack }
    }

    /// Iterate over the stored points in pre-order.
    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            splits: self.splits(),
        }
    }
}

impl<'a, N: CoordFloat> IntoIterator for &'a KdTree<N> {
    type Item = Point<N>;
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
