use crate::geometry::Point;
use crate::r#type::CoordFloat;

/// The coordinate a tree node splits its region on.
///
/// Nodes at even depth (the root is depth 0) split vertically on `x`, nodes at odd depth split
/// horizontally on `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Vertical split line, comparing `x` coordinates.
    #[default]
    X,
    /// Horizontal split line, comparing `y` coordinates.
    Y,
}

impl Axis {
    /// The splitting axis used by nodes at the given depth.
    #[inline]
    pub fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Self::X
        } else {
            Self::Y
        }
    }

    /// The axis used one level further down the tree.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// The coordinate of `point` on this axis.
    #[inline]
    pub fn of<N: CoordFloat>(self, point: &Point<N>) -> N {
        match self {
            Self::X => point.x(),
            Self::Y => point.y(),
        }
    }

    /// Returns `true` if `query` belongs on the left/bottom side of a split at `pivot`.
    ///
    /// Ties go right/top: a coordinate equal to the pivot's routes to the right/top child.
    #[inline]
    pub(crate) fn is_below<N: CoordFloat>(self, query: &Point<N>, pivot: &Point<N>) -> bool {
        self.of(query) < self.of(pivot)
    }
}
