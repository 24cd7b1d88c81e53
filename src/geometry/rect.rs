use std::fmt;

use geo_traits::{
    CoordTrait, Dimensions, GeometryTrait, GeometryType, RectTrait, UnimplementedGeometryCollection,
    UnimplementedLine, UnimplementedLineString, UnimplementedMultiLineString,
    UnimplementedMultiPoint, UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon,
    UnimplementedTriangle,
};

use crate::error::{KdTreeError, Result};
use crate::geometry::{Axis, Point};
use crate::r#type::CoordFloat;

/// A closed axis-aligned rectangle `[min_x, max_x] × [min_y, max_y]`.
///
/// Bounds are finite and never inverted. Degenerate rectangles (zero width or height) are
/// allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<N: CoordFloat = f64> {
    min_x: N,
    min_y: N,
    max_x: N,
    max_y: N,
}

impl<N: CoordFloat> Rect<N> {
    /// Create a new rectangle, rejecting non-finite or inverted bounds.
    pub fn try_new(min_x: N, min_y: N, max_x: N, max_y: N) -> Result<Self> {
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return Err(KdTreeError::InvalidArgument(format!(
                "Rectangle bounds must be finite, got [{:?}, {:?}] x [{:?}, {:?}].",
                min_x, max_x, min_y, max_y
            )));
        }
        if min_x > max_x || min_y > max_y {
            return Err(KdTreeError::InvalidArgument(format!(
                "Rectangle bounds are inverted: [{:?}, {:?}] x [{:?}, {:?}].",
                min_x, max_x, min_y, max_y
            )));
        }

        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// The unit square `[0, 1] × [0, 1]`, the default domain of a tree.
    pub fn unit() -> Self {
        Self {
            min_x: N::zero(),
            min_y: N::zero(),
            max_x: N::one(),
            max_y: N::one(),
        }
    }

    /// Validate a rectangle from any [`RectTrait`] implementation.
    pub fn try_from_rect(rect: &impl RectTrait<T = N>) -> Result<Self> {
        let min = rect.min();
        let max = rect.max();
        Self::try_new(min.x(), min.y(), max.x(), max.y())
    }

    /// Get the minimum `x` value of this rectangle.
    #[inline]
    pub fn min_x(&self) -> N {
        self.min_x
    }

    /// Get the minimum `y` value of this rectangle.
    #[inline]
    pub fn min_y(&self) -> N {
        self.min_y
    }

    /// Get the maximum `x` value of this rectangle.
    #[inline]
    pub fn max_x(&self) -> N {
        self.max_x
    }

    /// Get the maximum `y` value of this rectangle.
    #[inline]
    pub fn max_y(&self) -> N {
        self.max_y
    }

    /// The extent of this rectangle along `x`.
    pub fn width(&self) -> N {
        self.max_x - self.min_x
    }

    /// The extent of this rectangle along `y`.
    pub fn height(&self) -> N {
        self.max_y - self.min_y
    }

    /// Returns `true` if `point` lies inside this rectangle or on its boundary.
    #[inline]
    pub fn contains(&self, point: &Point<N>) -> bool {
        let (x, y) = (point.x(), point.y());
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Returns `true` if the two closed rectangles overlap. Touching edges count.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        // check if other bbox is entirely to one side of this one
        !(other.max_x < self.min_x
            || other.max_y < self.min_y
            || other.min_x > self.max_x
            || other.min_y > self.max_y)
    }

    /// Squared Euclidean distance from `point` to the closest point of this rectangle.
    ///
    /// This is exactly zero when `point` is inside or on the boundary.
    #[inline]
    pub fn distance_squared_to(&self, point: &Point<N>) -> N {
        let dx = axis_dist(point.x(), self.min_x, self.max_x);
        let dy = axis_dist(point.y(), self.min_y, self.max_y);
        dx * dx + dy * dy
    }

    /// Euclidean distance from `point` to the closest point of this rectangle.
    pub fn distance_to(&self, point: &Point<N>) -> N {
        self.distance_squared_to(point).sqrt()
    }

    /// The part of this rectangle on the left/bottom of a split through `pivot` on `axis`.
    pub(crate) fn below(&self, axis: Axis, pivot: &Point<N>) -> Self {
        let mut rect = *self;
        match axis {
            Axis::X => rect.max_x = pivot.x(),
            Axis::Y => rect.max_y = pivot.y(),
        }
        rect
    }

    /// The part of this rectangle on the right/top of a split through `pivot` on `axis`.
    pub(crate) fn above(&self, axis: Axis, pivot: &Point<N>) -> Self {
        let mut rect = *self;
        match axis {
            Axis::X => rect.min_x = pivot.x(),
            Axis::Y => rect.min_y = pivot.y(),
        }
        rect
    }
}

impl<N: CoordFloat + fmt::Display> fmt::Display for Rect<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

/// 1D distance from a value to a range.
#[inline]
pub(crate) fn axis_dist<N: CoordFloat>(k: N, min: N, max: N) -> N {
    if k < min {
        min - k
    } else if k <= max {
        N::zero()
    } else {
        k - max
    }
}

/// Used in the implementation of RectTrait for Rect.
#[derive(Debug, Clone, Copy)]
pub struct Corner<N: CoordFloat> {
    x: N,
    y: N,
}

impl<N: CoordFloat> CoordTrait for Corner<N> {
    type T = N;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

impl<N: CoordFloat> GeometryTrait for Rect<N> {
    type T = N;
    type PointType<'a>
        = UnimplementedPoint<N>
    where
        Self: 'a;
    type LineStringType<'a>
        = UnimplementedLineString<N>
    where
        Self: 'a;
    type PolygonType<'a>
        = UnimplementedPolygon<N>
    where
        Self: 'a;
    type MultiPointType<'a>
        = UnimplementedMultiPoint<N>
    where
        Self: 'a;
    type MultiLineStringType<'a>
        = UnimplementedMultiLineString<N>
    where
        Self: 'a;
    type MultiPolygonType<'a>
        = UnimplementedMultiPolygon<N>
    where
        Self: 'a;
    type GeometryCollectionType<'a>
        = UnimplementedGeometryCollection<N>
    where
        Self: 'a;
    type RectType<'a>
        = Self
    where
        Self: 'a;
    type TriangleType<'a>
        = UnimplementedTriangle<N>
    where
        Self: 'a;
    type LineType<'a>
        = UnimplementedLine<N>
    where
        Self: 'a;

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

impl<N: CoordFloat> RectTrait for Rect<N> {
    type CoordType<'a>
        = Corner<N>
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        Corner {
            x: self.min_x,
            y: self.min_y,
        }
    }

    fn max(&self) -> Self::CoordType<'_> {
        Corner {
            x: self.max_x,
            y: self.max_y,
        }
    }
}
