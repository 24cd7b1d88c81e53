use std::cmp::Ordering;
use std::fmt;

use geo_traits::CoordTrait;

use crate::error::{KdTreeError, Result};
use crate::r#type::CoordFloat;

/// A point in the plane with finite coordinates.
///
/// Equality is exact coordinate equality. Points are ordered lexicographically by `(x, y)`, so
/// they can be stored in ordered collections. Negative zero is normalized to positive zero on
/// construction so that equality and ordering agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<N: CoordFloat = f64> {
    x: N,
    y: N,
}

impl<N: CoordFloat> Point<N> {
    /// Create a new point, rejecting `NaN` and infinite coordinates.
    pub fn try_new(x: N, y: N) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(KdTreeError::InvalidArgument(format!(
                "Point coordinates must be finite, got ({:?}, {:?}).",
                x, y
            )));
        }

        // -0.0 + 0.0 == +0.0
        Ok(Self {
            x: x + N::zero(),
            y: y + N::zero(),
        })
    }

    /// Build a point from coordinates already known to be finite, such as another point's or a
    /// rectangle's.
    #[inline]
    pub(crate) fn new_unchecked(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// Validate a coordinate from any [`CoordTrait`] implementation.
    pub fn try_from_coord(coord: &impl CoordTrait<T = N>) -> Result<Self> {
        Self::try_new(coord.x(), coord.y())
    }

    /// The `x` coordinate.
    #[inline]
    pub fn x(&self) -> N {
        self.x
    }

    /// The `y` coordinate.
    #[inline]
    pub fn y(&self) -> N {
        self.y
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared_to(&self, other: &Self) -> N {
        sq_dist(self.x, self.y, other.x, other.y)
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Self) -> N {
        self.distance_squared_to(other).sqrt()
    }
}

impl<N: CoordFloat> Eq for Point<N> {}

impl<N: CoordFloat> PartialOrd for Point<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: CoordFloat> Ord for Point<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Coordinates are finite, so partial_cmp never returns None
        cmp_finite(self.x, other.x).then_with(|| cmp_finite(self.y, other.y))
    }
}

impl<N: CoordFloat + fmt::Display> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<N: CoordFloat> CoordTrait for Point<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
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

#[inline]
fn cmp_finite<N: CoordFloat>(a: N, b: N) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[inline]
pub(crate) fn sq_dist<N: CoordFloat>(ax: N, ay: N, bx: N, by: N) -> N {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn rejects_non_finite() {
        assert!(Point::try_new(f64::NAN, 0.).is_err());
        assert!(Point::try_new(0., f64::INFINITY).is_err());
        assert!(Point::try_new(f64::NEG_INFINITY, 0.).is_err());
        assert!(Point::try_new(f32::NAN, 1.).is_err());
        assert!(Point::try_new(0.25, 0.75).is_ok());
    }

    #[test]
    fn exact_equality() {
        let a = Point::try_new(0.1 + 0.2, 0.5).unwrap();
        let b = Point::try_new(0.3, 0.5).unwrap();
        assert_ne!(a, b, "equality is exact, not approximate");
        assert_eq!(a, Point::try_new(0.1 + 0.2, 0.5).unwrap());
    }

    #[test]
    fn negative_zero_is_normalized() {
        let a = Point::try_new(-0.0, 0.0).unwrap();
        let b = Point::try_new(0.0, -0.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn lexicographic_order() {
        let points: BTreeSet<Point> = [(0.5, 0.1), (0.1, 0.9), (0.5, 0.0), (0.1, 0.2)]
            .into_iter()
            .map(|(x, y)| Point::try_new(x, y).unwrap())
            .collect();
        let ordered: Vec<(f64, f64)> = points.iter().map(|p| (p.x(), p.y())).collect();
        assert_eq!(ordered, vec![(0.1, 0.2), (0.1, 0.9), (0.5, 0.0), (0.5, 0.1)]);
    }

    #[test]
    fn distances() {
        let a = Point::try_new(0., 0.).unwrap();
        let b = Point::try_new(3., 4.).unwrap();
        assert_eq!(a.distance_squared_to(&b), 25.);
        assert_eq!(a.distance_to(&b), 5.);
    }
}
