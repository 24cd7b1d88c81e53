use std::collections::BTreeSet;

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::r#trait::PointIndex;
use crate::r#type::CoordFloat;

/// Exhaustive-scan reference set used to cross-check tree queries.
#[derive(Debug, Clone, Default)]
pub(crate) struct PointSet<N: CoordFloat = f64> {
    points: BTreeSet<Point<N>>,
}

impl<N: CoordFloat> PointSet<N> {
    pub(crate) fn new() -> Self {
        Self {
            points: BTreeSet::new(),
        }
    }
}

impl<N: CoordFloat> PointIndex<N> for PointSet<N> {
    fn insert(&mut self, point: Point<N>) -> Result<bool> {
        Ok(self.points.insert(point))
    }

    fn contains(&self, point: &Point<N>) -> bool {
        self.points.contains(point)
    }

    fn range(&self, rect: &Rect<N>) -> Vec<Point<N>> {
        self.points
            .iter()
            .filter(|p| rect.distance_squared_to(p) == N::zero())
            .copied()
            .collect()
    }

    fn nearest(&self, query: &Point<N>) -> Option<Point<N>> {
        let mut nearest = None;
        let mut best_dist = N::infinity();
        for p in self.points.iter() {
            let dist = query.distance_squared_to(p);
            if dist < best_dist {
                best_dist = dist;
                nearest = Some(*p);
            }
        }
        nearest
    }

    fn size(&self) -> usize {
        self.points.len()
    }
}
