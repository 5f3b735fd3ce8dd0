use crate::foundation::core::{Point, Rect};

/// Ordered trajectory: insertion order is traversal order.
///
/// The sequence is never sorted or deduplicated. An empty dataset is valid here; the renderer is
/// the one that refuses to animate it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathDataset {
    points: Vec<Point>,
}

impl PathDataset {
    /// Wrap an ordered list of points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Borrow the points in traversal order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Start of the trajectory.
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// End of the trajectory.
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Axis-aligned bounds of every point, or `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.first()?;
        let init = Rect::from_points(first, first);
        Some(self.points[1..].iter().fold(init, |r, &p| r.union_pt(p)))
    }
}

impl From<Vec<Point>> for PathDataset {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for PathDataset {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
