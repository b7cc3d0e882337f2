use crate::math::{distance, Point3};

/// A polyline: straight segments between ordered vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Ordered vertices.
    pub points: Vec<Point3>,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

impl Polyline {
    /// Creates a polyline from vertices.
    #[must_use]
    pub fn from_points(points: Vec<Point3>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Total length of the vertex chain, including the wrap-around segment
    /// for closed polylines.
    #[must_use]
    pub fn length(&self) -> f64 {
        let n = self.points.len();
        (0..self.segment_count())
            .map(|i| distance(&self.points[i], &self.points[(i + 1) % n]))
            .sum()
    }

    /// Returns a new polyline with vertices in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let points = self.points.iter().rev().copied().collect();
        Self {
            points,
            closed: self.closed,
        }
    }
}
