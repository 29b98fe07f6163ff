//! # Polygon outline
//!
//! The vertices of a convex polygon, sorted by angle around their centroid, trace its boundary.
use itertools::Itertools;

use crate::algorithm::geometry::Point2D;

/// Sort the vertices of a convex polygon counter-clockwise, starting from the one with the smallest
/// angle in `(-pi, pi]` as seen from the centroid.
pub fn counter_clockwise(points: impl IntoIterator<Item = Point2D>) -> Vec<Point2D> {
    let points = points.into_iter().collect::<Vec<_>>();
    if points.is_empty() {
        return points;
    }

    let count = points.len() as f64;
    let centroid = Point2D::new(
        points.iter().map(|point| point.x).sum::<f64>() / count,
        points.iter().map(|point| point.y).sum::<f64>() / count,
    );
    let angle = |point: &Point2D| (point.y - centroid.y).atan2(point.x - centroid.x);

    points.into_iter()
        .sorted_by(|left, right| angle(left).total_cmp(&angle(right)))
        .collect()
}
