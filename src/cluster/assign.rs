use crate::geometry::Point;

use super::{Assignment, ClusterError};

/// Assignment step: maps every point to its nearest centroid.
///
/// Distances are squared Euclidean; on ties the lowest centroid index wins.
/// An empty point slice yields an empty assignment.
///
/// # Errors
/// Returns [`ClusterError::NoCentroids`] when `centroids` is empty.
pub fn assign(points: &[Point], centroids: &[Point]) -> Result<Assignment, ClusterError> {
    if centroids.is_empty() {
        return Err(ClusterError::NoCentroids);
    }

    let clusters = points
        .iter()
        .map(|point| nearest_index(point, centroids))
        .collect();

    Ok(Assignment::new_unchecked(clusters, centroids.len()))
}

fn nearest_index(point: &Point, centroids: &[Point]) -> usize {
    let mut min_dist_sq = f64::INFINITY;
    let mut best = 0;
    for (index, centroid) in centroids.iter().enumerate() {
        let dist_sq = point.distance_sq(centroid);
        // strict comparison keeps the earliest centroid on ties
        if dist_sq < min_dist_sq {
            min_dist_sq = dist_sq;
            best = index;
        }
    }
    best
}
