use crate::geometry::Point;

use super::{Assignment, ClusterError};

/// Mean position of each of the `k` clusters, `None` for clusters without members.
///
/// # Errors
/// Returns [`ClusterError::LengthMismatch`] when the assignment does not cover
/// exactly `points`, and [`ClusterError::ClusterOutOfRange`] when it refers to
/// a cluster `>= k`.
#[allow(clippy::cast_precision_loss)]
pub fn cluster_means(
    points: &[Point],
    assignment: &Assignment,
    k: usize,
) -> Result<Vec<Option<Point>>, ClusterError> {
    check_shape(points, assignment, k)?;

    let mut sums = vec![(0.0_f64, 0.0_f64, 0_usize); k];
    for (point, &cluster) in points.iter().zip(assignment.as_slice()) {
        let entry = &mut sums[cluster];
        entry.0 += point.x;
        entry.1 += point.y;
        entry.2 += 1;
    }

    Ok(sums
        .into_iter()
        .map(|(x, y, count)| (count > 0).then(|| Point::new(x / count as f64, y / count as f64)))
        .collect())
}

/// Update step: moves every centroid to the mean of its assigned points.
///
/// `centroids` are the positions the assignment was computed against; their
/// count is `k`. Clusters with no members keep their previous position.
///
/// # Errors
/// Same as [`cluster_means`].
pub fn update(
    points: &[Point],
    assignment: &Assignment,
    centroids: &[Point],
) -> Result<Vec<Point>, ClusterError> {
    let means = cluster_means(points, assignment, centroids.len())?;
    Ok(means
        .into_iter()
        .zip(centroids)
        .map(|(mean, previous)| mean.unwrap_or(*previous))
        .collect())
}

/// Sum of squared distances from each point to its assigned centroid.
///
/// # Errors
/// Same as [`cluster_means`], with `k = centroids.len()`.
pub fn inertia(
    points: &[Point],
    assignment: &Assignment,
    centroids: &[Point],
) -> Result<f64, ClusterError> {
    check_shape(points, assignment, centroids.len())?;
    Ok(points
        .iter()
        .zip(assignment.as_slice())
        .map(|(point, &cluster)| point.distance_sq(&centroids[cluster]))
        .sum())
}

fn check_shape(points: &[Point], assignment: &Assignment, k: usize) -> Result<(), ClusterError> {
    if assignment.len() != points.len() {
        return Err(ClusterError::LengthMismatch {
            points: points.len(),
            assignment: assignment.len(),
        });
    }
    if let Some((point, &cluster)) = assignment
        .as_slice()
        .iter()
        .enumerate()
        .find(|(_, c)| **c >= k)
    {
        return Err(ClusterError::ClusterOutOfRange { point, cluster, k });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::assign;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-9;

    fn points(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    fn assert_close(actual: &[Point], expected: &[Point]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                a.distance_sq(e) < TOLERANCE,
                "expected {e:?}, got {a:?}"
            );
        }
    }

    #[test]
    fn separated_points_leave_centroids_in_place() {
        let pts = points(&[(0.0, 0.0), (10.0, 0.0)]);
        let cents = points(&[(0.0, 0.0), (10.0, 0.0)]);
        let assignment = assign(&pts, &cents).expect("centroids present");
        assert_eq!(assignment.as_slice(), &[0, 1]);

        let moved = update(&pts, &assignment, &cents).expect("shape matches");
        assert_close(&moved, &cents);
    }

    #[test]
    fn centroid_moves_to_member_mean() {
        let pts = points(&[(0.0, 0.0), (2.0, 0.0), (10.0, 0.0)]);
        let cents = points(&[(0.0, 0.0), (10.0, 0.0)]);
        let assignment = assign(&pts, &cents).expect("centroids present");
        assert_eq!(assignment.as_slice(), &[0, 0, 1]);

        let moved = update(&pts, &assignment, &cents).expect("shape matches");
        assert_close(&moved, &points(&[(1.0, 0.0), (10.0, 0.0)]));
    }

    #[test]
    fn empty_cluster_keeps_previous_position() {
        let pts = points(&[(1.0, 1.0), (3.0, 3.0)]);
        let cents = points(&[(0.0, 0.0), (500.0, 500.0)]);
        let assignment = assign(&pts, &cents).expect("centroids present");
        assert_eq!(assignment.sizes(), vec![2, 0]);

        let means = cluster_means(&pts, &assignment, 2).expect("shape matches");
        assert_eq!(means[1], None);

        let moved = update(&pts, &assignment, &cents).expect("shape matches");
        assert_close(&moved, &points(&[(2.0, 2.0), (500.0, 500.0)]));
    }

    #[test]
    fn update_rejects_length_mismatch() {
        let pts = points(&[(1.0, 1.0), (3.0, 3.0)]);
        let assignment = Assignment::from_indices(vec![0], 1).expect("valid");
        let error = update(&pts, &assignment, &points(&[(0.0, 0.0)])).expect_err("mismatch");
        assert_eq!(
            error,
            ClusterError::LengthMismatch {
                points: 2,
                assignment: 1
            }
        );
    }

    #[test]
    fn update_rejects_assignment_built_for_more_clusters() {
        let pts = points(&[(1.0, 1.0), (3.0, 3.0)]);
        let assignment = Assignment::from_indices(vec![0, 2], 3).expect("valid");
        let error = update(&pts, &assignment, &points(&[(0.0, 0.0), (1.0, 0.0)]))
            .expect_err("cluster 2 does not exist");
        assert_eq!(
            error,
            ClusterError::ClusterOutOfRange {
                point: 1,
                cluster: 2,
                k: 2
            }
        );
    }

    #[test]
    fn inertia_sums_squared_distances_to_assigned_centroid() {
        let pts = points(&[(0.0, 0.0), (2.0, 0.0), (10.0, 0.0)]);
        let cents = points(&[(1.0, 0.0), (10.0, 0.0)]);
        let assignment = assign(&pts, &cents).expect("centroids present");
        let value = inertia(&pts, &assignment, &cents).expect("shape matches");
        assert!((value - 2.0).abs() < TOLERANCE);
    }

    fn coordinate() -> impl Strategy<Value = (f64, f64)> {
        (-1000.0..1000.0f64, -1000.0..1000.0f64)
    }

    proptest! {
        #[test]
        fn non_empty_clusters_land_on_member_mean(
            raw_points in proptest::collection::vec(coordinate(), 1..60),
            raw_centroids in proptest::collection::vec(coordinate(), 1..8),
        ) {
            let pts = points(&raw_points);
            let cents = points(&raw_centroids);
            let assignment = assign(&pts, &cents).expect("centroids present");
            let moved = update(&pts, &assignment, &cents).expect("shape matches");
            prop_assert_eq!(moved.len(), cents.len());

            for (cluster, centroid) in moved.iter().enumerate() {
                let members: Vec<&Point> = assignment.members(cluster).map(|i| &pts[i]).collect();
                if members.is_empty() {
                    prop_assert_eq!(*centroid, cents[cluster]);
                    continue;
                }
                #[allow(clippy::cast_precision_loss)]
                let count = members.len() as f64;
                let mean_x = members.iter().map(|p| p.x).sum::<f64>() / count;
                let mean_y = members.iter().map(|p| p.y).sum::<f64>() / count;
                prop_assert!((centroid.x - mean_x).abs() < 1e-6);
                prop_assert!((centroid.y - mean_y).abs() < 1e-6);
            }
        }

        #[test]
        fn a_lloyd_step_never_increases_inertia(
            raw_points in proptest::collection::vec(coordinate(), 1..60),
            raw_centroids in proptest::collection::vec(coordinate(), 1..8),
        ) {
            let pts = points(&raw_points);
            let cents = points(&raw_centroids);
            let assignment = assign(&pts, &cents).expect("centroids present");
            let before = inertia(&pts, &assignment, &cents).expect("shape matches");
            let moved = update(&pts, &assignment, &cents).expect("shape matches");
            let after = inertia(&pts, &assignment, &moved).expect("shape matches");
            prop_assert!(after <= before + 1e-6 * before.max(1.0));
        }
    }
}
