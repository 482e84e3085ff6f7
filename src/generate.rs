//! Random point sets for a fresh session.

use rand::Rng;

use crate::geometry::{Bounds, Point};

/// Samples one point uniformly inside the margin of `bounds`.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> Point {
    Point::new(
        rng.random_range(bounds.x_range()),
        rng.random_range(bounds.y_range()),
    )
}

/// Data points for a new run.
pub fn generate_points<R: Rng + ?Sized>(rng: &mut R, n: usize, bounds: &Bounds) -> Vec<Point> {
    (0..n).map(|_| random_point(rng, bounds)).collect()
}

/// Initial centroid positions, sampled the same way as the data points.
pub fn generate_centroids<R: Rng + ?Sized>(rng: &mut R, k: usize, bounds: &Bounds) -> Vec<Point> {
    generate_points(rng, k, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generates_requested_counts() {
        let bounds = Bounds::new(600.0, 400.0, 20.0).expect("valid bounds");
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_points(&mut rng, 40, &bounds).len(), 40);
        assert_eq!(generate_centroids(&mut rng, 3, &bounds).len(), 3);
        assert!(generate_points(&mut rng, 0, &bounds).is_empty());
    }

    #[test]
    fn same_seed_gives_same_points() {
        let bounds = Bounds::new(600.0, 400.0, 20.0).expect("valid bounds");
        let first = generate_points(&mut StdRng::seed_from_u64(42), 10, &bounds);
        let second = generate_points(&mut StdRng::seed_from_u64(42), 10, &bounds);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn points_stay_inside_margin(
            seed in any::<u64>(),
            width in 50.0..2000.0f64,
            height in 50.0..2000.0f64,
            margin in 0.0..20.0f64,
            n in 0usize..100,
        ) {
            let bounds = Bounds::new(width, height, margin).expect("margin leaves room");
            let mut rng = StdRng::seed_from_u64(seed);
            for point in generate_points(&mut rng, n, &bounds) {
                prop_assert!(bounds.contains(&point), "{point:?} outside {bounds:?}");
            }
        }
    }
}
