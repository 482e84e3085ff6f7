//! Lloyd k-means steps over 2D points.
//!
//! Each step is a pure function: the caller owns the points, the centroids and
//! the current [`Assignment`], and feeds the output of one step into the next.

mod assign;
mod assignment;
mod update;

use thiserror::Error;

pub use assign::assign;
pub use assignment::Assignment;
pub use update::{cluster_means, inertia, update};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("cannot assign points without at least one centroid")]
    NoCentroids,
    #[error("assignment covers {assignment} points but {points} points were given")]
    LengthMismatch { points: usize, assignment: usize },
    #[error("point {point} is assigned to cluster {cluster}, but only {k} clusters exist")]
    ClusterOutOfRange {
        point: usize,
        cluster: usize,
        k: usize,
    },
}
