use serde::Serialize;

use super::ClusterError;

/// Mapping from point index to centroid index.
///
/// Every stored index is below `k`; the only ways to build one are
/// [`super::assign`] and [`Assignment::from_indices`], both of which check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    clusters: Vec<usize>,
    k: usize,
}

impl Assignment {
    /// Wraps raw cluster indices, rejecting any index outside `0..k`.
    ///
    /// # Errors
    /// Returns [`ClusterError::ClusterOutOfRange`] for the first offending point.
    pub fn from_indices(clusters: Vec<usize>, k: usize) -> Result<Self, ClusterError> {
        if let Some((point, &cluster)) = clusters.iter().enumerate().find(|(_, c)| **c >= k) {
            return Err(ClusterError::ClusterOutOfRange { point, cluster, k });
        }
        Ok(Self { clusters, k })
    }

    pub(super) fn new_unchecked(clusters: Vec<usize>, k: usize) -> Self {
        debug_assert!(clusters.iter().all(|&c| c < k));
        Self { clusters, k }
    }

    /// Number of clusters the indices refer to.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.clusters
    }

    /// Member count per cluster, indexed by cluster.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k];
        for &cluster in &self.clusters {
            sizes[cluster] += 1;
        }
        sizes
    }

    /// Point indices belonging to `cluster`, in point order.
    pub fn members(&self, cluster: usize) -> impl Iterator<Item = usize> + '_ {
        self.clusters
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cluster)
            .map(|(point, _)| point)
    }
}
