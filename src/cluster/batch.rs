//! Independent clustering runs over many matrices.
//!
//! Each run owns its matrix and its history; only the [`Linkage`] is shared.
//! With the `parallel` feature the runs are spread over the rayon pool.

use super::hierarchical::HierarchicalClustering;
use super::linkage::Linkage;
use super::matrix::DissimilarityMatrix;
use crate::error::Result;
use crate::hierarchy::MergeHistory;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cluster every matrix with the same linkage; results keep input order.
pub fn cluster_batch(
    matrices: Vec<DissimilarityMatrix>,
    linkage: Linkage,
) -> Vec<Result<MergeHistory>> {
    let hc = HierarchicalClustering::new(linkage);
    tracing::debug!(runs = matrices.len(), %linkage, "batch clustering");

    #[cfg(feature = "parallel")]
    let results = matrices
        .into_par_iter()
        .map(|m| hc.fit_matrix(m))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results = matrices.into_iter().map(|m| hc.fit_matrix(m)).collect();

    results
}
