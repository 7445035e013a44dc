//! # agglo
//!
//! Agglomerative hierarchical clustering over a caller-supplied dissimilarity
//! matrix, with Lance-Williams linkage updates and a full, auditable merge
//! history.
//!
//! The engine never computes distances and never decides how many clusters
//! to keep: it always reduces N observations to one cluster and records every
//! step. Cut the resulting history wherever you like.
//!
//! ```rust
//! use agglo::{HierarchicalClustering, Linkage};
//!
//! let rows = vec![
//!     vec![0.0, 8.408169, 7.185479, 6.622472, 9.008004],
//!     vec![8.408169, 0.0, 14.097252, 11.136869, 12.764842],
//!     vec![7.185479, 14.097252, 0.0, 8.643471, 11.994746],
//!     vec![6.622472, 11.136869, 8.643471, 0.0, 10.388818],
//!     vec![9.008004, 12.764842, 11.994746, 10.388818, 0.0],
//! ];
//!
//! let history = HierarchicalClustering::new(Linkage::Complete).fit(rows).unwrap();
//! assert_eq!(history.assignments()[2], vec![0, 1, 0, 0, 4]);
//! assert_eq!(history.cut_to_k(2).unwrap(), vec![0, 1, 0, 0, 0]);
//! ```
//!
//! Optional features:
//!
//! - `parallel`: [`cluster_batch`] runs independent clusterings on the rayon pool.
//! - `serde`: serialization for [`Linkage`], [`MergeEvent`], [`MergeHistory`], and [`Dendrogram`].

pub mod cluster;
/// Error types used across `agglo`.
pub mod error;
pub mod hierarchy;


pub use cluster::{
    cluster_batch, Agglomerator, DissimilarityMatrix, EngineState, HierarchicalClustering,
    LanceWilliams, Linkage, MergeEvent, MergeRecorder,
};
pub use error::{Error, Result};
pub use hierarchy::{Dendrogram, Merge, MergeHistory};
