//! Agglomerative clustering over a dissimilarity matrix.
//!
//! ## Pieces
//!
//! - [`Linkage`]: the Lance-Williams update rule (seven methods).
//! - [`DissimilarityMatrix`]: symmetric distances, an active mask, and
//!   per-index cardinalities, mutated in place during a run.
//! - [`Agglomerator`]: the reduction loop; N observations, N − 1 merges.
//! - [`MergeRecorder`]: where each [`MergeEvent`] goes. [`MergeHistory`]
//!   and [`Dendrogram`] are the two recorders shipped with the crate.
//!
//! [`MergeHistory`]: crate::hierarchy::MergeHistory
//! [`Dendrogram`]: crate::hierarchy::Dendrogram
//!
//! ## Usage
//!
//! ```rust
//! use agglo::cluster::{Agglomerator, DissimilarityMatrix, Linkage};
//! use agglo::hierarchy::MergeHistory;
//!
//! let matrix = DissimilarityMatrix::new(vec![
//!     vec![0.0, 1.0, 6.0],
//!     vec![1.0, 0.0, 4.0],
//!     vec![6.0, 4.0, 0.0],
//! ])
//! .unwrap();
//!
//! let mut history = MergeHistory::new(matrix.size());
//! Agglomerator::new(matrix, Linkage::Single)
//!     .cluster(&mut history)
//!     .unwrap();
//!
//! assert_eq!(history.assignments()[1], vec![0, 0, 2]);
//! assert_eq!(history.distances(), &[0.0, 1.0, 4.0]);
//! ```

mod batch;
mod hierarchical;
mod linkage;
mod matrix;
mod traits;

pub use batch::cluster_batch;
pub use hierarchical::{Agglomerator, EngineState, HierarchicalClustering};
pub use linkage::{LanceWilliams, Linkage};
pub use matrix::DissimilarityMatrix;
pub use traits::{MergeEvent, MergeRecorder};
