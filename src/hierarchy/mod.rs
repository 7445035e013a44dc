//! Merge histories produced by agglomerative clustering.
//!
//! Two views of the same merge sequence:
//!
//! - [`MergeHistory`]: one row of labels per step, plus the merge distances.
//!   Labels are original indices, so row `t` reads directly as "which
//!   observations are together after `t` merges".
//! - [`Dendrogram`]: SciPy-style linkage matrix, one entry per merge with
//!   internal node ids, heights, and sizes.
//!
//! ```text
//!         6 (height=1.0)
//!        / \
//!       4   5 (height=0.7)
//!      / \ / \
//!     0  1 2  3 (leaves)
//! ```
//!
//! Either can be cut by height or by cluster count.

mod dendrogram;
mod history;

pub use dendrogram::{Dendrogram, Merge};
pub use history::MergeHistory;
