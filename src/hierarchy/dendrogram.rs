//! SciPy-style dendrogram (linkage matrix).
//!
//! Leaves are numbered `0..n`; merge `t` creates cluster `n + t`. Each merge
//! records the two cluster ids it joined, the height, and the resulting size,
//! which is the layout of SciPy's `Z` matrix and kodama's `Step`.

use super::history::relabel;
use crate::cluster::{MergeEvent, MergeRecorder};
use crate::error::{Error, Result};

/// A dendrogram representing hierarchical cluster merges.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dendrogram {
    merges: Vec<Merge>,
    n_items: usize,
    /// Current cluster id held by each surviving matrix index.
    cluster_id: Vec<usize>,
    /// Current cluster size held by each surviving matrix index.
    sizes: Vec<usize>,
}

/// A single merge operation in the dendrogram.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Merge {
    /// Smaller of the two merged cluster ids.
    pub cluster_a: usize,
    /// Larger of the two merged cluster ids.
    pub cluster_b: usize,
    /// Distance/dissimilarity at which merge occurred.
    pub distance: f64,
    /// Size of resulting cluster.
    pub size: usize,
}

impl Dendrogram {
    /// Create an empty dendrogram for n items.
    pub fn new(n_items: usize) -> Self {
        Self {
            merges: Vec::with_capacity(n_items.saturating_sub(1)),
            n_items,
            cluster_id: (0..n_items).collect(),
            sizes: vec![1; n_items],
        }
    }

    /// Cluster assignments after applying the leading merges whose distance is
    /// at most `threshold`, numbered `0..k` by first appearance.
    pub fn cut_at_distance(&self, threshold: f64) -> Vec<usize> {
        let steps = self
            .merges
            .iter()
            .take_while(|m| m.distance <= threshold)
            .count();
        self.labels_after(steps)
    }

    /// Cluster assignments for k clusters.
    pub fn cut_to_k(&self, k: usize) -> Result<Vec<usize>> {
        if k == 0 || k > self.n_items {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be between 1 and the number of observations",
            });
        }
        let steps = self.n_items - k;
        if steps > self.merges.len() {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "dendrogram does not contain enough merges",
            });
        }
        Ok(self.labels_after(steps))
    }

    fn labels_after(&self, steps: usize) -> Vec<usize> {
        // Union-find over leaf and internal node ids; merge t points both
        // children at node n + t.
        let mut parent: Vec<usize> = (0..self.n_items + steps).collect();
        for (t, merge) in self.merges.iter().take(steps).enumerate() {
            let node = self.n_items + t;
            parent[merge.cluster_a] = node;
            parent[merge.cluster_b] = node;
        }

        let roots: Vec<usize> = (0..self.n_items)
            .map(|leaf| {
                let mut id = leaf;
                while parent[id] != id {
                    id = parent[id];
                }
                id
            })
            .collect();

        relabel(&roots)
    }

    /// Number of original items.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// Iterate over merges.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.merges.iter()
    }

    /// Merge heights, in merge order.
    pub fn heights(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.distance).collect()
    }
}

impl MergeRecorder for Dendrogram {
    fn record(&mut self, event: MergeEvent) {
        let MergeEvent { i, j, distance } = event;
        let (a, b) = (self.cluster_id[i], self.cluster_id[j]);
        let size = self.sizes[i] + self.sizes[j];

        self.merges.push(Merge {
            cluster_a: a.min(b),
            cluster_b: a.max(b),
            distance,
            size,
        });
        self.cluster_id[i] = self.n_items + self.merges.len() - 1;
        self.sizes[i] = size;
        self.sizes[j] = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_item_dendrogram() -> Dendrogram {
        let mut dendro = Dendrogram::new(4);
        dendro.record(MergeEvent::new(0, 1, 0.5));
        dendro.record(MergeEvent::new(2, 3, 0.7));
        dendro.record(MergeEvent::new(0, 2, 1.0));
        dendro
    }

    #[test]
    fn test_dendrogram_creation() {
        let dendro = Dendrogram::new(5);
        assert_eq!(dendro.n_items(), 5);
        assert_eq!(dendro.n_merges(), 0);
        assert_eq!(dendro.cut_at_distance(f64::MAX), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_dendrogram_merge_ids_and_sizes() {
        let dendro = four_item_dendrogram();
        let merges: Vec<_> = dendro
            .merges()
            .map(|m| (m.cluster_a, m.cluster_b, m.size))
            .collect();
        assert_eq!(merges, vec![(0, 1, 2), (2, 3, 2), (4, 5, 4)]);
        assert_eq!(dendro.heights(), vec![0.5, 0.7, 1.0]);
    }

    #[test]
    fn test_chained_merge_reuses_internal_id() {
        let mut dendro = Dendrogram::new(3);
        dendro.record(MergeEvent::new(1, 2, 1.0));
        dendro.record(MergeEvent::new(0, 1, 2.0));
        let last = dendro.merges().last().copied().unwrap();
        assert_eq!((last.cluster_a, last.cluster_b, last.size), (0, 3, 3));
    }

    #[test]
    fn test_cut_at_distance() {
        let dendro = four_item_dendrogram();
        assert_eq!(dendro.cut_at_distance(0.6), vec![0, 0, 1, 2]);
        assert_eq!(dendro.cut_at_distance(0.7), vec![0, 0, 1, 1]);
        assert_eq!(dendro.cut_at_distance(5.0), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_cut_to_k() {
        let dendro = four_item_dendrogram();
        assert_eq!(dendro.cut_to_k(3).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(dendro.cut_to_k(2).unwrap(), vec![0, 0, 1, 1]);
        assert!(dendro.cut_to_k(0).is_err());
        assert!(Dendrogram::new(4).cut_to_k(1).is_err());
    }
}
