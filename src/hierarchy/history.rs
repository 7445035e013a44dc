//! Step-by-step cluster assignment table.
//!
//! Row `t` of the table labels every observation after `t` merges. Labels are
//! original indices: a cluster is named after its surviving (lowest) index.

use super::dendrogram::Dendrogram;
use crate::cluster::{MergeEvent, MergeRecorder};
use crate::error::{Error, Result};

/// Full merge history of one clustering run.
///
/// ```text
/// step 0: [0, 1, 2, 3, 4]   distance 0
/// step 1: [0, 1, 2, 0, 4]   merge (0, 3)
/// step 2: [0, 1, 0, 0, 4]   merge (0, 2)
/// ...
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeHistory {
    assignments: Vec<Vec<usize>>,
    distances: Vec<f64>,
    events: Vec<MergeEvent>,
}

impl MergeHistory {
    /// Empty history for `n_items` observations: identity row, distance 0.
    pub fn new(n_items: usize) -> Self {
        let mut assignments = Vec::with_capacity(n_items.max(1));
        assignments.push((0..n_items).collect());
        let mut distances = Vec::with_capacity(n_items.max(1));
        distances.push(0.0);

        Self {
            assignments,
            distances,
            events: Vec::with_capacity(n_items.saturating_sub(1)),
        }
    }

    /// Assignment table; one row per step, starting with the identity row.
    pub fn assignments(&self) -> &[Vec<usize>] {
        &self.assignments
    }

    /// Merge distances indexed by step; `distances()[0]` is always 0.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Recorded merges, in order.
    pub fn events(&self) -> &[MergeEvent] {
        &self.events
    }

    /// Number of original observations.
    pub fn n_observations(&self) -> usize {
        self.assignments[0].len()
    }

    /// Number of merges recorded so far.
    pub fn n_merges(&self) -> usize {
        self.events.len()
    }

    /// True once every observation has been merged into a single cluster.
    pub fn is_complete(&self) -> bool {
        self.n_merges() + 1 >= self.n_observations()
    }

    /// Labels after `step` merges, if that many were recorded.
    pub fn labels_after(&self, step: usize) -> Option<&[usize]> {
        self.assignments.get(step).map(Vec::as_slice)
    }

    /// Consecutive labels (`0..k`) for the partition into `k` clusters.
    pub fn cut_to_k(&self, k: usize) -> Result<Vec<usize>> {
        let n = self.n_observations();
        if k == 0 || k > n {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be between 1 and the number of observations",
            });
        }
        let row = self.labels_after(n - k).ok_or(Error::InvalidParameter {
            name: "k",
            message: "history does not contain enough merges",
        })?;
        Ok(relabel(row))
    }

    /// Consecutive labels after applying the leading merges whose distance is
    /// at most `height`.
    ///
    /// With a non-monotone linkage the cut stops at the first merge above
    /// `height`, even if a later merge falls below it.
    pub fn cut_at_height(&self, height: f64) -> Vec<usize> {
        let steps = self
            .events
            .iter()
            .take_while(|e| e.distance <= height)
            .count();
        relabel(&self.assignments[steps])
    }

    /// Replay the recorded merges into a SciPy-style [`Dendrogram`].
    pub fn dendrogram(&self) -> Dendrogram {
        let mut dendro = Dendrogram::new(self.n_observations());
        for &event in &self.events {
            dendro.record(event);
        }
        dendro
    }
}

impl MergeRecorder for MergeHistory {
    fn record(&mut self, event: MergeEvent) {
        let MergeEvent { i, j, distance } = event;
        let next: Vec<usize> = self.assignments[self.assignments.len() - 1]
            .iter()
            .map(|&label| if label == j { i } else { label })
            .collect();

        self.assignments.push(next);
        self.distances.push(distance);
        self.events.push(event);
    }
}

/// Renumber labels to `0..k` in order of first appearance.
pub(crate) fn relabel(labels: &[usize]) -> Vec<usize> {
    let mut seen: Vec<usize> = Vec::new();
    labels
        .iter()
        .map(|l| match seen.iter().position(|s| s == l) {
            Some(p) => p,
            None => {
                seen.push(*l);
                seen.len() - 1
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_step_history() -> MergeHistory {
        let mut h = MergeHistory::new(4);
        h.record(MergeEvent::new(0, 1, 0.5));
        h.record(MergeEvent::new(2, 3, 0.7));
        h.record(MergeEvent::new(0, 2, 1.0));
        h
    }

    #[test]
    fn test_history_creation() {
        let h = MergeHistory::new(5);
        assert_eq!(h.n_observations(), 5);
        assert_eq!(h.n_merges(), 0);
        assert_eq!(h.assignments(), &[vec![0, 1, 2, 3, 4]]);
        assert_eq!(h.distances(), &[0.0]);
        assert!(!h.is_complete());
    }

    #[test]
    fn test_record_replaces_absorbed_label() {
        let h = four_step_history();
        assert_eq!(
            h.assignments(),
            &[
                vec![0, 1, 2, 3],
                vec![0, 0, 2, 3],
                vec![0, 0, 2, 2],
                vec![0, 0, 0, 0],
            ]
        );
        assert_eq!(h.distances(), &[0.0, 0.5, 0.7, 1.0]);
        assert_eq!(h.n_merges(), 3);
        assert!(h.is_complete());
    }

    #[test]
    fn test_labels_after() {
        let h = four_step_history();
        assert_eq!(h.labels_after(2), Some(&[0, 0, 2, 2][..]));
        assert_eq!(h.labels_after(4), None);
    }

    #[test]
    fn test_cut_to_k() {
        let h = four_step_history();
        assert_eq!(h.cut_to_k(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(h.cut_to_k(2).unwrap(), vec![0, 0, 1, 1]);
        assert_eq!(h.cut_to_k(1).unwrap(), vec![0, 0, 0, 0]);
        assert!(h.cut_to_k(0).is_err());
        assert!(h.cut_to_k(5).is_err());
    }

    #[test]
    fn test_cut_to_k_incomplete_history() {
        let mut h = MergeHistory::new(4);
        h.record(MergeEvent::new(1, 3, 0.2));
        assert_eq!(h.cut_to_k(3).unwrap(), vec![0, 1, 2, 1]);
        assert!(h.cut_to_k(2).is_err());
    }

    #[test]
    fn test_cut_at_height() {
        let h = four_step_history();
        assert_eq!(h.cut_at_height(0.1), vec![0, 1, 2, 3]);
        assert_eq!(h.cut_at_height(0.5), vec![0, 0, 1, 2]);
        assert_eq!(h.cut_at_height(0.8), vec![0, 0, 1, 1]);
        assert_eq!(h.cut_at_height(f64::INFINITY), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_cut_at_height_stops_at_inversion() {
        let mut h = MergeHistory::new(3);
        h.record(MergeEvent::new(0, 1, 2.0));
        h.record(MergeEvent::new(0, 2, 1.5));
        assert_eq!(h.cut_at_height(1.8), vec![0, 1, 2]);
    }

    #[test]
    fn test_relabel_first_appearance() {
        assert_eq!(relabel(&[3, 3, 1, 7, 1]), vec![0, 0, 1, 2, 1]);
        assert!(relabel(&[]).is_empty());
    }

    #[test]
    fn test_accessors_do_not_mutate() {
        let h = four_step_history();
        let before = h.clone();
        let _ = h.assignments();
        let _ = h.distances();
        let _ = h.cut_to_k(2);
        assert_eq!(h, before);
        assert_eq!(h.assignments(), before.assignments());
    }
}
