//! Hierarchical (agglomerative) clustering.
//!
//! Bottom-up clustering that builds a **dendrogram** by iteratively
//! merging the closest clusters. The number of clusters is never chosen
//! up front: the engine always reduces N observations to one cluster in
//! exactly N − 1 merges, and the history can be cut afterwards.
//!
//! # Algorithm
//!
//! ```text
//! repeat N − 1 times:
//!     (i, j) ← closest active pair           O(N²)
//!     d      ← distance(i, j)
//!     for every other active k:              O(N)
//!         distance(i, k) ← linkage(d_ik, d_jk, d_ij, c_i, c_j, c_k)
//!     c_i ← c_i + c_j; retire j
//!     emit (i, j, d)
//! ```
//!
//! Time O(N³), space O(N²). The lower index always survives, so the root
//! cluster is always labelled 0.
//!
//! # Linkage Choice
//!
//! | Linkage | Effect |
//! |---------|--------|
//! | Single | Chaining; elongated clusters |
//! | Complete | Compact, spherical clusters |
//! | Average | Balanced compromise |
//! | Ward | Minimizes within-cluster variance |
//! | Centroid / Median | Heights may invert (not monotone) |

use super::linkage::Linkage;
use super::matrix::DissimilarityMatrix;
use super::traits::{MergeEvent, MergeRecorder};
use crate::error::{Error, Result};
use crate::hierarchy::MergeHistory;

/// Lifecycle of one clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No merge performed yet.
    Ready,
    /// At least one merge performed, more than one cluster left.
    Merging,
    /// A single cluster remains.
    Done,
}

/// The agglomeration engine: owns one matrix for the length of one run.
///
/// Aborting a run means dropping the engine; no partial state is resumable
/// elsewhere.
#[derive(Debug, Clone)]
pub struct Agglomerator {
    matrix: DissimilarityMatrix,
    linkage: Linkage,
    merges_done: usize,
}

impl Agglomerator {
    /// Create an engine over `matrix` using `linkage` for every update.
    pub fn new(matrix: DissimilarityMatrix, linkage: Linkage) -> Self {
        Self {
            matrix,
            linkage,
            merges_done: 0,
        }
    }

    /// Current state of the run.
    pub fn state(&self) -> EngineState {
        if self.matrix.active_count() <= 1 {
            EngineState::Done
        } else if self.merges_done == 0 {
            EngineState::Ready
        } else {
            EngineState::Merging
        }
    }

    /// Linkage used by this run.
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// The matrix in its current, partially reduced state.
    pub fn matrix(&self) -> &DissimilarityMatrix {
        &self.matrix
    }

    /// Number of merges performed so far.
    pub fn merges_done(&self) -> usize {
        self.merges_done
    }

    /// Perform one merge and report it to `recorder`.
    ///
    /// Returns `Ok(None)` without touching the recorder once the run is done.
    pub fn step<R: MergeRecorder + ?Sized>(
        &mut self,
        recorder: &mut R,
    ) -> Result<Option<MergeEvent>> {
        if self.state() == EngineState::Done {
            return Ok(None);
        }

        let (i, j) = self
            .matrix
            .minimum_active_pair()
            .ok_or(Error::NoActivePair {
                step: self.merges_done,
            })?;
        let distance = self.matrix.merge(i, j, self.linkage);
        self.merges_done += 1;

        let event = MergeEvent { i, j, distance };
        tracing::trace!(step = self.merges_done, i, j, distance, "merge");
        recorder.record(event);

        Ok(Some(event))
    }

    /// Run every remaining merge, reporting each to `recorder`.
    pub fn cluster<R: MergeRecorder + ?Sized>(&mut self, recorder: &mut R) -> Result<()> {
        let n = self.matrix.size();
        tracing::debug!(
            n,
            linkage = %self.linkage,
            remaining = self.matrix.active_count().saturating_sub(1),
            "agglomerative clustering started"
        );

        while self.step(recorder)?.is_some() {}

        tracing::debug!(n, merges = self.merges_done, "agglomerative clustering finished");
        Ok(())
    }
}

/// Hierarchical (agglomerative) clustering over caller-supplied dissimilarities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HierarchicalClustering {
    /// Linkage method.
    linkage: Linkage,
    /// Accepted asymmetry between `d[i][j]` and `d[j][i]`.
    tolerance: f64,
}

impl Default for HierarchicalClustering {
    fn default() -> Self {
        Self::new(Linkage::default())
    }
}

impl HierarchicalClustering {
    /// Create a new hierarchical clusterer requiring exact symmetry.
    pub fn new(linkage: Linkage) -> Self {
        Self {
            linkage,
            tolerance: 0.0,
        }
    }

    /// Set linkage method.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Set the symmetry tolerance applied to full matrices.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Linkage method.
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Symmetry tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Validate a full N×N matrix, cluster it, and return the merge history.
    pub fn fit(&self, rows: Vec<Vec<f64>>) -> Result<MergeHistory> {
        let matrix = DissimilarityMatrix::with_tolerance(rows, self.tolerance)?;
        self.fit_matrix(matrix)
    }

    /// Cluster a condensed upper triangle of `n` observations.
    pub fn fit_condensed(&self, n: usize, condensed: &[f64]) -> Result<MergeHistory> {
        let matrix = DissimilarityMatrix::from_condensed(n, condensed)?;
        self.fit_matrix(matrix)
    }

    /// Cluster an already validated matrix.
    pub fn fit_matrix(&self, matrix: DissimilarityMatrix) -> Result<MergeHistory> {
        let mut history = MergeHistory::new(matrix.size());
        Agglomerator::new(matrix, self.linkage).cluster(&mut history)?;
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Dendrogram;

    fn line(points: &[f64]) -> Vec<Vec<f64>> {
        points
            .iter()
            .map(|a| points.iter().map(|b| (a - b).abs()).collect())
            .collect()
    }

    #[test]
    fn test_state_machine() {
        let matrix = DissimilarityMatrix::new(line(&[0.0, 1.0, 5.0])).unwrap();
        let mut engine = Agglomerator::new(matrix, Linkage::Single);
        let mut events = Vec::new();

        assert_eq!(engine.state(), EngineState::Ready);
        let first = engine.step(&mut events).unwrap().unwrap();
        assert_eq!(first, MergeEvent::new(0, 1, 1.0));
        assert_eq!(engine.state(), EngineState::Merging);

        let second = engine.step(&mut events).unwrap().unwrap();
        assert_eq!(second, MergeEvent::new(0, 2, 4.0));
        assert_eq!(engine.state(), EngineState::Done);
        assert_eq!(engine.merges_done(), 2);

        assert_eq!(engine.step(&mut events).unwrap(), None);
        assert_eq!(events, vec![first, second]);
    }

    #[test]
    fn test_cluster_on_done_engine_records_nothing() {
        let matrix = DissimilarityMatrix::new(line(&[0.0, 2.0])).unwrap();
        let mut engine = Agglomerator::new(matrix, Linkage::Ward);
        let mut history = MergeHistory::new(2);

        engine.cluster(&mut history).unwrap();
        engine.cluster(&mut history).unwrap();

        assert_eq!(history.n_merges(), 1);
        assert_eq!(history.distances(), &[0.0, 2.0]);
        assert_eq!(history.assignments(), &[vec![0, 1], vec![0, 0]]);
    }

    #[test]
    fn test_hierarchical_basic() {
        let history = HierarchicalClustering::new(Linkage::Average)
            .fit(line(&[0.0, 0.1, 10.0, 10.1]))
            .unwrap();

        let labels = history.cut_to_k(2).unwrap();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_fit_condensed_matches_fit() {
        let rows = line(&[0.0, 3.0, 4.0, 9.0]);
        let mut condensed = Vec::new();
        for i in 0..4 {
            for j in (i + 1)..4 {
                condensed.push(rows[i][j]);
            }
        }
        let hc = HierarchicalClustering::new(Linkage::Complete);
        assert_eq!(hc.fit(rows).unwrap(), hc.fit_condensed(4, &condensed).unwrap());
    }

    #[test]
    fn test_fit_propagates_construction_errors() {
        let hc = HierarchicalClustering::default();
        assert_eq!(hc.linkage(), Linkage::Average);
        assert!(matches!(
            hc.fit(vec![vec![0.0]]),
            Err(Error::TooFewObservations { found: 1 })
        ));

        let mut rows = line(&[0.0, 1.0, 2.0]);
        rows[0][1] = 1.001;
        assert!(matches!(hc.fit(rows.clone()), Err(Error::Asymmetric { .. })));
        assert!(hc.with_tolerance(0.01).fit(rows).is_ok());
    }

    #[test]
    fn test_drives_dendrogram_recorder() {
        let matrix = DissimilarityMatrix::new(line(&[0.0, 1.0, 3.0, 7.0])).unwrap();
        let mut dendro = Dendrogram::new(4);
        Agglomerator::new(matrix, Linkage::Single)
            .cluster(&mut dendro)
            .unwrap();

        assert_eq!(dendro.n_merges(), 3);
        assert_eq!(dendro.heights(), vec![1.0, 2.0, 4.0]);
        assert_eq!(dendro.merges().last().map(|m| m.size), Some(4));
    }

    #[test]
    fn test_heights_stay_finite_for_huge_distances() {
        let big = 1e308;
        let uniform = vec![vec![big; 3]; 3];
        let mut spread = vec![vec![big; 4]; 4];
        spread[0][1] = 1.0;
        spread[1][0] = 1.0;

        for linkage in Linkage::ALL {
            for rows in [uniform.clone(), spread.clone()] {
                let history = HierarchicalClustering::new(linkage).fit(rows).unwrap();
                assert!(
                    history.distances().iter().all(|d| d.is_finite()),
                    "{linkage}: {:?}",
                    history.distances()
                );
            }
        }

        let history = HierarchicalClustering::new(Linkage::Average).fit(uniform).unwrap();
        assert_eq!(history.distances(), &[0.0, big, big]);
    }

    #[test]
    fn test_ward_on_equal_pairs() {
        // Two tight pairs far apart; Ward must join each pair first.
        let history = HierarchicalClustering::new(Linkage::Ward)
            .fit(line(&[0.0, 1.0, 10.0, 11.0]))
            .unwrap();
        let events = history.events();
        assert_eq!((events[0].i, events[0].j), (0, 1));
        assert_eq!((events[1].i, events[1].j), (2, 3));
        assert_eq!((events[2].i, events[2].j), (0, 2));
    }
}
