//! Mutable dissimilarity matrix with a retirement mask.
//!
//! Indices are never reallocated. Merging `i` and `j` overwrites row `i`
//! with the linkage update and marks `j` dead; a dead index stays dead.

use super::linkage::Linkage;
use crate::error::{Error, Result};

/// Symmetric N×N dissimilarity matrix owned by one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct DissimilarityMatrix {
    distance: Vec<Vec<f64>>,
    active: Vec<bool>,
    cardinality: Vec<usize>,
    n_active: usize,
}

impl DissimilarityMatrix {
    /// Build from a full square matrix, requiring exact symmetry.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::with_tolerance(rows, 0.0)
    }

    /// Build from a full square matrix, accepting `|d[i][j] - d[j][i]| <= tolerance`.
    ///
    /// Off-diagonal pairs within tolerance are replaced by their mean; the
    /// diagonal is ignored and stored as zero.
    pub fn with_tolerance(mut rows: Vec<Vec<f64>>, tolerance: f64) -> Result<Self> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tolerance",
                message: "must be a non-negative number",
            });
        }

        let n = rows.len();
        if n < 2 {
            return Err(Error::TooFewObservations { found: n });
        }
        if let Some(row) = rows.iter().find(|r| r.len() != n) {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: row.len(),
            });
        }

        for i in 0..n {
            rows[i][i] = 0.0;
            for j in (i + 1)..n {
                let upper = check_entry(i, j, rows[i][j])?;
                let lower = check_entry(j, i, rows[j][i])?;
                let difference = (upper - lower).abs();
                if difference > tolerance {
                    return Err(Error::Asymmetric { i, j, difference });
                }
                let d = if difference == 0.0 {
                    upper
                } else {
                    0.5 * (upper + lower)
                };
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }

        Ok(Self::from_validated(rows))
    }

    /// Build from a condensed upper triangle: entries `(0,1), (0,2), …, (0,n-1), (1,2), …`.
    pub fn from_condensed(n: usize, condensed: &[f64]) -> Result<Self> {
        if n < 2 {
            return Err(Error::TooFewObservations { found: n });
        }
        let expected = n * (n - 1) / 2;
        if condensed.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: condensed.len(),
            });
        }

        let mut rows = vec![vec![0.0; n]; n];
        let pairs = (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j)));
        for ((i, j), &value) in pairs.zip(condensed) {
            let d = check_entry(i, j, value)?;
            rows[i][j] = d;
            rows[j][i] = d;
        }

        Ok(Self::from_validated(rows))
    }

    fn from_validated(distance: Vec<Vec<f64>>) -> Self {
        let n = distance.len();
        Self {
            distance,
            active: vec![true; n],
            cardinality: vec![1; n],
            n_active: n,
        }
    }

    /// Number of original observations.
    pub fn size(&self) -> usize {
        self.distance.len()
    }

    /// Current dissimilarity between indices `i` and `j`.
    ///
    /// Retired indices read as `+inf`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distance[i][j]
    }

    /// Whether index `i` still represents a cluster.
    pub fn is_active(&self, i: usize) -> bool {
        self.active[i]
    }

    /// Number of original observations represented by index `i`.
    pub fn cardinality(&self, i: usize) -> usize {
        self.cardinality[i]
    }

    /// Number of indices still active.
    pub fn active_count(&self) -> usize {
        self.n_active
    }

    /// Active indices in ascending order.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, &alive)| alive.then_some(i))
    }

    /// Sum of cardinalities over active indices. Always equals [`size`](Self::size).
    pub fn total_cardinality(&self) -> usize {
        self.active_indices().map(|i| self.cardinality[i]).sum()
    }

    /// Closest pair of active indices, as `(i, j)` with `i < j`.
    ///
    /// Ties resolve to the lexicographically lowest pair. Returns `None`
    /// when fewer than two indices are active.
    pub fn minimum_active_pair(&self) -> Option<(usize, usize)> {
        let n = self.size();
        let mut best: Option<(usize, usize)> = None;
        let mut best_d = f64::INFINITY;

        for i in self.active_indices() {
            let row = &self.distance[i];
            for j in (i + 1)..n {
                if !self.active[j] {
                    continue;
                }
                // Strict comparison keeps the first pair seen on ties.
                if best.is_none() || row[j] < best_d {
                    best_d = row[j];
                    best = Some((i, j));
                }
            }
        }

        best
    }

    /// Merge indices `i` and `j` and return their dissimilarity before the merge.
    ///
    /// The lower index survives. Its distances to every other active index are
    /// recomputed by `linkage`, its cardinality absorbs the other's, and the
    /// higher index is retired with its row and column set to `+inf`.
    ///
    /// # Panics
    ///
    /// Panics if `i == j`, if either index is out of range, or if either index
    /// has already been retired.
    pub fn merge(&mut self, i: usize, j: usize, linkage: Linkage) -> f64 {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        assert!(i != j, "cannot merge index {i} with itself");
        assert!(
            self.active[i] && self.active[j],
            "cannot merge retired index: ({i}, {j})"
        );

        let n = self.size();
        let d_ij = self.distance[i][j];
        let c_i = self.cardinality[i] as f64;
        let c_j = self.cardinality[j] as f64;

        for k in 0..n {
            if k == i || k == j || !self.active[k] {
                continue;
            }
            let c_k = self.cardinality[k] as f64;
            let d = linkage.update(self.distance[i][k], self.distance[j][k], d_ij, c_i, c_j, c_k);
            self.distance[i][k] = d;
            self.distance[k][i] = d;
        }

        self.cardinality[i] += self.cardinality[j];
        self.active[j] = false;
        self.n_active -= 1;
        for k in 0..n {
            self.distance[j][k] = f64::INFINITY;
            self.distance[k][j] = f64::INFINITY;
        }

        d_ij
    }
}

fn check_entry(i: usize, j: usize, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidDistance { i, j, value })
    }
}
