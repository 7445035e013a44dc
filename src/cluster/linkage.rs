//! Lance-Williams linkage methods.
//!
//! After clusters `i` and `j` merge, the dissimilarity from the merged
//! cluster to any other cluster `k` is recomputed from the old values alone:
//!
//! ```text
//! d(i∪j, k) = αᵢ·d(i,k) + αⱼ·d(j,k) + β·d(i,j) + γ·|d(i,k) − d(j,k)|
//! ```
//!
//! | Method | αᵢ | αⱼ | β | γ |
//! |--------|----|----|---|---|
//! | Single | ½ | ½ | 0 | −½ |
//! | Complete | ½ | ½ | 0 | ½ |
//! | Average | cᵢ/(cᵢ+cⱼ) | cⱼ/(cᵢ+cⱼ) | 0 | 0 |
//! | WeightedAverage | ½ | ½ | 0 | 0 |
//! | Centroid | cᵢ/(cᵢ+cⱼ) | cⱼ/(cᵢ+cⱼ) | −cᵢcⱼ/(cᵢ+cⱼ)² | 0 |
//! | Median | ½ | ½ | −¼ | 0 |
//! | Ward | (cᵢ+cₖ)/s | (cⱼ+cₖ)/s | −cₖ/s | 0 |
//!
//! `cᵢ`, `cⱼ`, `cₖ` are cluster cardinalities before the merge, and for Ward
//! `s = cᵢ+cⱼ+cₖ`.
//!
//! Updates are evaluated in coefficient form (weights divided out before they
//! touch a distance), so dissimilarities close to `f64::MAX` stay finite.
//!
//! # References
//!
//! - Lance, G.N. & Williams, W.T. (1967). "A general theory of
//!   classificatory sorting strategies: Hierarchical systems".
//! - Frank, I.E. & Todeschini, R. (1994). "The Data Analysis Handbook", pp. 152-155.

use crate::error::Error;
use core::fmt;
use core::str::FromStr;

/// Linkage method for hierarchical clustering.
///
/// Carries no state, so one value can drive any number of concurrent runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Linkage {
    /// Nearest neighbour: `min(d_ik, d_jk)`.
    Single,
    /// Farthest neighbour: `max(d_ik, d_jk)`.
    Complete,
    /// UPGMA: size-weighted mean of the two distances.
    #[default]
    Average,
    /// WPGMA (McQuitty): unweighted mean of the two distances.
    WeightedAverage,
    /// UPGMC. Meaningful on squared Euclidean dissimilarities.
    Centroid,
    /// WPGMC (Gower). Meaningful on squared Euclidean dissimilarities.
    Median,
    /// Ward's minimum variance criterion.
    Ward,
}

/// One row of the Lance-Williams coefficient table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanceWilliams {
    /// Weight on `d(i,k)`.
    pub alpha_i: f64,
    /// Weight on `d(j,k)`.
    pub alpha_j: f64,
    /// Weight on `d(i,j)`.
    pub beta: f64,
    /// Weight on `|d(i,k) − d(j,k)|`.
    pub gamma: f64,
}

impl LanceWilliams {
    /// Evaluate the general update formula.
    #[inline]
    pub fn apply(&self, d_ik: f64, d_jk: f64, d_ij: f64) -> f64 {
        (self.alpha_i * d_ik + self.beta * d_ij)
            + self.alpha_j * d_jk
            + self.gamma * (d_ik - d_jk).abs()
    }
}

impl Linkage {
    /// Every method, in table order.
    pub const ALL: [Linkage; 7] = [
        Linkage::Single,
        Linkage::Complete,
        Linkage::Average,
        Linkage::WeightedAverage,
        Linkage::Centroid,
        Linkage::Median,
        Linkage::Ward,
    ];

    /// Canonical lower-case name, accepted back by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
            Linkage::WeightedAverage => "weighted",
            Linkage::Centroid => "centroid",
            Linkage::Median => "median",
            Linkage::Ward => "ward",
        }
    }

    /// Whether successive merge heights are guaranteed non-decreasing.
    ///
    /// Centroid and median linkage can produce inversions.
    pub fn is_monotone(self) -> bool {
        !matches!(self, Linkage::Centroid | Linkage::Median)
    }

    /// Coefficients of the general formula for the given cardinalities.
    pub fn coefficients(self, c_i: f64, c_j: f64, c_k: f64) -> LanceWilliams {
        let (alpha_i, alpha_j, beta, gamma) = match self {
            Linkage::Single => (0.5, 0.5, 0.0, -0.5),
            Linkage::Complete => (0.5, 0.5, 0.0, 0.5),
            Linkage::Average => {
                let s = c_i + c_j;
                (c_i / s, c_j / s, 0.0, 0.0)
            }
            Linkage::WeightedAverage => (0.5, 0.5, 0.0, 0.0),
            Linkage::Centroid => {
                let s = c_i + c_j;
                (c_i / s, c_j / s, -(c_i * c_j) / (s * s), 0.0)
            }
            Linkage::Median => (0.5, 0.5, -0.25, 0.0),
            Linkage::Ward => {
                let s = c_i + c_j + c_k;
                ((c_i + c_k) / s, (c_j + c_k) / s, -c_k / s, 0.0)
            }
        };
        LanceWilliams {
            alpha_i,
            alpha_j,
            beta,
            gamma,
        }
    }

    /// Dissimilarity between the merged cluster `i∪j` and cluster `k`.
    ///
    /// `i` survives the merge, `j` is absorbed; all cardinalities are the
    /// values before the merge.
    #[inline]
    pub fn update(self, d_ik: f64, d_jk: f64, d_ij: f64, c_i: f64, c_j: f64, c_k: f64) -> f64 {
        match self {
            Linkage::Single => d_ik.min(d_jk),
            Linkage::Complete => d_ik.max(d_jk),
            Linkage::Average => {
                let s = c_i + c_j;
                (c_i / s) * d_ik + (c_j / s) * d_jk
            }
            Linkage::WeightedAverage => 0.5 * d_ik + 0.5 * d_jk,
            // The negative term is subtracted from the d_ik term first: d_ij is
            // the minimum, so the partial sum never exceeds the result.
            Linkage::Centroid => {
                let s = c_i + c_j;
                ((c_i / s) * d_ik - (c_i / s) * (c_j / s) * d_ij) + (c_j / s) * d_jk
            }
            Linkage::Median => (0.5 * d_ik - 0.25 * d_ij) + 0.5 * d_jk,
            Linkage::Ward => {
                let s = c_i + c_j + c_k;
                (((c_i + c_k) / s) * d_ik - (c_k / s) * d_ij) + ((c_j + c_k) / s) * d_jk
            }
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "average" | "upgma" => Ok(Linkage::Average),
            "weighted" | "weighted_average" | "weightedaverage" | "wpgma" | "mcquitty" => {
                Ok(Linkage::WeightedAverage)
            }
            "centroid" | "upgmc" => Ok(Linkage::Centroid),
            "median" | "wpgmc" => Ok(Linkage::Median),
            "ward" | "ward.d" => Ok(Linkage::Ward),
            _ => Err(Error::UnknownLinkage(s.to_string())),
        }
    }
}
