use core::fmt;

/// Result alias for `agglo`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while building a dissimilarity matrix or running a clustering.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Fewer than two observations were supplied.
    TooFewObservations {
        /// Number of observations found.
        found: usize,
    },

    /// Matrix dimension mismatch (a row of the wrong length, or a condensed
    /// buffer of the wrong length).
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// `distance[i][j]` and `distance[j][i]` differ by more than the tolerance.
    Asymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Absolute difference between the two entries.
        difference: f64,
    },

    /// An off-diagonal entry is NaN, negative, or infinite.
    InvalidDistance {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Offending value.
        value: f64,
    },

    /// Linkage name did not match any known method.
    UnknownLinkage(String),

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// The engine still had merges to perform but found no active pair.
    ///
    /// Unreachable for a matrix built through the public constructors.
    NoActivePair {
        /// Number of merges completed before the fault.
        step: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooFewObservations { found } => {
                write!(f, "need at least 2 observations, found {found}")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::Asymmetric { i, j, difference } => {
                write!(
                    f,
                    "matrix is not symmetric at ({i}, {j}): entries differ by {difference}"
                )
            }
            Error::InvalidDistance { i, j, value } => {
                write!(f, "invalid dissimilarity {value} at ({i}, {j})")
            }
            Error::UnknownLinkage(name) => write!(f, "unknown linkage method '{name}'"),
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::NoActivePair { step } => {
                write!(f, "no active pair left after {step} merges")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
