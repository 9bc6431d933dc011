//! Error types for u-tsp.

use thiserror::Error;

/// Errors raised while building matrices, tours, or solver configurations.
///
/// Every variant describes malformed input. Operators that build routes by
/// construction never produce these; a broken permutation coming out of an
/// operator is a defect and is caught by debug assertions instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A crossover method name could not be recognized.
    #[error("unknown crossover method: {0:?} (expected PMX, OX or EX)")]
    UnknownCrossover(String),

    /// A local-search method name could not be recognized.
    #[error("unknown local search method: {0:?} (expected NONE, 2OPT or 3OPT)")]
    UnknownLocalSearch(String),

    /// The distance matrix is empty, ragged, or holds unusable entries.
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),

    /// A route does not have one entry per city of the matrix.
    #[error("route has {actual} cities but the distance matrix has {expected}")]
    DimensionMismatch {
        /// City count of the distance matrix.
        expected: usize,
        /// Length of the supplied route.
        actual: usize,
    },

    /// A route is not a permutation of `0..n`.
    #[error("route is not a permutation: {0}")]
    InvalidPermutation(String),
}

/// Result type alias for u-tsp operations.
pub type Result<T> = std::result::Result<T, TspError>;
