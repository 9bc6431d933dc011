//! Dense distance matrix.
//!
//! [`DistanceMatrix`] is the only problem input the solvers consume. It is
//! built once by the caller, validated, and then shared read-only by every
//! [`Tour`](crate::tour::Tour) and operator for the duration of a run.
//!
//! Diagonal entries are stored but never consulted, so callers may fill
//! them with zero or with a large sentinel as some instance formats do.

use crate::error::{Result, TspError};

/// Row-major `n x n` table of non-negative travel costs.
///
/// # Examples
///
/// ```
/// use u_tsp::DistanceMatrix;
///
/// let m = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0],
///     vec![2.0, 0.0, 6.0],
///     vec![9.0, 6.0, 0.0],
/// ]).unwrap();
///
/// assert_eq!(m.len(), 3);
/// assert_eq!(m.get(1, 2), 6.0);
/// assert!(m.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
    symmetric: bool,
}

impl DistanceMatrix {
    /// Builds a matrix from one vector per row.
    ///
    /// # Errors
    /// Returns [`TspError::InvalidMatrix`] if there are no rows, if any row
    /// length differs from the row count, or if an off-diagonal entry is
    /// negative or not finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TspError::InvalidMatrix(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_flat(n, data)
    }

    /// Builds a matrix from a flat row-major buffer of `n * n` entries.
    ///
    /// # Errors
    /// Same conditions as [`from_rows`](Self::from_rows).
    pub fn from_flat(n: usize, data: Vec<f64>) -> Result<Self> {
        if n == 0 {
            return Err(TspError::InvalidMatrix("matrix has no cities".into()));
        }
        if data.len() != n * n {
            return Err(TspError::InvalidMatrix(format!(
                "buffer has {} entries, expected {}",
                data.len(),
                n * n
            )));
        }

        let mut symmetric = true;
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = data[i * n + j];
                if !d.is_finite() || d < 0.0 {
                    return Err(TspError::InvalidMatrix(format!(
                        "entry ({i}, {j}) = {d} is not a finite non-negative cost"
                    )));
                }
                if j > i && d != data[j * n + i] {
                    symmetric = false;
                }
            }
        }

        Ok(Self { n, data, symmetric })
    }

    /// Builds a matrix by evaluating `f(i, j)` for every off-diagonal cell.
    ///
    /// Diagonal cells are set to `0.0`.
    ///
    /// ```
    /// use u_tsp::DistanceMatrix;
    ///
    /// let pts = [(0.0_f64, 0.0_f64), (3.0, 4.0)];
    /// let m = DistanceMatrix::from_fn(2, |i, j| {
    ///     let (dx, dy) = (pts[i].0 - pts[j].0, pts[i].1 - pts[j].1);
    ///     (dx * dx + dy * dy).sqrt()
    /// }).unwrap();
    /// assert_eq!(m.get(0, 1), 5.0);
    /// ```
    pub fn from_fn<F>(n: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    data[i * n + j] = f(i, j);
                }
            }
        }
        Self::from_flat(n, data)
    }

    /// Number of cities.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false`: construction rejects empty matrices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of travelling from city `from` to city `to`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Whether `get(i, j) == get(j, i)` for every pair of distinct cities.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }
}
