//! 2-opt descent.
//!
//! # Algorithm
//!
//! For each pair of positions `i < j`, removing edges `(r[i], r[i+1])` and
//! `(r[j], r[j+1])` and reconnecting as `(r[i], r[j])`, `(r[i+1], r[j+1])`
//! changes the tour cost by
//!
//! ```text
//! delta = d(r[i], r[j]) + d(r[i+1], r[j+1]) - d(r[i], r[i+1]) - d(r[j], r[j+1])
//! ```
//!
//! (indices modulo n). If delta < 0 the segment `r[i+1..=j]` is reversed
//! and the scan continues. Passes repeat until one full pass applies no
//! move. There is no pass limit.
//!
//! # Complexity
//!
//! O(n²) per pass on symmetric matrices. Asymmetric matrices add an O(n)
//! inner-edge correction per candidate.

use super::{reversal_delta, IMPROVEMENT_EPSILON};
use crate::matrix::DistanceMatrix;

/// Applies 2-opt moves to `route` until it is 2-optimal.
///
/// Returns the number of improving moves applied.
///
/// # Examples
///
/// ```
/// use u_tsp::DistanceMatrix;
/// use u_tsp::local_search::two_opt_improve;
/// use u_tsp::tour::route_cost;
///
/// // Unit square; [0, 2, 1, 3] crosses itself.
/// let pts = [(0.0_f64, 0.0_f64), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
/// let m = DistanceMatrix::from_fn(4, |i, j| {
///     let (dx, dy) = (pts[i].0 - pts[j].0, pts[i].1 - pts[j].1);
///     (dx * dx + dy * dy).sqrt()
/// }).unwrap();
///
/// let mut route = vec![0, 2, 1, 3];
/// two_opt_improve(&mut route, &m);
/// assert!((route_cost(&route, &m) - 4.0).abs() < 1e-10);
/// ```
pub fn two_opt_improve(route: &mut [usize], distances: &DistanceMatrix) -> usize {
    let n = route.len();
    if n < 3 {
        return 0;
    }

    let mut moves = 0;
    let mut improved = true;

    while improved {
        improved = false;
        for i in 0..n - 1 {
            for j in i + 1..n {
                let delta = two_opt_delta(route, distances, i, j);
                if delta < -IMPROVEMENT_EPSILON {
                    route[i + 1..=j].reverse();
                    moves += 1;
                    improved = true;
                }
            }
        }
    }

    moves
}

/// Cost change of reversing `route[i+1..=j]`.
fn two_opt_delta(route: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = route.len();
    let a = route[i];
    let b = route[i + 1];
    let c = route[j];
    let d = route[(j + 1) % n];

    let removed = distances.get(a, b) + distances.get(c, d);
    let added = distances.get(a, c) + distances.get(b, d);

    added - removed + reversal_delta(route, distances, i + 1, j)
}
