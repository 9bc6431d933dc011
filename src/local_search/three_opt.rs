//! First-improvement 3-opt.
//!
//! # Algorithm
//!
//! For positions `i < j < k` the tour is cut into
//! `A = ..=r[i]`, `B = r[i+1..=j]`, `C = r[j+1..=k]`, `D = r[k+1]..`
//! (D wraps around to the start). Four reconnections are tried, in order:
//!
//! 1. `A B' C D`: reverse B
//! 2. `A B C' D`: reverse C
//! 3. `A B' C' D`: reverse both
//! 4. `A (B C)' D`: reverse B and C as one segment
//!
//! The first improving reconnection is applied and the scan restarts from
//! the top. A scan that finds nothing ends the descent; otherwise the
//! descent stops after [`THREE_OPT_MAX_PASSES`] scans.
//!
//! # Complexity
//!
//! O(n³) per scan.

use super::{reversal_delta, IMPROVEMENT_EPSILON};
use crate::matrix::DistanceMatrix;

/// Maximum number of scans performed by [`three_opt_improve`].
pub const THREE_OPT_MAX_PASSES: usize = 20;

/// One of the four segment-reversal reconnections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconnection {
    ReverseFirst,
    ReverseSecond,
    ReverseBoth,
    ReverseSpan,
}

const RECONNECTIONS: [Reconnection; 4] = [
    Reconnection::ReverseFirst,
    Reconnection::ReverseSecond,
    Reconnection::ReverseBoth,
    Reconnection::ReverseSpan,
];

/// Applies first-improvement 3-opt, at most [`THREE_OPT_MAX_PASSES`] scans.
///
/// Returns the number of improving moves applied.
///
/// ```
/// use u_tsp::DistanceMatrix;
/// use u_tsp::local_search::three_opt_improve;
/// use u_tsp::tour::route_cost;
///
/// let pts = [(0.0_f64, 0.0_f64), (2.0, 0.0), (3.0, 1.0), (1.0, 1.0), (0.0, 2.0)];
/// let m = DistanceMatrix::from_fn(5, |i, j| {
///     let (dx, dy) = (pts[i].0 - pts[j].0, pts[i].1 - pts[j].1);
///     (dx * dx + dy * dy).sqrt()
/// }).unwrap();
///
/// let mut route = vec![0, 2, 4, 1, 3];
/// let before = route_cost(&route, &m);
/// three_opt_improve(&mut route, &m);
/// assert!(route_cost(&route, &m) <= before);
/// ```
pub fn three_opt_improve(route: &mut [usize], distances: &DistanceMatrix) -> usize {
    three_opt_improve_bounded(route, distances, THREE_OPT_MAX_PASSES)
}

/// Like [`three_opt_improve`] with an explicit scan limit.
pub fn three_opt_improve_bounded(
    route: &mut [usize],
    distances: &DistanceMatrix,
    max_passes: usize,
) -> usize {
    let n = route.len();
    if n < 3 {
        return 0;
    }

    let mut moves = 0;
    for _ in 0..max_passes {
        if !apply_first_improvement(route, distances) {
            break;
        }
        moves += 1;
    }
    moves
}

/// Scans all triples and applies the first improving reconnection.
fn apply_first_improvement(route: &mut [usize], distances: &DistanceMatrix) -> bool {
    let n = route.len();
    for i in 0..n - 2 {
        for j in i + 1..n - 1 {
            for k in j + 1..n {
                for reconnection in RECONNECTIONS {
                    let delta = reconnection_delta(route, distances, i, j, k, reconnection);
                    if delta < -IMPROVEMENT_EPSILON {
                        apply(route, i, j, k, reconnection);
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Cost change of applying `reconnection` at cut positions `(i, j, k)`.
fn reconnection_delta(
    route: &[usize],
    distances: &DistanceMatrix,
    i: usize,
    j: usize,
    k: usize,
    reconnection: Reconnection,
) -> f64 {
    let n = route.len();
    let a = route[i];
    let b = route[i + 1];
    let c = route[j];
    let d = route[j + 1];
    let e = route[k];
    let f = route[(k + 1) % n];
    let dist = |x: usize, y: usize| distances.get(x, y);

    match reconnection {
        Reconnection::ReverseFirst => {
            dist(a, c) + dist(b, d) - dist(a, b) - dist(c, d)
                + reversal_delta(route, distances, i + 1, j)
        }
        Reconnection::ReverseSecond => {
            dist(c, e) + dist(d, f) - dist(c, d) - dist(e, f)
                + reversal_delta(route, distances, j + 1, k)
        }
        Reconnection::ReverseBoth => {
            dist(a, c) + dist(b, e) + dist(d, f) - dist(a, b) - dist(c, d) - dist(e, f)
                + reversal_delta(route, distances, i + 1, j)
                + reversal_delta(route, distances, j + 1, k)
        }
        Reconnection::ReverseSpan => {
            dist(a, e) + dist(b, f) - dist(a, b) - dist(e, f)
                + reversal_delta(route, distances, i + 1, k)
        }
    }
}

fn apply(route: &mut [usize], i: usize, j: usize, k: usize, reconnection: Reconnection) {
    match reconnection {
        Reconnection::ReverseFirst => route[i + 1..=j].reverse(),
        Reconnection::ReverseSecond => route[j + 1..=k].reverse(),
        Reconnection::ReverseBoth => {
            route[i + 1..=j].reverse();
            route[j + 1..=k].reverse();
        }
        Reconnection::ReverseSpan => route[i + 1..=k].reverse(),
    }
}
