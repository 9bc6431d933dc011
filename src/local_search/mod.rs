//! Local-search refinement for tours.
//!
//! Two neighborhood descents operate on a mutable route slice:
//!
//! - [`two_opt_improve`]: remove two edges, reconnect by reversing the
//!   segment between them. Runs full passes until a local optimum.
//! - [`three_opt_improve`]: remove three edges, try four segment-reversal
//!   reconnections, first improvement wins. Capped at
//!   [`THREE_OPT_MAX_PASSES`] scans.
//!
//! Both guarantee the refined route never costs more than the input.
//! [`LocalSearch`] selects one of them (or none) for the genetic runner.
//!
//! # References
//!
//! - Croes, G.A. (1958). "A method for solving traveling salesman problems",
//!   *Operations Research* 6(6), 791-812.
//! - Lin, S. (1965). "Computer Solutions of the Traveling Salesman Problem",
//!   *Bell System Technical Journal* 44(10), 2245-2269.

mod three_opt;
mod two_opt;

pub use three_opt::{three_opt_improve, three_opt_improve_bounded, THREE_OPT_MAX_PASSES};
pub use two_opt::two_opt_improve;

use std::fmt;
use std::str::FromStr;

use crate::error::TspError;
use crate::matrix::DistanceMatrix;
use crate::tour::Tour;

/// Moves must gain more than this to be applied.
///
/// Keeps rounding noise from producing zero-gain moves that cycle forever.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Refinement applied to each offspring in the genetic loop.
///
/// ```
/// use u_tsp::LocalSearch;
///
/// let ls: LocalSearch = "3opt".parse().unwrap();
/// assert_eq!(ls, LocalSearch::ThreeOpt);
/// assert!("lk".parse::<LocalSearch>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSearch {
    /// Offspring are kept as produced by crossover and mutation.
    #[default]
    None,
    /// 2-opt descent to a local optimum.
    TwoOpt,
    /// First-improvement 3-opt, at most [`THREE_OPT_MAX_PASSES`] scans.
    ThreeOpt,
}

impl LocalSearch {
    /// Refines `route` in place, returning the number of improving moves.
    pub fn improve(&self, route: &mut [usize], distances: &DistanceMatrix) -> usize {
        match self {
            LocalSearch::None => 0,
            LocalSearch::TwoOpt => two_opt_improve(route, distances),
            LocalSearch::ThreeOpt => three_opt_improve(route, distances),
        }
    }

    /// Returns a refined copy of `tour`.
    ///
    /// The result never costs more than `tour`.
    pub fn refine<'m>(&self, tour: &Tour<'m>) -> Tour<'m> {
        if *self == LocalSearch::None {
            return tour.clone();
        }
        let mut route = tour.route().to_vec();
        self.improve(&mut route, tour.distances());
        Tour::from_route(route, tour.distances())
    }
}

impl FromStr for LocalSearch {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(LocalSearch::None),
            "2OPT" | "2-OPT" | "OPT2" => Ok(LocalSearch::TwoOpt),
            "3OPT" | "3-OPT" | "OPT3" => Ok(LocalSearch::ThreeOpt),
            _ => Err(TspError::UnknownLocalSearch(s.to_string())),
        }
    }
}

impl fmt::Display for LocalSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocalSearch::None => "NONE",
            LocalSearch::TwoOpt => "2OPT",
            LocalSearch::ThreeOpt => "3OPT",
        })
    }
}

/// Cost change of the inner edges of `route[from..=to]` when the segment
/// is reversed.
///
/// Zero on symmetric matrices, where an edge costs the same both ways.
pub(crate) fn reversal_delta(
    route: &[usize],
    distances: &DistanceMatrix,
    from: usize,
    to: usize,
) -> f64 {
    if distances.is_symmetric() || to <= from {
        return 0.0;
    }
    (from..to)
        .map(|t| distances.get(route[t + 1], route[t]) - distances.get(route[t], route[t + 1]))
        .sum()
}
