//! Random start plus 2-opt descent.

use std::time::Instant;

use tracing::info;

use super::config::TwoOptConfig;
use crate::local_search::two_opt_improve;
use crate::matrix::DistanceMatrix;
use crate::random::create_rng;
use crate::tour::Tour;

/// Result of a 2-opt run.
#[derive(Debug, Clone)]
pub struct TwoOptResult<'m> {
    /// The 2-optimal tour.
    pub best: Tour<'m>,

    /// Cost of the random starting tour.
    pub initial_cost: f64,

    /// Number of improving moves applied.
    pub improvements: usize,
}

/// Executes the standalone 2-opt solver.
///
/// ```
/// use u_tsp::{DistanceMatrix, TwoOptConfig, TwoOptRunner};
///
/// let m = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0, 1.0],
///     vec![1.0, 0.0, 1.0, 2.0],
///     vec![2.0, 1.0, 0.0, 1.0],
///     vec![1.0, 2.0, 1.0, 0.0],
/// ]).unwrap();
///
/// let result = TwoOptRunner::run(&m, &TwoOptConfig::default().with_seed(1));
/// assert_eq!(result.best.cost(), 4.0);
/// assert!(result.best.cost() <= result.initial_cost);
/// ```
pub struct TwoOptRunner;

impl TwoOptRunner {
    /// Builds a random tour and runs 2-opt on it to a local optimum.
    pub fn run<'m>(distances: &'m DistanceMatrix, config: &TwoOptConfig) -> TwoOptResult<'m> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let started = Instant::now();

        let start = Tour::random(distances, &mut rng);
        let initial_cost = start.cost();
        info!(
            event = "two_opt_start",
            cities = distances.len(),
            seed = seed,
            initial_cost = initial_cost,
        );

        let mut route = start.into_route();
        let improvements = two_opt_improve(&mut route, distances);
        let best = Tour::from_route(route, distances);

        info!(
            event = "two_opt_end",
            duration_ms = started.elapsed().as_millis() as u64,
            improvements = improvements,
            best_cost = best.cost(),
        );

        TwoOptResult {
            best,
            initial_cost,
            improvements,
        }
    }
}
