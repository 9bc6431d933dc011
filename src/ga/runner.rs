//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! local search → replacement → repeat.
//!
//! Replacement is generational: the whole population is rebuilt every
//! generation, and the best tour ever seen is tracked outside of it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, trace};

use super::config::GaConfig;
use super::operators::swap_mutation;
use super::selection::{best_index, tournament};
use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::random::{create_rng, stream_rng};
use crate::tour::Tour;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<'m> {
    /// The best tour found during the entire run.
    pub best: Tour<'m>,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on its wall-clock limit.
    pub timed_out: bool,

    /// Best-ever cost at each evaluated generation.
    pub cost_history: Vec<f64>,
}

/// Progress snapshot passed to a [`GenerationObserver`] once per generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: usize,
    /// Cost of the cheapest tour in the current population.
    pub current_best_cost: f64,
    /// Best-ever cost, including the current population.
    pub best_cost: f64,
    /// Whether the current population improved the best-ever tour.
    pub is_new_best: bool,
}

/// Receives per-generation progress. Cannot influence the run.
///
/// Any `FnMut(&GenerationReport)` closure is an observer.
pub trait GenerationObserver {
    /// Called after the population of a generation has been evaluated.
    fn on_generation(&mut self, report: &GenerationReport);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationReport),
{
    fn on_generation(&mut self, report: &GenerationReport) {
        self(report)
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tsp::{DistanceMatrix, GaConfig, GaRunner, LocalSearch};
///
/// let pts = [(0.0_f64, 0.0_f64), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
/// let m = DistanceMatrix::from_fn(4, |i, j| {
///     let (dx, dy) = (pts[i].0 - pts[j].0, pts[i].1 - pts[j].1);
///     (dx * dx + dy * dy).sqrt()
/// }).unwrap();
///
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_local_search(LocalSearch::TwoOpt)
///     .with_seed(42);
/// let result = GaRunner::run(&m, &config).unwrap();
/// assert!((result.best_cost - 4.0).abs() < 1e-10);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`](crate::TspError::InvalidConfig) if
    /// `config` fails [`GaConfig::validate`].
    pub fn run<'m>(distances: &'m DistanceMatrix, config: &GaConfig) -> Result<GaResult<'m>> {
        Self::run_observed(distances, config, &mut |_: &GenerationReport| {}, None)
    }

    /// Runs the GA, reporting every generation to `observer`.
    pub fn run_with_observer<'m, O>(
        distances: &'m DistanceMatrix,
        config: &GaConfig,
        observer: &mut O,
    ) -> Result<GaResult<'m>>
    where
        O: GenerationObserver + ?Sized,
    {
        Self::run_observed(distances, config, observer, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops at
    /// the next generation boundary and returns the best tour found so far.
    pub fn run_with_cancel<'m>(
        distances: &'m DistanceMatrix,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<'m>> {
        Self::run_observed(distances, config, &mut |_: &GenerationReport| {}, cancel)
    }

    /// Runs the GA with both an observer and a cancellation token.
    pub fn run_observed<'m, O>(
        distances: &'m DistanceMatrix,
        config: &GaConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<'m>>
    where
        O: GenerationObserver + ?Sized,
    {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let started = Instant::now();

        info!(
            event = "ga_start",
            cities = distances.len(),
            population_size = config.population_size,
            max_generations = config.max_generations,
            crossover = %config.crossover,
            local_search = %config.local_search,
            tournament_size = config.tournament_size,
            seed = seed,
        );

        let mut population: Vec<Tour<'m>> = (0..config.population_size)
            .map(|_| Tour::random(distances, &mut rng))
            .collect();

        let mut best: Option<Tour<'m>> = None;
        let mut cost_history = Vec::with_capacity(config.max_generations);
        let mut generations = 0;
        let mut cancelled = false;
        let mut timed_out = false;

        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    timed_out = true;
                    break;
                }
            }

            let current = &population[best_index(&population)];
            let current_best_cost = current.cost();
            let is_new_best = best
                .as_ref()
                .map_or(true, |b| current_best_cost < b.cost());
            if is_new_best {
                trace!(
                    event = "new_best",
                    generation = gen,
                    cost = current_best_cost,
                );
                best = Some(current.clone());
            }
            let best_cost = best.as_ref().map_or(current_best_cost, Tour::cost);
            cost_history.push(best_cost);

            observer.on_generation(&GenerationReport {
                generation: gen,
                current_best_cost,
                best_cost,
                is_new_best,
            });
            debug!(
                event = "generation",
                generation = gen,
                current_best = current_best_cost,
                best = best_cost,
                new_best = is_new_best,
            );

            let gen_seed: u64 = rng.random();
            population = breed(&population, distances, config, gen_seed);
            generations = gen + 1;
        }

        // The last offspring were never evaluated inside the loop.
        let final_best = &population[best_index(&population)];
        let best = match best {
            Some(b) if b.cost() <= final_best.cost() => b,
            _ => final_best.clone(),
        };

        info!(
            event = "ga_end",
            generations = generations,
            duration_ms = started.elapsed().as_millis() as u64,
            best_cost = best.cost(),
            cancelled = cancelled,
            timed_out = timed_out,
        );

        Ok(GaResult {
            best_cost: best.cost(),
            best,
            generations,
            cancelled,
            timed_out,
            cost_history,
        })
    }
}

/// Builds the next population from a snapshot of the current one.
#[cfg(feature = "parallel")]
fn breed<'m>(
    population: &[Tour<'m>],
    distances: &'m DistanceMatrix,
    config: &GaConfig,
    gen_seed: u64,
) -> Vec<Tour<'m>> {
    use rayon::prelude::*;

    if config.parallel {
        (0..config.population_size)
            .into_par_iter()
            .map(|idx| make_offspring(population, distances, config, gen_seed, idx))
            .collect()
    } else {
        breed_sequential(population, distances, config, gen_seed)
    }
}

#[cfg(not(feature = "parallel"))]
fn breed<'m>(
    population: &[Tour<'m>],
    distances: &'m DistanceMatrix,
    config: &GaConfig,
    gen_seed: u64,
) -> Vec<Tour<'m>> {
    breed_sequential(population, distances, config, gen_seed)
}

fn breed_sequential<'m>(
    population: &[Tour<'m>],
    distances: &'m DistanceMatrix,
    config: &GaConfig,
    gen_seed: u64,
) -> Vec<Tour<'m>> {
    (0..config.population_size)
        .map(|idx| make_offspring(population, distances, config, gen_seed, idx))
        .collect()
}

/// Offspring `idx` of a generation. Draws only from its own stream.
fn make_offspring<'m>(
    population: &[Tour<'m>],
    distances: &'m DistanceMatrix,
    config: &GaConfig,
    gen_seed: u64,
    idx: usize,
) -> Tour<'m> {
    let mut rng = stream_rng(gen_seed, idx as u64);

    let parent1 = &population[tournament(population, config.tournament_size, &mut rng)];
    let parent2 = &population[tournament(population, config.tournament_size, &mut rng)];

    let mut route = if rng.random_range(0.0..1.0) < config.crossover_rate {
        config
            .crossover
            .recombine(parent1.route(), parent2.route(), &mut rng)
    } else {
        parent1.route().to_vec()
    };

    if rng.random_range(0.0..1.0) < config.mutation_rate {
        swap_mutation(&mut route, &mut rng);
    }

    config.local_search.improve(&mut route, distances);
    Tour::from_route(route, distances)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::ga::Crossover;
    use crate::local_search::LocalSearch;
    use crate::tour::{is_permutation, route_cost};

    fn euclidean(pts: &[(f64, f64)]) -> DistanceMatrix {
        DistanceMatrix::from_fn(pts.len(), |i, j| {
            let (dx, dy) = (pts[i].0 - pts[j].0, pts[i].1 - pts[j].1);
            (dx * dx + dy * dy).sqrt()
        })
        .unwrap()
    }

    fn circle(n: usize) -> DistanceMatrix {
        let pts: Vec<(f64, f64)> = (0..n)
            .map(|k| {
                let a = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
                (10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect();
        euclidean(&pts)
    }

    fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
        let mut rng = create_rng(seed);
        let pts: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        euclidean(&pts)
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_two_opt_solves_circle() {
        let n = 20;
        let m = circle(n);
        let optimal = route_cost(&(0..n).collect::<Vec<_>>(), &m);
        let config = small_config().with_local_search(LocalSearch::TwoOpt);

        let result = GaRunner::run(&m, &config).unwrap();

        assert!(
            (result.best_cost - optimal).abs() < 1e-9,
            "expected {optimal}, got {}",
            result.best_cost
        );
    }

    #[test]
    fn test_every_crossover_improves_on_start() {
        let m = random_instance(15, 3);
        for crossover in [Crossover::Pmx, Crossover::Ox, Crossover::Edge] {
            let config = small_config()
                .with_crossover(crossover)
                .with_mutation_rate(0.2);
            let result = GaRunner::run(&m, &config).unwrap();

            assert!(is_permutation(result.best.route(), 15));
            assert!(result.best_cost <= result.cost_history[0]);
            assert!((result.best_cost - route_cost(result.best.route(), &m)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_history_is_monotone() {
        let m = random_instance(12, 9);
        let config = small_config().with_crossover(Crossover::Ox);
        let result = GaRunner::run(&m, &config).unwrap();

        assert_eq!(result.generations, 40);
        assert_eq!(result.cost_history.len(), 40);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best-ever cost went up: {} > {}",
                window[1],
                window[0]
            );
        }
        assert!(result.best_cost <= *result.cost_history.last().unwrap());
    }

    #[test]
    fn test_same_seed_same_result() {
        let m = random_instance(14, 5);
        let config = small_config().with_crossover(Crossover::Edge);

        let a = GaRunner::run(&m, &config).unwrap();
        let b = GaRunner::run(&m, &config).unwrap();

        assert_eq!(a.best.route(), b.best.route());
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let m = random_instance(16, 21);
        let config = small_config().with_local_search(LocalSearch::TwoOpt);

        let sequential = GaRunner::run(&m, &config).unwrap();
        let parallel = GaRunner::run(&m, &config.clone().with_parallel(true)).unwrap();

        assert_eq!(sequential.best.route(), parallel.best.route());
        assert_eq!(sequential.cost_history, parallel.cost_history);
    }

    #[test]
    fn test_no_crossover_offspring_copy_a_parent() {
        let m = random_instance(10, 4);
        let config = small_config()
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut rng = create_rng(1);
        let population: Vec<Tour<'_>> = (0..config.population_size)
            .map(|_| Tour::random(&m, &mut rng))
            .collect();

        let offspring = breed(&population, &m, &config, 77);

        assert_eq!(offspring.len(), population.len());
        for child in &offspring {
            assert!(
                population.iter().any(|p| p.route() == child.route()),
                "offspring {:?} matches no parent",
                child.route()
            );
        }
    }

    #[test]
    fn test_no_mutation_offspring_equal_crossover_output() {
        let m = random_instance(10, 8);
        let config = small_config()
            .with_crossover(Crossover::Pmx)
            .with_crossover_rate(1.0)
            .with_mutation_rate(0.0);
        let mut rng = create_rng(2);
        let population: Vec<Tour<'_>> = (0..config.population_size)
            .map(|_| Tour::random(&m, &mut rng))
            .collect();

        let gen_seed = 99;
        let offspring = breed(&population, &m, &config, gen_seed);

        for (idx, child) in offspring.iter().enumerate() {
            let mut replay = stream_rng(gen_seed, idx as u64);
            let p1 = tournament(&population, config.tournament_size, &mut replay);
            let p2 = tournament(&population, config.tournament_size, &mut replay);
            let _: f64 = replay.random_range(0.0..1.0);
            let expected = config.crossover.recombine(
                population[p1].route(),
                population[p2].route(),
                &mut replay,
            );
            assert_eq!(child.route(), expected.as_slice());
        }
    }

    #[test]
    fn test_observer_reports_each_generation() {
        let m = random_instance(12, 13);
        let config = small_config().with_max_generations(25);
        let mut reports = Vec::new();

        let result =
            GaRunner::run_with_observer(&m, &config, &mut |r: &GenerationReport| reports.push(*r))
                .unwrap();

        assert_eq!(reports.len(), 25);
        assert!(reports[0].is_new_best);
        assert_eq!(reports[0].current_best_cost, reports[0].best_cost);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.generation, i);
            assert!(report.best_cost <= report.current_best_cost);
            assert_eq!(report.best_cost, result.cost_history[i]);
        }
        for pair in reports.windows(2) {
            assert_eq!(
                pair[1].is_new_best,
                pair[1].current_best_cost < pair[0].best_cost
            );
        }
    }

    #[test]
    fn test_preset_cancellation() {
        let m = random_instance(10, 1);
        let cancel = Arc::new(AtomicBool::new(true));

        let result = GaRunner::run_with_cancel(&m, &small_config(), Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert!(result.cost_history.is_empty());
        assert!(is_permutation(result.best.route(), 10));
    }

    #[test]
    fn test_cancellation_from_observer() {
        let m = random_instance(10, 2);
        let config = small_config().with_max_generations(10_000);
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();

        let mut observer = |r: &GenerationReport| {
            if r.generation == 3 {
                flag.store(true, Ordering::Relaxed);
            }
        };
        let result = GaRunner::run_observed(&m, &config, &mut observer, Some(cancel)).unwrap();

        assert!(result.cancelled, "expected cancelled result");
        assert_eq!(result.generations, 4);
        assert_eq!(result.cost_history.len(), 4);
    }

    #[test]
    fn test_cancellation_from_thread() {
        let m = random_instance(30, 6);
        let config = small_config().with_max_generations(10_000_000);
        let cancel = Arc::new(AtomicBool::new(false));

        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = GaRunner::run_with_cancel(&m, &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert!(result.generations < 10_000_000, "should have stopped early");
    }

    #[test]
    fn test_time_limit() {
        let m = random_instance(30, 7);
        let config = small_config()
            .with_max_generations(10_000_000)
            .with_time_limit_ms(5);

        let result = GaRunner::run(&m, &config).unwrap();

        assert!(result.timed_out);
        assert!(!result.cancelled);
        assert!(result.generations < 10_000_000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let m = random_instance(5, 1);
        let config = GaConfig::default().with_tournament_size(0);
        assert!(matches!(
            GaRunner::run(&m, &config),
            Err(TspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_tiny_instances() {
        for n in 1..=3 {
            let m = random_instance(n, n as u64);
            for crossover in [Crossover::Pmx, Crossover::Ox, Crossover::Edge] {
                for local_search in [LocalSearch::None, LocalSearch::TwoOpt, LocalSearch::ThreeOpt] {
                    let config = GaConfig::default()
                        .with_population_size(4)
                        .with_max_generations(3)
                        .with_crossover(crossover)
                        .with_local_search(local_search)
                        .with_seed(1);
                    let result = GaRunner::run(&m, &config).unwrap();
                    assert_eq!(result.best.len(), n);
                    assert!(is_permutation(result.best.route(), n));
                }
            }
        }
    }

    #[test]
    fn test_full_tournament_single_parent() {
        // Tournament covering the population always picks its best tour, so
        // with no crossover or mutation every offspring copies it.
        let m = random_instance(9, 12);
        let config = small_config()
            .with_population_size(6)
            .with_tournament_size(6)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut rng = create_rng(3);
        let population: Vec<Tour<'_>> = (0..6).map(|_| Tour::random(&m, &mut rng)).collect();
        let best = &population[best_index(&population)];

        for child in breed(&population, &m, &config, 5) {
            assert_eq!(child.route(), best.route());
        }
    }
}
