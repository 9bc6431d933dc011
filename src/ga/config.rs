//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::Crossover;
use crate::error::{Result, TspError};
use crate::local_search::LocalSearch;

/// Configuration for the genetic TSP solver.
///
/// Controls population size, operator choice and rates, tournament
/// pressure, termination, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_tsp::{Crossover, GaConfig, LocalSearch};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// assert_eq!(config.crossover, Crossover::Pmx);
/// assert_eq!(config.local_search, LocalSearch::None);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::{Crossover, GaConfig, LocalSearch};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_crossover(Crossover::Edge)
///     .with_local_search(LocalSearch::TwoOpt)
///     .with_tournament_size(3)
///     .with_mutation_rate(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of tours in the population.
    ///
    /// Constant across generations.
    pub population_size: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Probability of applying swap mutation to an offspring (0.0 to 1.0).
    pub mutation_rate: f64,

    /// Probability of recombining a pair of parents (0.0 to 1.0).
    ///
    /// When crossover is not applied the offspring is a copy of the first
    /// parent.
    pub crossover_rate: f64,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Refinement applied to every offspring.
    pub local_search: LocalSearch,

    /// Number of tours sampled per tournament.
    ///
    /// Higher values mean stronger selection pressure. A size at least as
    /// large as the population always selects the population's best tour.
    pub tournament_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to build offspring in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results do not depend
    /// on this flag.
    pub parallel: bool,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// The check happens at the start of each generation, so the actual
    /// runtime may exceed this limit by one generation's worth of work.
    ///
    /// `None` disables time-based termination (the default).
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            mutation_rate: 0.05,
            crossover_rate: 0.9,
            crossover: Crossover::default(),
            local_search: LocalSearch::default(),
            tournament_size: 5,
            seed: None,
            parallel: true,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    ///
    /// Out-of-range values are kept as given and rejected by
    /// [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the recombination operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the local-search refinement.
    pub fn with_local_search(mut self, local_search: LocalSearch) -> Self {
        self.local_search = local_search;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel offspring construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TspError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(TspError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(TspError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        if self.time_limit_ms == Some(0) {
            return Err(TspError::InvalidConfig(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(TspError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {rate}"
        )))
    }
}
