//! Genetic and local-search solvers for the Traveling Salesman Problem.
//!
//! Given an n x n [`DistanceMatrix`], the crate searches for a low-cost
//! closed [`Tour`] visiting every city exactly once:
//!
//! - **Genetic Algorithm** ([`ga`]): tournament selection, PMX / OX / edge
//!   recombination crossover, swap mutation, generational replacement,
//!   optional local-search refinement of every offspring.
//! - **Local search** ([`local_search`]): 2-opt descent and
//!   first-improvement 3-opt on a route slice.
//! - **2-opt baseline** ([`baseline`]): a random tour improved by 2-opt.
//!
//! # Example
//!
//! ```
//! use u_tsp::{Crossover, DistanceMatrix, GaConfig, GaRunner, LocalSearch};
//!
//! let pts = [(0.0_f64, 0.0_f64), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0), (2.0, 5.0)];
//! let m = DistanceMatrix::from_fn(pts.len(), |i, j| {
//!     let (dx, dy) = (pts[i].0 - pts[j].0, pts[i].1 - pts[j].1);
//!     (dx * dx + dy * dy).sqrt()
//! })?;
//!
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(50)
//!     .with_crossover("EX".parse::<Crossover>()?)
//!     .with_local_search(LocalSearch::TwoOpt)
//!     .with_seed(42);
//!
//! let result = GaRunner::run(&m, &config)?;
//! println!("{}", result.best);
//! # Ok::<(), u_tsp::TspError>(())
//! ```
//!
//! # Architecture
//!
//! The crate consumes an already-built distance matrix and returns tours.
//! Instance parsing, coordinate-to-distance conversion and user interaction
//! belong to callers. Progress is reported through [`GenerationObserver`]
//! and `tracing` events; the library installs no subscriber.

pub mod baseline;
pub mod error;
pub mod ga;
pub mod local_search;
pub mod matrix;
pub mod random;
pub mod tour;

pub use baseline::{TwoOptConfig, TwoOptResult, TwoOptRunner};
pub use error::{Result, TspError};
pub use ga::{Crossover, GaConfig, GaResult, GaRunner, GenerationObserver, GenerationReport};
pub use local_search::LocalSearch;
pub use matrix::DistanceMatrix;
pub use tour::Tour;
