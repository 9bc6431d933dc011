//! Genetic Algorithm for the TSP.
//!
//! Tours evolve by generational replacement: every generation, tournament
//! selection picks parent pairs, a permutation crossover recombines them,
//! swap mutation perturbs the child and an optional local search refines
//! it. The best tour ever seen is tracked outside the population.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, operators)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final result with statistics
//! - [`GenerationObserver`]: Per-generation progress callback
//!
//! # Submodules
//!
//! - [`operators`]: PMX, OX and edge-recombination crossover, swap mutation
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
pub mod operators;
mod runner;
pub mod selection;

pub use config::GaConfig;
pub use operators::Crossover;
pub use runner::{GaResult, GaRunner, GenerationObserver, GenerationReport};
