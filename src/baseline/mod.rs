//! Standalone 2-opt solver.
//!
//! A baseline for the genetic solver: one uniformly random starting tour,
//! improved by 2-opt descent until no improving move remains.
//!
//! # References
//!
//! - Croes, G.A. (1958), "A method for solving traveling salesman problems"

mod config;
mod runner;

pub use config::TwoOptConfig;
pub use runner::{TwoOptResult, TwoOptRunner};
