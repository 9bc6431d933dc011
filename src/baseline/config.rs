//! 2-opt solver configuration.

/// Configuration for [`TwoOptRunner`](super::TwoOptRunner).
///
/// ```
/// use u_tsp::TwoOptConfig;
///
/// let config = TwoOptConfig::default().with_seed(7);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TwoOptConfig {
    /// Seed for the random starting tour. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl TwoOptConfig {
    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
