//! Configuration options for the MCTS algorithm
//!
//! This module defines the configuration parameters that control the
//! behavior of the MCTS algorithm.

use std::time::Duration;

use crate::{MCTSError, Result};

/// Criteria for selecting the best child after search is complete
///
/// This determines how the final action is selected after the search budget is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the highest average score
    ///
    /// This is UCB1 with the exploration term switched off. Children with the same average
    /// are chosen between at random.
    HighestValue,

    /// Select the child with the most visits
    ///
    /// More conservative: it trusts the statistical confidence the search built up rather
    /// than a possibly noisy average.
    MostVisits,
}

/// Configuration for the MCTS algorithm
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use mcts_arena::{MCTSConfig, config::BestChildCriteria};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.4)
///     .with_max_iterations(2_000)
///     .with_max_time(Duration::from_secs(1))
///     .with_best_child_criteria(BestChildCriteria::HighestValue)
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant for UCB1
    ///
    /// Higher values favor exploration of less-visited nodes.
    /// The reference value is 1.4, close to sqrt(2).
    pub exploration_constant: f64,

    /// Simulation budget: number of full select/expand/simulate/backpropagate cycles
    pub max_iterations: usize,

    /// Maximum time to run the search
    ///
    /// If set, the search stops between simulations once this much time has passed, even if
    /// the simulation budget is not spent.
    pub max_time: Option<Duration>,

    /// Criteria for selecting the best child after search
    pub best_child_criteria: BestChildCriteria,

    /// Seed for the search's random source
    ///
    /// `None` seeds from the operating system, making every search different.
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: 1.4,
            max_iterations: 1_000,
            max_time: None,
            best_child_criteria: BestChildCriteria::HighestValue,
            seed: None,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the simulation budget
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the maximum time to run the search
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Sets the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration can drive a search
    ///
    /// # Errors
    ///
    /// [`MCTSError::InvalidConfiguration`] if the exploration constant is negative, NaN or
    /// infinite.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
