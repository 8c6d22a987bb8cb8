//! Simulation policies for the MCTS algorithm
//!
//! Simulation policies play a game out from a given state to estimate the value of that
//! state for the searching player.

use rand::RngCore;

use crate::game_state::{GameOutcome, GameState};
use crate::Result;

/// Trait for policies that simulate games
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Plays out a game from `state` and returns the result for `perspective`
    ///
    /// `state` belongs to the search tree and must not be modified; policies work on copies.
    fn simulate(
        &self,
        state: &S,
        perspective: &S::Player,
        rng: &mut dyn RngCore,
    ) -> Result<GameOutcome>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>>;
}

/// Random simulation policy
///
/// This policy plays random legal moves until the game ends, through
/// [`GameState::simulate_random_playout`].
#[derive(Debug, Clone)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn simulate(
        &self,
        state: &S,
        perspective: &S::Player,
        rng: &mut dyn RngCore,
    ) -> Result<GameOutcome> {
        state.simulate_random_playout(perspective, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn simulate(
        &self,
        state: &S,
        perspective: &S::Player,
        rng: &mut dyn RngCore,
    ) -> Result<GameOutcome> {
        (**self).simulate(state, perspective, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        (**self).clone_box()
    }
}
