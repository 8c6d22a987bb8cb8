//! Expansion policies determine which untried action to choose
//! when expanding a node.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::{game_state::GameState, MCTSError, Result};

/// Trait for policies that select which action to expand
pub trait ExpansionPolicy<S: GameState>: Send + Sync {
    /// Selects an action from `untried`, the legal actions that have no child yet.
    ///
    /// # Errors
    ///
    /// [`MCTSError::InvalidMove`] if `untried` is empty; the engine only expands nodes that
    /// still have untried actions.
    fn select_action(&self, untried: &[S::Action], rng: &mut dyn RngCore) -> Result<S::Action>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>>;
}

/// Random expansion policy
///
/// Selects an untried action uniformly at random rather than in move order, so that
/// repeated searches over equally good moves diversify.
#[derive(Debug, Clone)]
pub struct RandomExpansionPolicy;

impl RandomExpansionPolicy {
    /// Creates a new random expansion policy
    pub fn new() -> Self {
        RandomExpansionPolicy
    }
}

impl Default for RandomExpansionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> ExpansionPolicy<S> for RandomExpansionPolicy {
    fn select_action(&self, untried: &[S::Action], rng: &mut dyn RngCore) -> Result<S::Action> {
        untried
            .choose(rng)
            .cloned()
            .ok_or_else(|| MCTSError::InvalidMove("no untried actions to expand".to_string()))
    }

    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement ExpansionPolicy for Box<dyn ExpansionPolicy>
impl<S: GameState> ExpansionPolicy<S> for Box<dyn ExpansionPolicy<S>> {
    fn select_action(&self, untried: &[S::Action], rng: &mut dyn RngCore) -> Result<S::Action> {
        (**self).select_action(untried, rng)
    }

    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>> {
        (**self).clone_box()
    }
}
