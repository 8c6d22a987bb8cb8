//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how to update node statistics
//! after a simulation.

use crate::{
    game_state::{GameOutcome, GameState},
    tree::MCTSNode,
};

/// Trait for policies that backpropagate simulation results
///
/// The engine calls `update_stats` once for every node on the path from the simulated node
/// up to and including the root.
pub trait BackpropagationPolicy<S: GameState>: Send + Sync {
    /// Updates statistics for a node based on a simulation result
    fn update_stats(&self, node: &mut MCTSNode<S>, outcome: GameOutcome);

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>>;
}

/// Standard backpropagation policy
///
/// Increments the visit count and adds the outcome to the total score. The outcome is
/// always the searching player's, so every ancestor receives the same value regardless of
/// whose turn it was at that node.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> BackpropagationPolicy<S> for StandardPolicy {
    fn update_stats(&self, node: &mut MCTSNode<S>, outcome: GameOutcome) {
        node.record(outcome);
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl<S: GameState> BackpropagationPolicy<S> for Box<dyn BackpropagationPolicy<S>> {
    fn update_stats(&self, node: &mut MCTSNode<S>, outcome: GameOutcome) {
        (**self).update_stats(node, outcome)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<S>> {
        (**self).clone_box()
    }
}
