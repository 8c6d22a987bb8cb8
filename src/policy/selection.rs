//! Selection policies for the MCTS algorithm
//!
//! Selection policies pick which child to descend into during the selection phase,
//! balancing exploration and exploitation. The same policy with its exploration weight set
//! to zero makes the final move choice.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::{
    game_state::GameState,
    tree::{NodeId, SearchTree},
    utils, MCTSError, Result,
};

/// Trait for policies that select a child to explore
pub trait SelectionPolicy<S: GameState>: Send + Sync {
    /// Selects one of the children of `node`
    ///
    /// # Errors
    ///
    /// [`MCTSError::NoChildren`] if `node` has no children, or an error from scoring a child.
    fn select_child(
        &self,
        tree: &SearchTree<S>,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Result<NodeId>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>>;
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// Scores each child with
///
/// ```text
/// UCB1 = total_score / child_visits + exploration_constant * sqrt(ln(parent_visits) / child_visits)
/// ```
///
/// and picks the highest. Children that tie exactly are chosen between uniformly at random,
/// so repeated searches do not systematically favour whichever child was expanded first.
///
/// The reference exploration constant is 1.4, close to sqrt(2). An exploration constant of
/// zero gives pure exploitation.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Weight of the exploration term
    pub exploration_constant: f64,
}

impl UCB1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }

    /// A policy that ranks children by average score alone
    pub fn greedy() -> Self {
        Self::new(0.0)
    }

    /// Calculates the UCB1 value for a child
    pub fn ucb1_value(&self, total_score: i64, child_visits: u64, parent_visits: u64) -> Result<f64> {
        utils::ucb1_value(
            total_score,
            child_visits,
            parent_visits,
            self.exploration_constant,
        )
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(1.4)
    }
}

impl<S: GameState> SelectionPolicy<S> for UCB1Policy {
    fn select_child(
        &self,
        tree: &SearchTree<S>,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Result<NodeId> {
        let parent_visits = tree.get(node).visits();
        let mut best_value = f64::NEG_INFINITY;
        let mut best_children = Vec::new();

        for (child_id, child) in tree.children(node) {
            let value = self.ucb1_value(child.total_score(), child.visits(), parent_visits)?;

            if value > best_value {
                best_value = value;
                best_children.clear();
                best_children.push(child_id);
            } else if value == best_value {
                best_children.push(child_id);
            }
        }

        best_children
            .choose(rng)
            .copied()
            .ok_or(MCTSError::NoChildren)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

/// Most-visited selection
///
/// Picks the child with the highest visit count, ties broken uniformly at random. Only
/// meaningful as a final move choice; it never explores.
#[derive(Debug, Clone, Default)]
pub struct MostVisitsPolicy;

impl MostVisitsPolicy {
    /// Creates a new most-visited policy
    pub fn new() -> Self {
        MostVisitsPolicy
    }
}

impl<S: GameState> SelectionPolicy<S> for MostVisitsPolicy {
    fn select_child(
        &self,
        tree: &SearchTree<S>,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Result<NodeId> {
        let most_visits = tree
            .children(node)
            .map(|(_, child)| child.visits())
            .max()
            .ok_or(MCTSError::NoChildren)?;

        let best_children: Vec<NodeId> = tree
            .children(node)
            .filter(|(_, child)| child.visits() == most_visits)
            .map(|(id, _)| id)
            .collect();

        best_children
            .choose(rng)
            .copied()
            .ok_or(MCTSError::NoChildren)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl<S: GameState> SelectionPolicy<S> for Box<dyn SelectionPolicy<S>> {
    fn select_child(
        &self,
        tree: &SearchTree<S>,
        node: NodeId,
        rng: &mut dyn RngCore,
    ) -> Result<NodeId> {
        (**self).select_child(tree, node, rng)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        (**self).clone_box()
    }
}
