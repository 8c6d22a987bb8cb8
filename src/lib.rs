//! # mcts-arena
//!
//! A Monte Carlo Tree Search (MCTS) engine for perfect-information, zero-sum turn games.
//!
//! The engine grows a search tree one node per simulation, plays random rollouts to the end
//! of the game and accumulates the outcomes, then picks the root move with the best expected
//! value. Game rules are supplied by the caller through the [`GameState`] trait; a
//! tic-tac-toe implementation ships in [`games::tic_tac_toe`].
//!
//! ## Basic Usage
//!
//! ```
//! use mcts_arena::games::tic_tac_toe::{Mark, TicTacToe};
//! use mcts_arena::{choose_move, GameState};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! fn main() -> Result<(), mcts_arena::MCTSError> {
//!     let game = TicTacToe::new();
//!     let mut rng = StdRng::seed_from_u64(7);
//!
//!     // X is to move; search 500 rollouts on X's behalf
//!     let cell = choose_move(&game, &Mark::X, 500, &mut rng)?;
//!     assert!(game.get_legal_actions().contains(&cell));
//!     Ok(())
//! }
//! ```
//!
//! ## Configured Search
//!
//! ```
//! use mcts_arena::games::tic_tac_toe::{Mark, TicTacToe};
//! use mcts_arena::{config::BestChildCriteria, MCTSConfig, MCTS};
//!
//! fn main() -> Result<(), mcts_arena::MCTSError> {
//!     let config = MCTSConfig::default()
//!         .with_exploration_constant(1.4)
//!         .with_max_iterations(200)
//!         .with_best_child_criteria(BestChildCriteria::HighestValue)
//!         .with_seed(42);
//!
//!     let mut mcts = MCTS::new(TicTacToe::new(), Mark::X, config);
//!     let cell = mcts.search()?;
//!
//!     println!("best cell: {:?}", cell);
//!     println!("{}", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Every simulation runs the four MCTS phases:
//!
//! 1. **Selection**: walk down from the root while the current node is non-terminal and every
//!    legal move already has a child, following the UCB1 best child.
//! 2. **Expansion**: add one child for a uniformly random untried move.
//! 3. **Simulation**: play uniformly random moves from a copy of that child's state until the
//!    game ends, scoring +1 / 0 / -1 for the searching player.
//! 4. **Backpropagation**: add the score to every node on the path back to the root.
//!
//! Scores are always kept from the searching player's point of view; they are not negated at
//! alternate plies.

pub mod config;
pub mod game_state;
pub mod games;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use config::MCTSConfig;
pub use game_state::{Action, GameOutcome, GameState, Player};
pub use mcts::{choose_move, ChildStats, MCTS};
pub use policy::{BackpropagationPolicy, ExpansionPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{MCTSNode, NodeId, SearchTree};

/// Error types for the MCTS engine and the game-state contract
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MCTSError {
    /// A move was applied that is not legal in the given state
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// A result was requested for a state that is not terminal
    #[error("Result requested for a non-terminal state")]
    NotTerminal,

    /// No legal actions are available from the root state
    #[error("No legal moves available from current state")]
    NoLegalMoves,

    /// The root has no children to choose a move from
    #[error("Root node has no children to choose from")]
    NoChildren,

    /// The search tree was asked to hold an inconsistent child
    #[error("Invalid move for tree expansion: {0}")]
    InvalidMove(String),

    /// A child was scored before any simulation reached it
    #[error("Child node evaluated before being visited")]
    UnvisitedChild,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
