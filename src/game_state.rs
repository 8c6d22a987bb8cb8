//! Traits defining the game-state contract the search runs against.
//!
//! The GameState trait is the only interface a game must implement to be searched.
//! The engine never looks inside a state: it enumerates moves, applies them to produce
//! new states, asks whether the game is over and, at the end of a rollout, asks who won.

use std::fmt::Debug;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{MCTSError, Result};

/// Trait for actions (moves) that can be taken in a game
///
/// Actions are opaque to the engine beyond equality and hashing.
pub trait Action: Clone + Debug + PartialEq + Eq + Hash + Send + Sync {
    /// Returns a unique identifier for this action
    fn id(&self) -> usize;
}

/// Trait for players in a game
pub trait Player: Clone + Debug + PartialEq + Eq + Hash + Send + Sync {}

/// Outcome of a finished game from one player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// The player won
    Win,
    /// Neither side won
    Draw,
    /// The opponent won
    Loss,
}

impl GameOutcome {
    /// Signed score of the outcome: +1, 0 or -1
    pub fn value(self) -> i64 {
        match self {
            GameOutcome::Win => 1,
            GameOutcome::Draw => 0,
            GameOutcome::Loss => -1,
        }
    }

    /// The same result seen from the other side of the board
    pub fn flipped(self) -> Self {
        match self {
            GameOutcome::Win => GameOutcome::Loss,
            GameOutcome::Draw => GameOutcome::Draw,
            GameOutcome::Loss => GameOutcome::Win,
        }
    }
}

/// Trait defining the game state interface required for MCTS
///
/// Implementations must behave as value types: `apply_action` takes `&self` and returns a new
/// state, and clones are fully independent of each other. The search stores one state per tree
/// node and plays rollouts on separate copies, so a state that shares mutable data between
/// clones will corrupt the tree.
pub trait GameState: Clone + Send + Sync {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// The type of players in this game
    type Player: Player;

    /// Returns the list of legal actions from this state
    ///
    /// The order is irrelevant to the search but must be the same on repeated calls for the
    /// same state. Terminal states return an empty list.
    ///
    /// # Example
    ///
    /// ```
    /// # use mcts_arena::{GameState, GameOutcome, Action, Result};
    /// # #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    /// # struct MyAction(usize);
    /// # impl Action for MyAction { fn id(&self) -> usize { self.0 } }
    /// # #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    /// # struct MyPlayer;
    /// # impl mcts_arena::Player for MyPlayer {}
    /// # #[derive(Clone)]
    /// # struct MyGame { /* ... */ }
    /// # impl GameState for MyGame {
    /// # type Action = MyAction;
    /// # type Player = MyPlayer;
    /// fn get_legal_actions(&self) -> Vec<MyAction> {
    ///     // Return all valid moves in the current position
    ///     vec![MyAction(0), MyAction(1), MyAction(2)]
    /// }
    /// # fn apply_action(&self, _: &MyAction) -> Result<Self> { Ok(self.clone()) }
    /// # fn is_terminal(&self) -> bool { false }
    /// # fn get_result(&self, _: &MyPlayer) -> Result<GameOutcome> { Ok(GameOutcome::Draw) }
    /// # fn get_current_player(&self) -> MyPlayer { MyPlayer }
    /// # }
    /// ```
    fn get_legal_actions(&self) -> Vec<Self::Action>;

    /// Applies an action, returning the resulting state with the turn advanced
    ///
    /// The receiver is left untouched.
    ///
    /// # Errors
    ///
    /// [`MCTSError::IllegalMove`] if `action` is not in [`get_legal_actions`](Self::get_legal_actions).
    fn apply_action(&self, action: &Self::Action) -> Result<Self>;

    /// Returns true if this state is terminal (game over)
    fn is_terminal(&self) -> bool;

    /// Returns the result of a finished game from the perspective of the given player
    ///
    /// # Errors
    ///
    /// [`MCTSError::NotTerminal`] if the game is still in progress.
    fn get_result(&self, for_player: &Self::Player) -> Result<GameOutcome>;

    /// Returns the player whose turn it is in this state
    fn get_current_player(&self) -> Self::Player;

    /// Returns true if `action` can be played from this state
    fn is_legal_action(&self, action: &Self::Action) -> bool {
        self.get_legal_actions().contains(action)
    }

    /// Plays uniformly random legal moves from a copy of this state until the game ends
    ///
    /// Returns the final result from the perspective of `for_player`. Games with cheap
    /// domain knowledge may override this with a smarter playout.
    fn simulate_random_playout<R: Rng + ?Sized>(
        &self,
        for_player: &Self::Player,
        rng: &mut R,
    ) -> Result<GameOutcome> {
        let mut current_state = self.clone();

        while !current_state.is_terminal() {
            let legal_actions = current_state.get_legal_actions();
            let action = legal_actions
                .choose(rng)
                .ok_or(MCTSError::NoLegalMoves)?;
            current_state = current_state.apply_action(action)?;
        }

        current_state.get_result(for_player)
    }
}

impl Action for usize {
    fn id(&self) -> usize {
        *self
    }
}

/// Simplified implementation of Player trait for common types
impl Player for usize {}
impl Player for u8 {}
impl Player for char {}
