//! Concrete games implementing [`GameState`](crate::GameState).

pub mod tic_tac_toe;

pub use tic_tac_toe::{Cell, Mark, TicTacToe};
