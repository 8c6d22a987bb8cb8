//! Tic-Tac-Toe on a 3x3 board
//!
//! Cells are numbered 0 to 8, row by row from the top left. X always moves first.

use std::fmt;

use crate::{
    game_state::{Action, GameOutcome, GameState, Player},
    MCTSError, Result,
};

/// The eight lines that win the game: rows, columns, diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Players in Tic-Tac-Toe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other player
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Character used to draw the mark
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl Player for Mark {}

/// A move: the index of the cell to mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(pub usize);

impl Cell {
    /// Row of the cell, 0 at the top
    pub fn row(self) -> usize {
        self.0 / 3
    }

    /// Column of the cell, 0 at the left
    pub fn col(self) -> usize {
        self.0 % 3
    }
}

impl Action for Cell {
    fn id(&self) -> usize {
        self.0
    }
}

/// Tic-Tac-Toe game state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    board: [Option<Mark>; 9],
    current_player: Mark,
}

impl TicTacToe {
    /// An empty board with X to move
    pub fn new() -> Self {
        TicTacToe {
            board: [None; 9],
            current_player: Mark::X,
        }
    }

    /// Builds a position from a nine-character picture of the board
    ///
    /// `X` and `O` are marks, `.`, `-` or a space are empty cells. Whitespace-free input is
    /// read row by row. The player to move follows from the mark counts.
    ///
    /// ```
    /// use mcts_arena::games::tic_tac_toe::{Mark, TicTacToe};
    /// use mcts_arena::GameState;
    ///
    /// let game = TicTacToe::from_cells("XO.\n.X.\n..O").unwrap();
    /// assert_eq!(game.get_current_player(), Mark::X);
    /// ```
    ///
    /// # Errors
    ///
    /// [`MCTSError::IllegalMove`] if the picture does not have nine cells, contains an unknown
    /// character, or has mark counts no legal game can reach.
    pub fn from_cells(picture: &str) -> Result<Self> {
        let cells: Vec<char> = picture.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if cells.len() != 9 {
            return Err(MCTSError::IllegalMove(format!(
                "board needs 9 cells, got {}",
                cells.len()
            )));
        }

        let mut board = [None; 9];
        for (slot, c) in board.iter_mut().zip(cells) {
            *slot = match c {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '-' | ' ' => None,
                other => {
                    return Err(MCTSError::IllegalMove(format!(
                        "unknown cell character {:?}",
                        other
                    )))
                }
            };
        }

        let xs = board.iter().filter(|c| **c == Some(Mark::X)).count();
        let os = board.iter().filter(|c| **c == Some(Mark::O)).count();
        let current_player = match xs.checked_sub(os) {
            Some(0) => Mark::X,
            Some(1) => Mark::O,
            _ => {
                return Err(MCTSError::IllegalMove(format!(
                    "unreachable position with {} X and {} O",
                    xs, os
                )))
            }
        };

        Ok(TicTacToe {
            board,
            current_player,
        })
    }

    /// The mark in `cell`, if any
    pub fn cell(&self, cell: Cell) -> Option<Mark> {
        self.board.get(cell.0).copied().flatten()
    }

    /// Number of marks on the board
    pub fn moves_played(&self) -> usize {
        self.board.iter().filter(|c| c.is_some()).count()
    }

    /// The player holding a complete line, if any
    pub fn winner(&self) -> Option<Mark> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.board[a]?;
            (self.board[b] == Some(mark) && self.board[c] == Some(mark)).then_some(mark)
        })
    }

    /// True when the board is full and nobody has a line
    pub fn is_draw(&self) -> bool {
        self.winner().is_none() && self.moves_played() == 9
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Action = Cell;
    type Player = Mark;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        if self.winner().is_some() {
            return Vec::new();
        }

        (0..9)
            .filter(|&i| self.board[i].is_none())
            .map(Cell)
            .collect()
    }

    fn apply_action(&self, action: &Self::Action) -> Result<Self> {
        if self.winner().is_some() || self.cell(*action).is_some() || action.0 >= 9 {
            return Err(MCTSError::IllegalMove(format!(
                "cell {} is not playable",
                action.0
            )));
        }

        let mut new_state = self.clone();
        new_state.board[action.0] = Some(self.current_player);
        new_state.current_player = self.current_player.opponent();

        Ok(new_state)
    }

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.moves_played() == 9
    }

    fn get_result(&self, for_player: &Self::Player) -> Result<GameOutcome> {
        match self.winner() {
            Some(winner) if winner == *for_player => Ok(GameOutcome::Win),
            Some(_) => Ok(GameOutcome::Loss),
            None if self.moves_played() == 9 => Ok(GameOutcome::Draw),
            None => Err(MCTSError::NotTerminal),
        }
    }

    fn get_current_player(&self) -> Self::Player {
        self.current_player
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| {
                    let index = row * 3 + col;
                    match self.board[index] {
                        Some(mark) => mark.symbol().to_string(),
                        None => index.to_string(),
                    }
                })
                .collect();
            writeln!(f, " {} ", cells.join(" | "))?;
            if row < 2 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}
