#![allow(dead_code)]

use mcts_arena::{
    games::tic_tac_toe::{Mark, TicTacToe},
    Action, GameOutcome, GameState, MCTSError, Player, Result,
};

/// Configurable state for exercising policies and the tree directly
#[derive(Clone, Debug, PartialEq)]
pub struct TestGameState {
    pub terminal: bool,
    pub actions: Vec<TestAction>,
    pub player: TestPlayer,
    pub outcome: GameOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TestPlayer(pub u8);

impl Player for TestPlayer {}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TestAction(pub u8);

impl Action for TestAction {
    fn id(&self) -> usize {
        self.0 as usize
    }
}

impl TestGameState {
    pub fn with_actions(count: u8) -> Self {
        TestGameState {
            terminal: false,
            actions: (0..count).map(TestAction).collect(),
            player: TestPlayer(0),
            outcome: GameOutcome::Draw,
        }
    }
}

impl GameState for TestGameState {
    type Action = TestAction;
    type Player = TestPlayer;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        if self.terminal {
            return vec![];
        }
        self.actions.clone()
    }

    fn apply_action(&self, action: &Self::Action) -> Result<Self> {
        if !self.is_legal_action(action) {
            return Err(MCTSError::IllegalMove(format!("{:?}", action)));
        }
        // Every move ends the game
        let mut new_state = self.clone();
        new_state.terminal = true;
        new_state.player = TestPlayer(1 - self.player.0);
        Ok(new_state)
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn get_result(&self, for_player: &Self::Player) -> Result<GameOutcome> {
        if !self.terminal {
            return Err(MCTSError::NotTerminal);
        }
        if for_player.0 == 0 {
            Ok(self.outcome)
        } else {
            Ok(self.outcome.flipped())
        }
    }

    fn get_current_player(&self) -> Self::Player {
        self.player.clone()
    }
}

/// Fixed-depth game with alternating players whose terminal result is set up front
#[derive(Clone, Debug)]
pub struct LadderGame {
    pub depth: usize,
    pub max_depth: usize,
    pub branching: usize,
    pub outcome_for_first: GameOutcome,
}

impl LadderGame {
    pub fn new(max_depth: usize, branching: usize, outcome_for_first: GameOutcome) -> Self {
        LadderGame {
            depth: 0,
            max_depth,
            branching,
            outcome_for_first,
        }
    }
}

impl GameState for LadderGame {
    type Action = usize;
    type Player = usize;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        if self.is_terminal() {
            return vec![];
        }
        (0..self.branching).collect()
    }

    fn apply_action(&self, action: &Self::Action) -> Result<Self> {
        if self.is_terminal() || *action >= self.branching {
            return Err(MCTSError::IllegalMove(format!("{}", action)));
        }
        let mut next = self.clone();
        next.depth += 1;
        Ok(next)
    }

    fn is_terminal(&self) -> bool {
        self.depth >= self.max_depth
    }

    fn get_result(&self, for_player: &Self::Player) -> Result<GameOutcome> {
        if !self.is_terminal() {
            return Err(MCTSError::NotTerminal);
        }
        if *for_player == 0 {
            Ok(self.outcome_for_first)
        } else {
            Ok(self.outcome_for_first.flipped())
        }
    }

    fn get_current_player(&self) -> Self::Player {
        self.depth % 2
    }
}

/// Game-theoretic value of a tic-tac-toe position for `player` under perfect play
pub fn minimax(game: &TicTacToe, player: Mark) -> GameOutcome {
    if game.is_terminal() {
        return game.get_result(&player).expect("terminal state has a result");
    }

    let to_move = game.get_current_player();
    let replies = game.get_legal_actions().into_iter().map(|cell| {
        let next = game.apply_action(&cell).expect("legal move applies");
        minimax(&next, player)
    });

    if to_move == player {
        replies
            .max_by_key(|outcome| outcome.value())
            .expect("non-terminal state has moves")
    } else {
        replies
            .min_by_key(|outcome| outcome.value())
            .expect("non-terminal state has moves")
    }
}

/// Every terminal position reachable from the empty board
pub fn all_terminal_positions() -> Vec<TicTacToe> {
    let mut terminals = Vec::new();
    let mut stack = vec![TicTacToe::new()];

    while let Some(game) = stack.pop() {
        if game.is_terminal() {
            terminals.push(game);
            continue;
        }
        for cell in game.get_legal_actions() {
            stack.push(game.apply_action(&cell).expect("legal move applies"));
        }
    }

    terminals
}
