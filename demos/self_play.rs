//! Self-play Tic-Tac-Toe demo
//!
//! Two MCTS players take turns until the game ends. Pass a simulation budget as the first
//! argument (default 1000) and optionally a seed as the second.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example self_play -- 2000 42
//! ```

use mcts_arena::{
    games::tic_tac_toe::{Mark, TicTacToe},
    GameOutcome, GameState, MCTSConfig, MCTS,
};

fn main() -> Result<(), mcts_arena::MCTSError> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let budget = args
        .next()
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(1_000);
    let seed = args.next().and_then(|arg| arg.parse::<u64>().ok());

    println!("MCTS Tic-Tac-Toe Self-Play");
    println!("==========================");
    println!("Simulations per move: {}", budget);
    println!();

    let mut game = TicTacToe::new();
    let mut turn = 0u64;

    while !game.is_terminal() {
        println!("{}", game);

        let player = game.get_current_player();
        let mut config = MCTSConfig::default().with_max_iterations(budget);
        if let Some(seed) = seed {
            config = config.with_seed(seed.wrapping_add(turn));
        }

        // A fresh tree for every decision
        let mut mcts = MCTS::new(game.clone(), player, config);
        let cell = mcts.search()?;

        println!(
            "{:?} chooses cell {} (row {}, col {})",
            player,
            cell.0,
            cell.row(),
            cell.col()
        );
        for stats in mcts.root_child_stats() {
            println!(
                "  cell {}: visits {:>5}, value {:+.3}",
                stats.action.0, stats.visits, stats.value
            );
        }
        println!("{}", mcts.get_statistics().summary());
        println!();

        game = game.apply_action(&cell)?;
        turn += 1;
    }

    println!("{}", game);
    match game.get_result(&Mark::X)? {
        GameOutcome::Win => println!("X wins!"),
        GameOutcome::Loss => println!("O wins!"),
        GameOutcome::Draw => println!("The game is a draw!"),
    }

    Ok(())
}
