mod common;

use common::LadderGame;
use mcts_arena::{GameOutcome, MCTSConfig, MCTSError, MCTS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

// Deep enough that no search in these tests exhausts it
fn deep_game() -> LadderGame {
    LadderGame::new(20, 3, GameOutcome::Draw)
}

#[test]
fn test_time_limited_search() {
    let time_limit = Duration::from_millis(200);

    let config = MCTSConfig::default()
        .with_max_time(time_limit)
        .with_max_iterations(usize::MAX) // Time must be the limiting factor
        .with_seed(1);

    let mut mcts = MCTS::new(deep_game(), 0, config);

    let start = Instant::now();
    let result = mcts.search();
    let elapsed = start.elapsed();

    assert!(result.is_ok(), "Search should have found an action");
    println!("Time limit: {:?}, Actual time: {:?}", time_limit, elapsed);
    println!("Stats: {}", mcts.get_statistics().summary());

    let stats = mcts.get_statistics();
    assert!(
        stats.stopped_early,
        "Statistics should indicate early stopping due to time limit"
    );
    assert!(!stats.cancelled);
    assert_eq!(mcts.tree().root().visits(), stats.iterations as u64);
}

#[test]
fn test_search_for_time() {
    let config = MCTSConfig::default().with_seed(4);
    let mut mcts = MCTS::new(deep_game(), 0, config);

    let result = mcts.search_for_time(Duration::from_millis(50));

    let action = result.unwrap();
    assert!(action < 3, "Should return a valid action");
    assert!(mcts.get_statistics().stopped_early);
}

#[test]
fn test_budget_finishes_before_time_limit() {
    let config = MCTSConfig::default()
        .with_max_time(Duration::from_secs(60))
        .with_max_iterations(100)
        .with_seed(1);

    let mut mcts = MCTS::new(deep_game(), 0, config);
    mcts.search().unwrap();

    assert!(!mcts.get_statistics().stopped_early);
    assert_eq!(mcts.get_statistics().iterations, 100);
}

#[test]
fn test_cancel_before_start_leaves_no_children() {
    let flag = Arc::new(AtomicBool::new(true));
    let config = MCTSConfig::default().with_max_iterations(1000).with_seed(1);

    let mut mcts = MCTS::new(deep_game(), 0, config).with_cancel_flag(flag);

    assert_eq!(mcts.search(), Err(MCTSError::NoChildren));
    assert!(mcts.get_statistics().cancelled);
    assert_eq!(mcts.get_statistics().iterations, 0);
}

#[test]
fn test_cancel_from_another_thread() {
    let flag = Arc::new(AtomicBool::new(false));
    let config = MCTSConfig::default()
        .with_max_iterations(usize::MAX)
        .with_seed(1);

    let mut mcts = MCTS::new(deep_game(), 0, config).with_cancel_flag(Arc::clone(&flag));

    let canceller = {
        let flag = Arc::clone(&flag);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            flag.store(true, Ordering::Relaxed);
        })
    };

    let result = mcts.search();
    canceller.join().unwrap();

    assert!(result.is_ok());
    let stats = mcts.get_statistics();
    assert!(stats.cancelled);
    // Cancellation only lands between whole simulations
    assert_eq!(mcts.tree().root().visits(), stats.iterations as u64);
}
