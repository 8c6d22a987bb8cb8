mod common;

use common::{TestAction, TestGameState};
use mcts_arena::{
    games::tic_tac_toe::{Cell, TicTacToe},
    GameOutcome, GameState, MCTSError, NodeId, SearchTree,
};

#[test]
fn test_new_tree_has_bare_root() {
    let tree = SearchTree::new(TestGameState::with_actions(3));
    let root = tree.root();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root_id(), NodeId::ROOT);
    assert!(root.parent.is_none());
    assert!(root.action.is_none());
    assert!(root.children.is_empty());
    assert_eq!(root.visits(), 0);
    assert_eq!(root.total_score(), 0);
    assert_eq!(root.depth, 0);
    assert_eq!(root.legal_actions.len(), 3);
}

#[test]
fn test_add_child_links_parent_and_child() {
    let state = TestGameState::with_actions(3);
    let mut tree = SearchTree::new(state.clone());
    let root = tree.root_id();

    let next = state.apply_action(&TestAction(1)).unwrap();
    let child = tree.add_child(root, TestAction(1), next).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.parent(child), Some(root));
    assert_eq!(tree.get(child).action, Some(TestAction(1)));
    assert_eq!(tree.get(child).depth, 1);
    assert_eq!(tree.get(child).visits(), 0);
    assert_eq!(tree.root().children, vec![child]);
}

#[test]
fn test_add_child_rejects_illegal_action() {
    let state = TestGameState::with_actions(2);
    let mut tree = SearchTree::new(state.clone());
    let root = tree.root_id();

    let result = tree.add_child(root, TestAction(7), state);
    assert!(matches!(result, Err(MCTSError::InvalidMove(_))));
    assert_eq!(tree.len(), 1, "A rejected child must not be stored");
}

#[test]
fn test_add_child_rejects_duplicate_action() {
    let state = TestGameState::with_actions(2);
    let mut tree = SearchTree::new(state.clone());
    let root = tree.root_id();

    let next = state.apply_action(&TestAction(0)).unwrap();
    tree.add_child(root, TestAction(0), next.clone()).unwrap();

    let result = tree.add_child(root, TestAction(0), next);
    assert!(matches!(result, Err(MCTSError::InvalidMove(_))));
    assert_eq!(tree.root().children.len(), 1);
}

#[test]
fn test_untried_actions_shrink_as_children_are_added() {
    let state = TestGameState::with_actions(3);
    let mut tree = SearchTree::new(state.clone());
    let root = tree.root_id();

    assert_eq!(tree.untried_actions(root).len(), 3);
    assert!(!tree.root().is_fully_expanded());

    for i in 0..3 {
        let next = state.apply_action(&TestAction(i)).unwrap();
        tree.add_child(root, TestAction(i), next).unwrap();
    }

    assert!(tree.untried_actions(root).is_empty());
    assert!(tree.root().is_fully_expanded());
}

#[test]
fn test_record_updates_statistics() {
    let mut tree = SearchTree::new(TestGameState::with_actions(1));
    let root = tree.get_mut(NodeId::ROOT);

    root.record(GameOutcome::Win);
    root.record(GameOutcome::Win);
    root.record(GameOutcome::Loss);
    root.record(GameOutcome::Draw);

    assert_eq!(root.visits(), 4);
    assert_eq!(root.total_score(), 1);
    assert!((root.value() - 0.25).abs() < 1e-12);
}

#[test]
fn test_path_to_root_walks_ancestors() {
    let game = TicTacToe::new();
    let mut tree = SearchTree::new(game.clone());

    let first = game.apply_action(&Cell(4)).unwrap();
    let a = tree.add_child(NodeId::ROOT, Cell(4), first.clone()).unwrap();
    let second = first.apply_action(&Cell(0)).unwrap();
    let b = tree.add_child(a, Cell(0), second.clone()).unwrap();
    let third = second.apply_action(&Cell(8)).unwrap();
    let c = tree.add_child(b, Cell(8), third).unwrap();

    let path: Vec<NodeId> = tree.path_to_root(c).collect();
    assert_eq!(path, vec![c, b, a, NodeId::ROOT]);
    assert_eq!(tree.max_depth(), 3);

    let root_path: Vec<NodeId> = tree.path_to_root(NodeId::ROOT).collect();
    assert_eq!(root_path, vec![NodeId::ROOT]);
}

#[test]
fn test_tree_state_is_independent_of_source_state() {
    let game = TicTacToe::new();
    let tree = SearchTree::new(game.clone());

    // Moving on from the source state leaves the stored snapshot untouched
    let moved = game.apply_action(&Cell(0)).unwrap();
    assert_ne!(moved, tree.root().state);
    assert_eq!(tree.root().state, TicTacToe::new());
}
