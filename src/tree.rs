//! Tree data structures for Monte Carlo Tree Search
//!
//! The search tree is an arena: every node lives in one `Vec` owned by [`SearchTree`] and
//! refers to its parent and children by [`NodeId`]. Nodes are only ever appended, so ids stay
//! valid for the lifetime of the tree and the parent links can never form a cycle.

use std::fmt;

use crate::game_state::{GameOutcome, GameState};
use crate::{MCTSError, Result};

/// Index of a node inside a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Id of the root node of every tree
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a node in the MCTS tree
///
/// Each node holds a snapshot of the game state, the move that produced it and the running
/// statistics of every simulation that passed through it.
#[derive(Debug, Clone)]
pub struct MCTSNode<S: GameState> {
    /// The game state at this node
    pub state: S,

    /// The node this one was expanded from (None for root)
    pub parent: Option<NodeId>,

    /// The action that led to this state (None for root)
    pub action: Option<S::Action>,

    /// Children in expansion order, at most one per legal action
    pub children: Vec<NodeId>,

    /// Legal actions of `state`, computed once when the node is created
    pub legal_actions: Vec<S::Action>,

    /// Number of simulations that have passed through this node
    pub visits: u64,

    /// Sum of the signed outcomes of those simulations
    pub total_score: i64,

    /// Number of rollouts started directly from this node
    pub rollouts: u64,

    /// Depth of this node in the tree (root = 0)
    pub depth: usize,
}

impl<S: GameState> MCTSNode<S> {
    fn new(state: S, parent: Option<NodeId>, action: Option<S::Action>, depth: usize) -> Self {
        let legal_actions = state.get_legal_actions();

        MCTSNode {
            state,
            parent,
            action,
            children: Vec::new(),
            legal_actions,
            visits: 0,
            total_score: 0,
            rollouts: 0,
            depth,
        }
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Returns the accumulated score of this node
    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Returns the average outcome of simulations through this node, 0.0 if never visited
    pub fn value(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.visits as f64
    }

    /// Records one simulation outcome
    pub fn record(&mut self, outcome: GameOutcome) {
        self.visits += 1;
        self.total_score += outcome.value();
    }

    /// Returns true if this node's state ends the game
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns true once every legal action has a child
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() >= self.legal_actions.len()
    }

    /// Returns true if this node has no children yet
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena holding every node of one search
#[derive(Debug, Clone)]
pub struct SearchTree<S: GameState> {
    nodes: Vec<MCTSNode<S>>,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree containing only a root for `state`
    pub fn new(state: S) -> Self {
        SearchTree {
            nodes: vec![MCTSNode::new(state, None, None, 0)],
        }
    }

    /// Id of the root node
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The root node
    pub fn root(&self) -> &MCTSNode<S> {
        &self.nodes[0]
    }

    /// Returns the node with the given id
    ///
    /// # Panics
    ///
    /// If `id` was not produced by this tree.
    pub fn get(&self, id: NodeId) -> &MCTSNode<S> {
        &self.nodes[id.0]
    }

    /// Mutable access to the node with the given id
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S> {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest node depth in the tree
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Iterates over every node with its id, in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Children of `id` in expansion order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.get(id)
            .children
            .iter()
            .map(move |&child| (child, self.get(child)))
    }

    /// Parent of `id`, None for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    /// Legal actions of `id` that do not have a child yet, in legal-action order
    pub fn untried_actions(&self, id: NodeId) -> Vec<S::Action> {
        let node = self.get(id);
        node.legal_actions
            .iter()
            .filter(|action| !self.has_child_for(id, action))
            .cloned()
            .collect()
    }

    /// Returns true if `id` already has a child reached by `action`
    pub fn has_child_for(&self, id: NodeId, action: &S::Action) -> bool {
        self.get(id)
            .children
            .iter()
            .any(|&child| self.get(child).action.as_ref() == Some(action))
    }

    /// Adds a child of `parent` reached by `action`
    ///
    /// # Errors
    ///
    /// [`MCTSError::InvalidMove`] if `action` is not legal in the parent's state or the parent
    /// already has a child for it.
    pub fn add_child(&mut self, parent: NodeId, action: S::Action, state: S) -> Result<NodeId> {
        let parent_node = self.get(parent);
        if !parent_node.legal_actions.contains(&action) {
            return Err(MCTSError::InvalidMove(format!(
                "{:?} is not legal at node {}",
                action, parent
            )));
        }
        if self.has_child_for(parent, &action) {
            return Err(MCTSError::InvalidMove(format!(
                "node {} already has a child for {:?}",
                parent, action
            )));
        }

        let depth = parent_node.depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(MCTSNode::new(state, Some(parent), Some(action), depth));
        self.nodes[parent.0].children.push(id);

        Ok(id)
    }

    /// Walks from `id` up to the root, inclusive of both ends
    pub fn path_to_root(&self, id: NodeId) -> PathToRoot<'_, S> {
        PathToRoot {
            tree: self,
            next: Some(id),
        }
    }
}

/// Iterator over a node and its ancestors, produced by [`SearchTree::path_to_root`]
pub struct PathToRoot<'a, S: GameState> {
    tree: &'a SearchTree<S>,
    next: Option<NodeId>,
}

impl<'a, S: GameState> Iterator for PathToRoot<'a, S> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
