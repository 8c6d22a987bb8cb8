//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module contains the core MCTS implementation, orchestrating the
//! four phases of selection, expansion, simulation, and backpropagation.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{
    config::{BestChildCriteria, MCTSConfig},
    game_state::{GameOutcome, GameState},
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        expansion::{ExpansionPolicy, RandomExpansionPolicy},
        selection::{MostVisitsPolicy, SelectionPolicy, UCB1Policy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// Chooses a move for `perspective` from `initial_state`
///
/// Runs `simulation_budget` full MCTS cycles with the default policies and an exploration
/// constant of 1.4, drawing every random choice from `rng`, then returns the root move with the
/// highest average score. Two calls with identically seeded sources return the same move.
///
/// # Errors
///
/// - [`MCTSError::NoLegalMoves`] if `initial_state` is terminal or has no legal moves.
/// - [`MCTSError::NoChildren`] if `simulation_budget` is zero.
/// - Any error the game raises while applying moves or scoring results.
pub fn choose_move<S, R>(
    initial_state: &S,
    perspective: &S::Player,
    simulation_budget: usize,
    rng: &mut R,
) -> Result<S::Action>
where
    S: GameState + 'static,
    R: RngCore,
{
    let config = MCTSConfig::default().with_max_iterations(simulation_budget);
    let mut mcts = MCTS::new(initial_state.clone(), perspective.clone(), config);
    mcts.search_with_rng(rng)
}

/// Aggregate statistics of one root move after a search
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<A> {
    /// The move leading to the child
    pub action: A,
    /// Simulations that passed through the child
    pub visits: u64,
    /// Sum of their outcomes
    pub total_score: i64,
    /// Average outcome
    pub value: f64,
}

/// The main Monte Carlo Tree Search implementation
///
/// Owns the search tree for a single move decision. Every call to one of the `search*`
/// methods discards the previous tree and grows a fresh one from the same root state.
pub struct MCTS<S: GameState> {
    /// Search tree of the latest search
    tree: SearchTree<S>,

    /// Player whose outcomes the search maximises
    perspective: S::Player,

    /// Configuration for the search
    config: MCTSConfig,

    /// Statistics gathered during search
    statistics: SearchStatistics,

    /// Policy for selecting nodes during the selection phase
    selection_policy: Box<dyn SelectionPolicy<S>>,

    /// Policy for picking the untried move to expand
    expansion_policy: Box<dyn ExpansionPolicy<S>>,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy<S>>,

    /// Policy for backpropagating results
    backpropagation_policy: Box<dyn BackpropagationPolicy<S>>,

    /// Polled between simulations; a set flag ends the search
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl<S: GameState + 'static> MCTS<S> {
    /// Creates a new MCTS instance searching on behalf of `perspective`
    pub fn new(initial_state: S, perspective: S::Player, config: MCTSConfig) -> Self {
        let selection_policy: Box<dyn SelectionPolicy<S>> =
            Box::new(UCB1Policy::new(config.exploration_constant));

        let expansion_policy: Box<dyn ExpansionPolicy<S>> = Box::new(RandomExpansionPolicy::new());

        let simulation_policy: Box<dyn SimulationPolicy<S>> = Box::new(RandomPolicy::new());

        let backpropagation_policy: Box<dyn BackpropagationPolicy<S>> =
            Box::new(StandardPolicy::new());

        MCTS {
            tree: SearchTree::new(initial_state),
            perspective,
            config,
            statistics: SearchStatistics::new(),
            selection_policy,
            expansion_policy,
            simulation_policy,
            backpropagation_policy,
            cancel_flag: None,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the expansion policy to use
    pub fn with_expansion_policy<P: ExpansionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.expansion_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<S> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Sets a flag that stops the search when raised
    ///
    /// The flag is checked before each simulation, never during one, so every completed
    /// simulation is fully backpropagated.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Runs the configured number of simulations and returns the best action
    ///
    /// Randomness comes from `config.seed` when set, otherwise from OS entropy.
    pub fn search(&mut self) -> Result<S::Action> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.search_with_rng(&mut rng)
    }

    /// Runs the configured number of simulations drawing randomness from `rng`
    pub fn search_with_rng<R: RngCore>(&mut self, rng: &mut R) -> Result<S::Action> {
        let iterations = self.config.max_iterations;
        let max_time = self.config.max_time;
        self.run(iterations, max_time, rng)
    }

    /// Runs simulations until `duration` has elapsed and returns the best action
    ///
    /// The simulation budget in the configuration is ignored.
    pub fn search_for_time(&mut self, duration: Duration) -> Result<S::Action> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run(usize::MAX, Some(duration), &mut rng)
    }

    fn run(
        &mut self,
        iterations: usize,
        max_time: Option<Duration>,
        rng: &mut dyn RngCore,
    ) -> Result<S::Action> {
        self.config.validate()?;

        self.tree = SearchTree::new(self.tree.root().state.clone());
        self.statistics = SearchStatistics::new();

        let root = self.tree.root();
        if root.is_terminal() || root.legal_actions.is_empty() {
            return Err(MCTSError::NoLegalMoves);
        }

        debug!(
            "Starting search for {:?}: budget {}, {} root moves",
            self.perspective,
            iterations,
            root.legal_actions.len()
        );

        let start_time = Instant::now();

        for i in 0..iterations {
            if let Some(max_duration) = max_time {
                if start_time.elapsed() >= max_duration {
                    self.statistics.stopped_early = true;
                    warn!("Search stopped early due to time limit after {} iterations", i);
                    break;
                }
            }

            if self.is_cancelled() {
                self.statistics.cancelled = true;
                warn!("Search cancelled after {} iterations", i);
                break;
            }

            self.execute_iteration(rng)?;

            self.statistics.iterations = i + 1;
        }

        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = self.tree.len();
        self.statistics.max_depth = self.tree.max_depth();

        debug!(
            "Search finished: {} iterations, {} nodes, {:.3}s",
            self.statistics.iterations,
            self.statistics.tree_size,
            self.statistics.total_time.as_secs_f64()
        );

        self.select_best_action(rng)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self, rng: &mut dyn RngCore) -> Result<()> {
        // 1. Selection phase
        let selected = self.selection(rng)?;

        // 2. Expansion phase
        let expanded = self.expansion(selected, rng)?;

        // 3. Simulation phase
        let outcome = self.simulation(expanded, rng)?;

        // 4. Backpropagation phase
        self.backpropagation(expanded, outcome);

        Ok(())
    }

    /// Selection phase: descend to a terminal node or a node with untried moves
    fn selection(&self, rng: &mut dyn RngCore) -> Result<NodeId> {
        let mut current = self.tree.root_id();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                return Ok(current);
            }

            current = self.selection_policy.select_child(&self.tree, current, rng)?;
        }
    }

    /// Expansion phase: add one child for an untried move, or keep a terminal node
    fn expansion(&mut self, node: NodeId, rng: &mut dyn RngCore) -> Result<NodeId> {
        if self.tree.get(node).is_terminal() {
            self.statistics.terminal_hits += 1;
            return Ok(node);
        }

        let untried = self.tree.untried_actions(node);
        let action = self.expansion_policy.select_action(&untried, rng)?;
        let next_state = self.tree.get(node).state.apply_action(&action)?;

        trace!("Expanding node {} with {:?}", node, action);

        self.tree.add_child(node, action, next_state)
    }

    /// Simulation phase: play out the game from the expanded node
    fn simulation(&mut self, node: NodeId, rng: &mut dyn RngCore) -> Result<GameOutcome> {
        self.tree.get_mut(node).rollouts += 1;

        self.simulation_policy
            .simulate(&self.tree.get(node).state, &self.perspective, rng)
    }

    /// Backpropagation phase: update every node from `node` up to the root
    fn backpropagation(&mut self, node: NodeId, outcome: GameOutcome) {
        let mut current = Some(node);

        while let Some(id) = current {
            let node = self.tree.get_mut(id);
            self.backpropagation_policy.update_stats(node, outcome);
            current = node.parent;
        }
    }

    /// Selects the best root action based on configured criteria
    fn select_best_action(&self, rng: &mut dyn RngCore) -> Result<S::Action> {
        let root = self.tree.root_id();
        if self.tree.root().is_leaf() {
            return Err(MCTSError::NoChildren);
        }

        let best = match self.config.best_child_criteria {
            BestChildCriteria::HighestValue => {
                UCB1Policy::greedy().select_child(&self.tree, root, rng)?
            }
            BestChildCriteria::MostVisits => {
                MostVisitsPolicy::new().select_child(&self.tree, root, rng)?
            }
        };

        self.tree
            .get(best)
            .action
            .clone()
            .ok_or_else(|| MCTSError::InvalidMove(format!("child {} has no incoming move", best)))
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the tree grown by the latest search
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// Returns the player the search is run for
    pub fn perspective(&self) -> &S::Player {
        &self.perspective
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Statistics of every root move, in expansion order
    pub fn root_child_stats(&self) -> Vec<ChildStats<S::Action>> {
        self.tree
            .children(self.tree.root_id())
            .filter_map(|(_, child)| {
                child.action.clone().map(|action| ChildStats {
                    action,
                    visits: child.visits(),
                    total_score: child.total_score(),
                    value: child.value(),
                })
            })
            .collect()
    }

    /// Returns a visualization of the search tree
    ///
    /// One line per node, indented two spaces per level, children in expansion order.
    pub fn visualize_tree(&self) -> String {
        let mut output = String::new();
        let mut stack = vec![self.tree.root_id()];

        while let Some(id) = stack.pop() {
            let node = self.tree.get(id);
            let indent = "  ".repeat(node.depth);
            let action_str = match &node.action {
                Some(action) => format!("{:?}", action),
                None => "Root".to_string(),
            };

            let _ = writeln!(
                output,
                "{}{} (visits: {}, value: {:.3})",
                indent,
                action_str,
                node.visits(),
                node.value()
            );

            stack.extend(node.children.iter().rev());
        }

        output
    }
}
