//! Policies for different phases of the MCTS algorithm
//!
//! This module contains implementations of the policies used in MCTS:
//! - Selection policies: How to choose which nodes to explore
//! - Expansion policies: Which untried move becomes a new node
//! - Simulation policies: How to play out games from a node
//! - Backpropagation policies: How to update node statistics

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use expansion::{ExpansionPolicy, RandomExpansionPolicy};
pub use selection::{MostVisitsPolicy, SelectionPolicy, UCB1Policy};
pub use simulation::{RandomPolicy, SimulationPolicy};
