//! UCB1 arithmetic shared by the selection policy and the final move choice.

use crate::{MCTSError, Result};

/// Calculates the exploitation term for UCB1
///
/// This is the average outcome of the child, `total_score / visits`.
pub fn exploitation_term(total_score: i64, visits: u64) -> Result<f64> {
    if visits == 0 {
        return Err(MCTSError::UnvisitedChild);
    }
    Ok(total_score as f64 / visits as f64)
}

/// Calculates the exploration term for UCB1
///
/// `exploration_constant * sqrt(ln(parent_visits) / child_visits)`. A constant of zero turns
/// the term off entirely, which is how the final move choice scores children.
pub fn exploration_term(
    parent_visits: u64,
    child_visits: u64,
    exploration_constant: f64,
) -> Result<f64> {
    if child_visits == 0 {
        return Err(MCTSError::UnvisitedChild);
    }
    if exploration_constant == 0.0 {
        return Ok(0.0);
    }

    let parent_visits = parent_visits.max(1) as f64;
    Ok(exploration_constant * (parent_visits.ln() / child_visits as f64).sqrt())
}

/// Calculates the UCB1 value for a child
pub fn ucb1_value(
    total_score: i64,
    visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
) -> Result<f64> {
    let exploitation = exploitation_term(total_score, visits)?;
    let exploration = exploration_term(parent_visits, visits, exploration_constant)?;

    Ok(exploitation + exploration)
}
