use mcts_arena::{config::BestChildCriteria, MCTSConfig, MCTSError};
use std::time::Duration;

#[test]
fn test_config_builder_methods() {
    // Test that all builder methods correctly set their respective values
    let config = MCTSConfig::default()
        .with_exploration_constant(2.0)
        .with_max_iterations(5000)
        .with_max_time(Duration::from_secs(30))
        .with_best_child_criteria(BestChildCriteria::MostVisits)
        .with_seed(99);

    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.max_iterations, 5000);
    assert_eq!(config.max_time, Some(Duration::from_secs(30)));
    assert_eq!(config.best_child_criteria, BestChildCriteria::MostVisits);
    assert_eq!(config.seed, Some(99));
}

#[test]
fn test_config_default_values() {
    let config = MCTSConfig::default();

    assert!((config.exploration_constant - 1.4).abs() < 1e-12);
    assert_eq!(config.max_iterations, 1_000);
    assert_eq!(config.max_time, None);
    assert_eq!(config.best_child_criteria, BestChildCriteria::HighestValue);
    assert_eq!(config.seed, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    assert!(MCTSConfig::default()
        .with_exploration_constant(0.0)
        .validate()
        .is_ok());

    for bad in [-0.5, f64::NAN, f64::INFINITY] {
        let result = MCTSConfig::default()
            .with_exploration_constant(bad)
            .validate();
        assert!(
            matches!(result, Err(MCTSError::InvalidConfiguration(_))),
            "{} should be rejected",
            bad
        );
    }
}
