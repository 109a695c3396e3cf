mod common;

use common::{assert_non_increasing, fast_config, store_with, thorough_config};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use temperforge::config::{Config, SearchParams};
use temperforge::error::TemperError;
use temperforge::optimizer::{
    search, Individual, NoProgress, OptimizationOptions, Optimizer,
};
use temperforge::ratio::BoundaryRatio;
use temperforge::scorer::{FitnessEvaluator, FitnessMode};
use temperforge::temperaments::KnownTemperament;

fn optimizer_for(ratios: &[(&str, f64)], n: usize, config: &Config) -> Optimizer {
    let store = store_with(n, ratios);
    let evaluator = FitnessEvaluator::from_store(&store, config.search.fitness_mode).unwrap();
    Optimizer::new(
        Arc::new(evaluator),
        &store.boundary(),
        OptimizationOptions::from(config),
    )
    .unwrap()
}

#[test]
fn test_history_is_monotone() {
    let opt = optimizer_for(&[("3/2", 1.0), ("5/4", 1.0), ("7/4", 0.5)], 12, &fast_config());
    let result = opt.run(Some(7), NoProgress).unwrap();
    assert_eq!(result.history.len(), result.generations + 1);
    assert_non_increasing(&result.history);
    assert_eq!(*result.history.last().unwrap(), result.best.fitness);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let opt = optimizer_for(&[("3/2", 1.0), ("6/5", 1.0)], 12, &fast_config());
    let a = opt.run(Some(1234), NoProgress).unwrap();
    let b = opt.run(Some(1234), NoProgress).unwrap();
    assert_eq!(a.best.genes, b.best.genes);
    assert_eq!(a.history, b.history);
}

#[test]
fn test_finds_a_pure_fifth() {
    let opt = optimizer_for(&[("3/2", 1.0)], 12, &thorough_config());
    let result = opt.run(Some(42), NoProgress).unwrap();
    assert!(result.best.fitness < 0.5, "fitness {}", result.best.fitness);
    let fifth = result.output.notes[7].cents_from_root;
    assert!((fifth - 701.955).abs() < 1.0, "fifth at {}", fifth);
}

#[test]
fn test_beats_meantone_on_meantone_targets() {
    let mut config = thorough_config();
    config.search.period_stretch_cents = 0.0;
    let opt = optimizer_for(&[("3/2", 1.0), ("5/4", 1.0)], 12, &config);
    let result = opt.run(Some(3), NoProgress).unwrap();

    let store = store_with(12, &[("3/2", 1.0), ("5/4", 1.0)]);
    let ev = FitnessEvaluator::from_store(&store, FitnessMode::Root).unwrap();
    let meantone = ev.evaluate(&KnownTemperament::QuarterCommaMeantone.genes());
    assert!(result.best.fitness <= meantone);
    // No stretch allowed: the octave stays pure.
    assert_eq!(result.best.period(), 1200.0);
}

#[test]
fn test_period_stays_within_stretch() {
    let mut config = fast_config();
    config.search.period_stretch_cents = 5.0;
    let opt = optimizer_for(&[("3/2", 1.0), ("5/4", 1.0)], 12, &config);
    let result = opt.run(Some(9), NoProgress).unwrap();
    let p = result.best.period();
    assert!((1195.0..=1205.0).contains(&p));
    assert!(result.best.generator() >= 0.0 && result.best.generator() < p);
}

#[test]
fn test_empty_targets_stop_immediately() {
    let opt = optimizer_for(&[], 12, &fast_config());
    let result = opt.run(Some(1), NoProgress).unwrap();
    assert_eq!(result.best.fitness, 0.0);
    assert_eq!(result.generations, 0);
    assert_eq!(result.history, vec![0.0]);
    assert_eq!(result.output.notes.len(), 12);
}

#[test]
fn test_callback_can_abort() {
    let opt = optimizer_for(&[("3/2", 1.0), ("5/4", 1.0)], 12, &fast_config());
    let calls = AtomicUsize::new(0);
    let result = opt
        .run(Some(5), |_: usize, _: f64, _: &Individual| {
            calls.fetch_add(1, Ordering::SeqCst) < 2
        })
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(result.generations, 3);
}

#[test]
fn test_patience_stops_early() {
    let mut config = fast_config();
    config.search.max_generations = 10_000;
    config.search.patience = 5;
    config.search.patience_threshold = 1e9;
    let opt = optimizer_for(&[("3/2", 1.0), ("5/4", 1.0)], 12, &config);
    let result = opt.run(Some(5), NoProgress).unwrap();
    assert_eq!(result.generations, 5);
}

#[test]
fn test_disqualified_population_still_terminates() {
    let mut store = store_with(12, &[]);
    // Unreachable cap: 11/8 at 0.001 cents alongside a pure fifth at 0.001.
    store.add_interval("11/8", 6, 5.0, 1.0, "0.001").unwrap();
    store.add_interval("3/2", 7, 5.0, 1.0, "0.001").unwrap();
    let result = search(
        store.targets(),
        12,
        &store.boundary(),
        &fast_config(),
        Some(11),
    )
    .unwrap();
    assert!(result.generations <= fast_config().search.max_generations);
    assert_non_increasing(&result.history);
}

#[test]
fn test_invalid_options_rejected() {
    let config = Config {
        search: SearchParams {
            population_size: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    let evaluator = FitnessEvaluator::new(vec![], 12, FitnessMode::Root).unwrap();
    let err = Optimizer::new(
        Arc::new(evaluator),
        &BoundaryRatio::OCTAVE,
        OptimizationOptions::from(&config),
    )
    .err()
    .unwrap();
    assert!(matches!(err, TemperError::Config(_)));
}

#[test]
fn test_tritave_search() {
    let mut store = store_with(13, &[]);
    store.set_boundary_ratio(3, 1).unwrap();
    store.add_interval("5/3", 6, 5.0, 1.0, "").unwrap();
    store.add_interval("7/3", 10, 5.0, 1.0, "").unwrap();
    let result = search(store.targets(), 13, &store.boundary(), &fast_config(), Some(2)).unwrap();
    assert!((result.best.period() - 1901.955).abs() <= 15.0 + 1e-9);
    assert!(result.output.notes.iter().all(|n| n.name.is_none()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn prop_best_never_regresses(seed in any::<u64>(), elite in 0usize..3) {
        let mut config = fast_config();
        config.search.elite_count = elite;
        config.search.max_generations = 25;
        let opt = optimizer_for(&[("3/2", 1.0), ("5/4", 2.0), ("7/4", 0.5)], 12, &config);
        let result = opt.run(Some(seed), NoProgress).unwrap();
        for w in result.history.windows(2) {
            prop_assert!(w[1] <= w[0]);
        }
    }
}
