#![allow(dead_code)]

use temperforge::config::{Config, SearchParams};
use temperforge::targets::{IntervalTarget, IntervalTargetStore};

/// Builds a target directly, bypassing the store.
pub fn target(id: u64, n: u64, d: u64, priority: f64, cap: Option<f64>) -> IntervalTarget {
    IntervalTarget {
        id,
        degree: 0,
        n,
        d,
        tolerance_cents: 5.0,
        priority,
        max_error_cents: cap,
    }
}

/// Store of `scale_size` notes filled with `(ratio text, priority)` pairs.
pub fn store_with(scale_size: usize, ratios: &[(&str, f64)]) -> IntervalTargetStore {
    let mut store = IntervalTargetStore::new(scale_size);
    for (i, (text, priority)) in ratios.iter().enumerate() {
        store
            .add_interval(text, i, 5.0, *priority, "")
            .expect("valid ratio");
    }
    store
}

/// Small and quick, for tests that only care about invariants.
pub fn fast_config() -> Config {
    Config {
        search: SearchParams {
            population_size: 24,
            max_generations: 40,
            patience: 40,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn thorough_config() -> Config {
    Config {
        search: SearchParams {
            population_size: 64,
            max_generations: 300,
            patience: 120,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn assert_non_increasing(history: &[f64]) {
    for w in history.windows(2) {
        assert!(
            w[1] <= w[0],
            "best fitness increased from {} to {}",
            w[0],
            w[1]
        );
    }
}
