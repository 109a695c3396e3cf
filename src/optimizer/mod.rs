pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod runner;
pub mod selection;

pub use self::runner::{
    search, NoProgress, OptimizationOptions, Optimizer, ProgressCallback, SearchResult,
};

use crate::ratio::BoundaryRatio;
use serde::{Deserialize, Serialize};

/// A `[period, generator]` genome (cents) and its cached fitness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub genes: [f64; 2],
    pub fitness: f64,
}

impl Individual {
    pub fn unevaluated(genes: [f64; 2]) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    #[inline(always)]
    pub fn period(&self) -> f64 {
        self.genes[0]
    }

    #[inline(always)]
    pub fn generator(&self) -> f64 {
        self.genes[1]
    }
}

/// Search range for the period gene. The generator is always kept in
/// `[0, period)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneBounds {
    pub period_center: f64,
    pub period_min: f64,
    pub period_max: f64,
}

impl GeneBounds {
    pub fn around_boundary(boundary: &BoundaryRatio, stretch_cents: f64) -> Self {
        let center = boundary.cents();
        let stretch = stretch_cents.max(0.0);
        Self {
            period_center: center,
            period_min: (center - stretch).max(1.0),
            period_max: center + stretch,
        }
    }
}
