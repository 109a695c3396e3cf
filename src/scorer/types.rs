use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// How target errors are aggregated over the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FitnessMode {
    /// Measure every target from the tonic only.
    #[default]
    Root,
    /// Extension: average the error over every tonic rotation of the scale.
    AllTonics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetScore {
    pub id: u64,
    pub degree: usize,
    pub ratio: String,
    pub step: usize,
    pub ideal_cents: f64,
    pub actual_cents: f64,
    pub error_cents: f64,
    pub contribution: f64,
    pub within_tolerance: bool,
    pub disqualified: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub fitness: f64,
    pub disqualified: bool,
    pub targets: Vec<TargetScore>,
}

impl ScoreDetails {
    pub fn within_tolerance_count(&self) -> usize {
        self.targets.iter().filter(|t| t.within_tolerance).count()
    }

    pub fn max_abs_error(&self) -> f64 {
        self.targets
            .iter()
            .map(|t| t.error_cents.abs())
            .fold(0.0, f64::max)
    }
}
