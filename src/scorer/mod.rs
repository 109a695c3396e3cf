pub mod engine;
pub mod types;

pub use self::engine::{evaluate, evaluate_with_mode, target_error, target_step, TargetError};
pub use self::types::{FitnessMode, ScoreDetails, TargetScore};
use crate::error::{TemperError, TfResult};
use crate::targets::{IntervalTarget, IntervalTargetStore};

/// Scores `[period, generator]` genomes against a fixed target list.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    pub targets: Vec<IntervalTarget>,
    pub scale_size: usize,
    pub mode: FitnessMode,
}

impl FitnessEvaluator {
    pub fn new(
        targets: Vec<IntervalTarget>,
        scale_size: usize,
        mode: FitnessMode,
    ) -> TfResult<Self> {
        if scale_size < 2 {
            return Err(TemperError::Validation(format!(
                "scale size must be at least 2 to measure intervals, got {}",
                scale_size
            )));
        }
        Ok(Self {
            targets,
            scale_size,
            mode,
        })
    }

    pub fn from_store(store: &IntervalTargetStore, mode: FitnessMode) -> TfResult<Self> {
        Self::new(store.targets().to_vec(), store.scale_size(), mode)
    }

    #[inline(always)]
    pub fn evaluate(&self, genes: &[f64; 2]) -> f64 {
        engine::evaluate_with_mode(genes, &self.targets, self.scale_size, self.mode)
    }

    pub fn score_details(&self, genes: &[f64; 2]) -> ScoreDetails {
        engine::score_details(genes, &self.targets, self.scale_size, self.mode)
    }

    pub fn tonic_error_matrix(&self, genes: &[f64; 2]) -> Vec<Vec<f64>> {
        engine::tonic_error_matrix(genes, &self.targets, self.scale_size)
    }
}
