use crate::config::Config;
use crate::dissonance::{
    find_local_minima, generate_dissonance_curve, DissonanceCurveData, Spectrum,
};
use crate::error::TfResult;
use crate::optimizer::{Individual, OptimizationOptions, Optimizer, ProgressCallback, SearchResult};
use crate::ratio::BoundaryRatio;
use crate::scale::{build_scale_with_names, export_rank2_to_scala, ScalaExport, SolverOutput};
use crate::scorer::{FitnessEvaluator, ScoreDetails};
use crate::targets::{IntervalTarget, IntervalTargetStore, TargetPatch};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Everything a front end needs to show for one genome.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub genes: [f64; 2],
    pub details: ScoreDetails,
    pub output: SolverOutput,
    /// Signed error of every target (rows) from every tonic (columns).
    pub heatmap: Vec<Vec<f64>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DissonanceReport {
    pub curve: DissonanceCurveData,
    pub minima: Vec<f64>,
}

/// Owned session state: the target list plus the configuration used to solve it.
///
/// There is no process-wide state; callers that share a session across
/// threads wrap it themselves.
#[derive(Debug, Clone, Default)]
pub struct TemperSession {
    store: IntervalTargetStore,
    config: Config,
}

impl TemperSession {
    pub fn new(config: Config) -> Self {
        Self {
            store: IntervalTargetStore::default(),
            config,
        }
    }

    pub fn with_store(store: IntervalTargetStore, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &IntervalTargetStore {
        &self.store
    }

    pub fn targets(&self) -> &[IntervalTarget] {
        self.store.targets()
    }

    pub fn boundary(&self) -> BoundaryRatio {
        self.store.boundary()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn set_boundary_ratio(&mut self, numerator: u64, denominator: u64) -> TfResult<()> {
        self.store.set_boundary_ratio(numerator, denominator)
    }

    pub fn set_scale_size(&mut self, scale_size: usize) {
        self.store.set_scale_size(scale_size);
    }

    /// Returns the new target id. On error the list is unchanged.
    pub fn add_interval(
        &mut self,
        raw_ratio_text: &str,
        degree: usize,
        tolerance_cents: f64,
        priority: f64,
        max_error_cents_text: &str,
    ) -> TfResult<u64> {
        self.store.add_interval(
            raw_ratio_text,
            degree,
            tolerance_cents,
            priority,
            max_error_cents_text,
        )
    }

    pub fn update_interval(&mut self, id: u64, patch: TargetPatch) -> TfResult<()> {
        self.store.update_interval(id, patch)
    }

    pub fn remove_interval(&mut self, id: u64) {
        self.store.remove_interval(id);
    }

    pub fn evaluator(&self) -> TfResult<FitnessEvaluator> {
        FitnessEvaluator::from_store(&self.store, self.config.search.fitness_mode)
    }

    pub fn solve<CB: ProgressCallback>(
        &self,
        seed: Option<u64>,
        callback: CB,
    ) -> TfResult<SearchResult> {
        info!(
            "Solving {} targets against {} with N={}",
            self.store.len(),
            self.store.boundary(),
            self.store.scale_size()
        );
        let optimizer = Optimizer::new(
            Arc::new(self.evaluator()?),
            &self.store.boundary(),
            OptimizationOptions::from(&self.config),
        )?;
        optimizer.run(seed, callback)
    }

    pub fn evaluate(&self, genes: [f64; 2]) -> TfResult<EvaluationReport> {
        let evaluator = self.evaluator()?;
        let output = build_scale_with_names(genes[0], genes[1], self.store.scale_size())?;
        Ok(EvaluationReport {
            genes,
            details: evaluator.score_details(&genes),
            output,
            heatmap: evaluator.tonic_error_matrix(&genes),
        })
    }

    pub fn export_scala(&self, individual: &Individual, name: &str) -> TfResult<ScalaExport> {
        export_rank2_to_scala(&individual.genes, self.store.scale_size(), name)
    }

    /// Sweeps `sweep` against `reference` over the configured ratio range.
    pub fn dissonance_curve(
        &self,
        reference: &Spectrum,
        sweep: &Spectrum,
    ) -> TfResult<DissonanceReport> {
        let p = &self.config.dissonance;
        let curve =
            generate_dissonance_curve(reference, sweep, p.start_ratio, p.end_ratio, p.curve_steps)?;
        let minima = find_local_minima(&curve);
        Ok(DissonanceReport { curve, minima })
    }
}
