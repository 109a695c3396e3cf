use super::crossover::crossover_blend;
use super::initialization::{initial_population, random_genes};
use super::mutation::mutate;
use super::selection::tournament;
use super::{GeneBounds, Individual};
use crate::config::{Config, SearchParams};
use crate::error::TfResult;
use crate::ratio::BoundaryRatio;
use crate::scale::{build_scale_with_names, SolverOutput};
use crate::scorer::FitnessEvaluator;
use crate::targets::IntervalTarget;
use fastrand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    pub params: SearchParams,
    pub max_time: Option<Duration>,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            params: cfg.search.clone(),
            max_time: cfg.search.time_limit_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub best: Individual,
    pub output: SolverOutput,
    /// Best-so-far fitness; entry 0 is the initial population.
    pub history: Vec<f64>,
    pub generations: usize,
}

/// A trait for receiving updates during optimization.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, generation: usize, best_fitness: f64, best: &Individual) -> bool;
}

impl<F> ProgressCallback for F
where
    F: Fn(usize, f64, &Individual) -> bool + Send + Sync,
{
    fn on_progress(&self, generation: usize, best_fitness: f64, best: &Individual) -> bool {
        self(generation, best_fitness, best)
    }
}

/// Callback that never aborts.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _: usize, _: f64, _: &Individual) -> bool {
        true
    }
}

pub struct Optimizer {
    evaluator: Arc<FitnessEvaluator>,
    bounds: GeneBounds,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(
        evaluator: Arc<FitnessEvaluator>,
        boundary: &BoundaryRatio,
        options: OptimizationOptions,
    ) -> TfResult<Self> {
        options.params.validate()?;
        let bounds = GeneBounds::around_boundary(boundary, options.params.period_stretch_cents);
        Ok(Self {
            evaluator,
            bounds,
            options,
        })
    }

    pub fn bounds(&self) -> &GeneBounds {
        &self.bounds
    }

    fn evaluate_all(&self, genes: Vec<[f64; 2]>) -> Vec<Individual> {
        genes
            .into_par_iter()
            .map(|g| Individual {
                genes: g,
                fitness: self.evaluator.evaluate(&g),
            })
            .collect()
    }

    fn breed(&self, population: &[Individual], rng: &mut Rng) -> Vec<[f64; 2]> {
        let p = &self.options.params;
        let elites = p.elite_count.min(population.len());
        let open = p.population_size.saturating_sub(elites);
        let immigrants = ((open as f64 * p.immigrant_rate).round() as usize).min(open);
        let sigmas = [p.period_sigma_cents, p.generator_sigma_cents];

        let mut children = Vec::with_capacity(open);
        for _ in 0..(open - immigrants) {
            let a = tournament(population, p.tournament_size, rng);
            let child = if rng.f64() < p.crossover_rate {
                let b = tournament(population, p.tournament_size, rng);
                crossover_blend(&a.genes, &b.genes, p.blend_alpha, &self.bounds, rng)
            } else {
                a.genes
            };
            children.push(mutate(child, p.mutation_rate, sigmas, &self.bounds, rng));
        }
        for _ in 0..immigrants {
            children.push(random_genes(rng, &self.bounds));
        }
        children
    }

    /// Elites carried unchanged plus evaluated children, sorted best first.
    fn next_generation(&self, population: &[Individual], rng: &mut Rng) -> Vec<Individual> {
        let children = self.breed(population, rng);
        let elites = self.options.params.elite_count.min(population.len());
        let mut next: Vec<Individual> = population[..elites].to_vec();
        next.extend(self.evaluate_all(children));
        sort_by_fitness(&mut next);
        next
    }

    pub fn run<CB: ProgressCallback>(&self, seed: Option<u64>, callback: CB) -> TfResult<SearchResult> {
        let p = &self.options.params;
        let mut rng = match seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        };

        info!(
            "Starting search: {} targets, N={}, population {}, period {:.3}..{:.3}",
            self.evaluator.targets.len(),
            self.evaluator.scale_size,
            p.population_size,
            self.bounds.period_min,
            self.bounds.period_max
        );

        let mut population =
            self.evaluate_all(initial_population(&mut rng, &self.bounds, p.population_size));
        sort_by_fitness(&mut population);

        let mut best = population[0];
        let mut history = vec![best.fitness];
        let mut last_improvement = best.fitness;
        let mut stale = 0;
        let mut generations = 0;
        let start_time = Instant::now();

        for generation in 1..=p.max_generations {
            if best.fitness == 0.0 {
                debug!("Exact match found, stopping at generation {}", generation - 1);
                break;
            }
            if let Some(limit) = self.options.max_time {
                if start_time.elapsed() >= limit {
                    info!("Time limit of {:?} reached at generation {}", limit, generation - 1);
                    break;
                }
            }

            population = self.next_generation(&population, &mut rng);
            generations = generation;

            if population[0].fitness < best.fitness {
                best = population[0];
            }
            history.push(best.fitness);

            // INF - INF is NaN and never counts as progress
            if last_improvement - best.fitness > p.patience_threshold {
                last_improvement = best.fitness;
                stale = 0;
            } else {
                stale += 1;
            }

            debug!(
                "Gen {:>4}: best {:.6} [{:.4}, {:.4}]",
                generation,
                best.fitness,
                best.period(),
                best.generator()
            );

            if !callback.on_progress(generation, best.fitness, &best) {
                info!("Search aborted by callback at generation {}", generation);
                break;
            }
            if stale >= p.patience {
                debug!("No improvement for {} generations", stale);
                break;
            }
        }

        info!(
            "Search finished after {} generations: fitness {:.6}, period {:.4}, generator {:.4}",
            generations,
            best.fitness,
            best.period(),
            best.generator()
        );

        let output =
            build_scale_with_names(best.period(), best.generator(), self.evaluator.scale_size)?;
        Ok(SearchResult {
            best,
            output,
            history,
            generations,
        })
    }
}

fn sort_by_fitness(population: &mut [Individual]) {
    population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
}

/// One-shot search over a target list.
pub fn search(
    targets: &[IntervalTarget],
    scale_size: usize,
    boundary: &BoundaryRatio,
    config: &Config,
    seed: Option<u64>,
) -> TfResult<SearchResult> {
    let evaluator = FitnessEvaluator::new(targets.to_vec(), scale_size, config.search.fitness_mode)?;
    let optimizer = Optimizer::new(Arc::new(evaluator), boundary, OptimizationOptions::from(config))?;
    optimizer.run(seed, NoProgress)
}
