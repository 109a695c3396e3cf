use crate::error::{TemperError, TfResult};
use crate::scorer::FitnessMode;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub dissonance: DissonanceParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    // === POPULATION ===
    #[arg(long, default_value_t = 96)]
    pub population_size: usize,
    #[arg(long, default_value_t = 400)]
    pub max_generations: usize,
    #[arg(long, default_value_t = 60)]
    pub patience: usize,
    #[arg(long, default_value_t = 1e-6)]
    pub patience_threshold: f64,

    // === OPERATORS ===
    #[arg(long, default_value_t = 2)]
    pub elite_count: usize,
    #[arg(long, default_value_t = 3)]
    pub tournament_size: usize,
    #[arg(long, default_value_t = 0.9)]
    pub crossover_rate: f64,
    #[arg(long, default_value_t = 0.25)]
    pub blend_alpha: f64,
    #[arg(long, default_value_t = 0.35)]
    pub mutation_rate: f64,
    #[arg(long, default_value_t = 2.0)]
    pub period_sigma_cents: f64,
    #[arg(long, default_value_t = 12.0)]
    pub generator_sigma_cents: f64,
    #[arg(long, default_value_t = 0.05)]
    pub immigrant_rate: f64,

    // === GENE RANGES ===
    // Allowed stretch/compression of the period around the boundary.
    #[arg(long, default_value_t = 15.0)]
    pub period_stretch_cents: f64,

    #[arg(long, value_enum, default_value_t = FitnessMode::Root)]
    pub fitness_mode: FitnessMode,

    /// Wall-clock limit for one search, in seconds.
    #[arg(long)]
    pub time_limit_secs: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 96,
            max_generations: 400,
            patience: 60,
            patience_threshold: 1e-6,
            elite_count: 2,
            tournament_size: 3,
            crossover_rate: 0.9,
            blend_alpha: 0.25,
            mutation_rate: 0.35,
            period_sigma_cents: 2.0,
            generator_sigma_cents: 12.0,
            immigrant_rate: 0.05,
            period_stretch_cents: 15.0,
            fitness_mode: FitnessMode::Root,
            time_limit_secs: None,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> TfResult<()> {
        if self.population_size == 0 {
            return Err(TemperError::Config("population_size must be > 0".into()));
        }
        if self.max_generations == 0 {
            return Err(TemperError::Config("max_generations must be > 0".into()));
        }
        if self.elite_count >= self.population_size {
            return Err(TemperError::Config(format!(
                "elite_count ({}) must be smaller than population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(TemperError::Config("tournament_size must be > 0".into()));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("immigrant_rate", self.immigrant_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(TemperError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        if self.period_stretch_cents.is_nan() || self.period_stretch_cents < 0.0 {
            return Err(TemperError::Config(
                "period_stretch_cents must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DissonanceParams {
    #[arg(long, default_value_t = 261.63)]
    pub fundamental_hz: f64,
    #[arg(long, default_value_t = 7)]
    pub partial_count: usize,
    #[arg(long, default_value_t = 0.88)]
    pub partial_rolloff: f64,
    #[arg(long, default_value_t = 1.0)]
    pub start_ratio: f64,
    #[arg(long, default_value_t = 2.0)]
    pub end_ratio: f64,
    #[arg(long, default_value_t = 1200)]
    pub curve_steps: usize,
}

impl Default for DissonanceParams {
    fn default() -> Self {
        Self {
            fundamental_hz: 261.63,
            partial_count: 7,
            partial_rolloff: 0.88,
            start_ratio: 1.0,
            end_ratio: 2.0,
            curve_steps: 1200,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays only the values the user typed on the command line, so a
    /// config file keeps precedence over clap defaults.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search, population_size);
        update_if_present!(search, max_generations);
        update_if_present!(search, patience);
        update_if_present!(search, patience_threshold);
        update_if_present!(search, elite_count);
        update_if_present!(search, tournament_size);
        update_if_present!(search, crossover_rate);
        update_if_present!(search, blend_alpha);
        update_if_present!(search, mutation_rate);
        update_if_present!(search, period_sigma_cents);
        update_if_present!(search, generator_sigma_cents);
        update_if_present!(search, immigrant_rate);
        update_if_present!(search, period_stretch_cents);
        update_if_present!(search, fitness_mode);
        update_if_present!(search, time_limit_secs);

        update_if_present!(dissonance, fundamental_hz);
        update_if_present!(dissonance, partial_count);
        update_if_present!(dissonance, partial_rolloff);
        update_if_present!(dissonance, start_ratio);
        update_if_present!(dissonance, end_ratio);
        update_if_present!(dissonance, curve_steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_params_validate() {
        assert!(SearchParams::default().validate().is_ok());
    }

    #[test]
    fn test_elite_must_fit_population() {
        let params = SearchParams {
            population_size: 4,
            elite_count: 4,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(TemperError::Config(_))));
    }

    #[test]
    fn test_rates_bounded() {
        let params = SearchParams {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
