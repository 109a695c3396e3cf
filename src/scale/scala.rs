use super::builder::wrap;
use crate::error::{TemperError, TfResult};
use serde::{Deserialize, Serialize};

/// Scala-style tuning record: ascending pitches in cents, excluding the tonic
/// and ending exactly on the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalaExport {
    pub count: usize,
    pub pitches: Vec<f64>,
    pub name: String,
}

/// Converts a `[period, generator]` genome into a Scala pitch list.
///
/// This is deliberately not the same shape as a [`SolverOutput`](super::SolverOutput):
/// the tonic is implied and the closing period is listed. Generator multiples
/// landing exactly on the tonic or on each other are dropped, so `count`
/// equals `scale_size` unless such coincidences occur.
pub fn export_rank2_to_scala(genes: &[f64; 2], scale_size: usize, name: &str) -> TfResult<ScalaExport> {
    let [period, generator] = *genes;
    if scale_size == 0 {
        return Err(TemperError::Validation(
            "scale size must be at least 1".to_string(),
        ));
    }
    if !period.is_finite() || period <= 0.0 || !generator.is_finite() {
        return Err(TemperError::Validation(format!(
            "cannot export genome [{}, {}]",
            period, generator
        )));
    }

    let mut pitches: Vec<f64> = (1..scale_size)
        .map(|k| wrap(k as f64 * generator, period))
        .filter(|&p| p != 0.0)
        .collect();
    pitches.sort_by(f64::total_cmp);
    pitches.dedup();
    pitches.push(period);

    Ok(ScalaExport {
        count: pitches.len(),
        pitches,
        name: name.to_string(),
    })
}
