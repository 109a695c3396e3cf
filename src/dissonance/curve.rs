use super::spectrum::{calculate_interval_dissonance, Spectrum};
use crate::error::{TemperError, TfResult};
use crate::ratio::{approximate_ratio, ratio_to_cents, Fraction};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DissonanceCurveData {
    pub ratios: Vec<f64>,
    pub dissonance: Vec<f64>,
}

impl DissonanceCurveData {
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

/// A curve minimum with its nearest simple just ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumLabel {
    pub ratio: f64,
    pub fraction: Fraction,
    pub cents_error: f64,
}

/// Sweeps `sweep` against `reference` over `steps + 1` evenly spaced ratios.
pub fn generate_dissonance_curve(
    reference: &Spectrum,
    sweep: &Spectrum,
    start_ratio: f64,
    end_ratio: f64,
    steps: usize,
) -> TfResult<DissonanceCurveData> {
    if !start_ratio.is_finite() || start_ratio <= 0.0 {
        return Err(TemperError::Validation(format!(
            "start ratio must be positive, got {}",
            start_ratio
        )));
    }
    if !end_ratio.is_finite() || end_ratio < start_ratio {
        return Err(TemperError::Validation(format!(
            "end ratio {} must not be below start ratio {}",
            end_ratio, start_ratio
        )));
    }

    let increment = if steps == 0 {
        0.0
    } else {
        (end_ratio - start_ratio) / steps as f64
    };

    let (ratios, dissonance): (Vec<f64>, Vec<f64>) = (0..=steps)
        .into_par_iter()
        .map(|i| {
            let ratio = start_ratio + i as f64 * increment;
            (ratio, calculate_interval_dissonance(reference, &sweep.scaled(ratio)))
        })
        .unzip();

    Ok(DissonanceCurveData { ratios, dissonance })
}

/// Strict interior local minima. Endpoints are never reported.
pub fn find_local_minima(curve: &DissonanceCurveData) -> Vec<f64> {
    let d = &curve.dissonance;
    let len = d.len().min(curve.ratios.len());
    if len < 3 {
        return Vec::new();
    }
    (1..len - 1)
        .filter(|&i| d[i] < d[i - 1] && d[i] < d[i + 1])
        .map(|i| curve.ratios[i])
        .collect()
}

pub fn label_minima(minima: &[f64], max_denominator: u64) -> TfResult<Vec<MinimumLabel>> {
    minima
        .iter()
        .map(|&ratio| {
            let fraction = approximate_ratio(ratio, max_denominator)?;
            Ok(MinimumLabel {
                ratio,
                fraction,
                cents_error: ratio_to_cents(ratio) - fraction.cents(),
            })
        })
        .collect()
}
