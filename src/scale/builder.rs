use crate::consts::CHROMATIC_NAMES;
use crate::error::{TemperError, TfResult};
use serde::{Deserialize, Serialize};

/// Wraps `x` into `[0, m)`.
#[inline(always)]
pub fn wrap(x: f64, m: f64) -> f64 {
    ((x % m) + m) % m
}

/// Signed difference `a - b` folded into `[-m/2, m/2]`.
#[inline(always)]
pub fn circular_diff(a: f64, b: f64, m: f64) -> f64 {
    let d = wrap(a - b, m);
    if d > m / 2.0 {
        d - m
    } else {
        d
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverInput {
    pub cycle_cents: f64,
    pub scale_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleNote {
    pub cents_from_root: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

/// A rank-2 scale: `scale_size` ascending notes starting at the tonic (0 cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverOutput {
    pub input: SolverInput,
    pub notes: Vec<ScaleNote>,
}

impl SolverOutput {
    pub fn cents(&self) -> Vec<f64> {
        self.notes.iter().map(|n| n.cents_from_root).collect()
    }
}

/// Stacks the generator `scale_size` times modulo the period and sorts the
/// result. Index 0 is always exactly 0.0.
///
/// Callers must have validated the inputs (see [`build_scale`]).
pub fn scale_cents(period_cents: f64, generator_cents: f64, scale_size: usize) -> Vec<f64> {
    let mut cents: Vec<f64> = (0..scale_size)
        .map(|k| wrap(k as f64 * generator_cents, period_cents))
        .collect();
    cents.sort_by(f64::total_cmp);
    cents
}

fn validate(period_cents: f64, generator_cents: f64, scale_size: usize) -> TfResult<()> {
    if scale_size == 0 {
        return Err(TemperError::Validation(
            "scale size must be at least 1".to_string(),
        ));
    }
    if !period_cents.is_finite() || period_cents <= 0.0 {
        return Err(TemperError::Validation(format!(
            "period must be positive and finite, got {}",
            period_cents
        )));
    }
    if !generator_cents.is_finite() {
        return Err(TemperError::Validation(format!(
            "generator must be finite, got {}",
            generator_cents
        )));
    }
    Ok(())
}

pub fn build_scale(
    period_cents: f64,
    generator_cents: f64,
    scale_size: usize,
) -> TfResult<SolverOutput> {
    validate(period_cents, generator_cents, scale_size)?;
    let notes = scale_cents(period_cents, generator_cents, scale_size)
        .into_iter()
        .map(|c| ScaleNote {
            cents_from_root: c,
            name: None,
        })
        .collect();

    Ok(SolverOutput {
        input: SolverInput {
            cycle_cents: period_cents,
            scale_size,
        },
        notes,
    })
}

/// Like [`build_scale`], but labels 12-note scales with the nearest chromatic
/// name. Other sizes come back unnamed.
pub fn build_scale_with_names(
    period_cents: f64,
    generator_cents: f64,
    scale_size: usize,
) -> TfResult<SolverOutput> {
    let mut output = build_scale(period_cents, generator_cents, scale_size)?;
    if scale_size == CHROMATIC_NAMES.len() {
        for note in &mut output.notes {
            let step = (12.0 * note.cents_from_root / period_cents).round() as usize % 12;
            note.name = Some(CHROMATIC_NAMES[step].to_string());
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_range() {
        assert_eq!(wrap(-100.0, 1200.0), 1100.0);
        assert_eq!(wrap(1200.0, 1200.0), 0.0);
        assert_eq!(wrap(2500.0, 1200.0), 100.0);
    }

    #[test]
    fn test_circular_diff_folds() {
        assert!((circular_diff(1190.0, 10.0, 1200.0) - -20.0).abs() < 1e-9);
        assert!((circular_diff(10.0, 1190.0, 1200.0) - 20.0).abs() < 1e-9);
        assert!((circular_diff(500.0, 400.0, 1200.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(build_scale(1200.0, 700.0, 0).is_err());
        assert!(build_scale(0.0, 700.0, 5).is_err());
        assert!(build_scale(f64::NAN, 700.0, 5).is_err());
    }
}
