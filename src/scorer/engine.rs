use super::types::{FitnessMode, ScoreDetails, TargetScore};
use crate::scale::{circular_diff, scale_cents, wrap};
use crate::targets::IntervalTarget;

/// Signed error of one target measured from one tonic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetError {
    pub step: usize,
    pub ideal: f64,
    pub actual: f64,
    pub error: f64,
}

#[inline(always)]
fn genes_are_valid(period: f64, generator: f64, scale_size: usize) -> bool {
    scale_size >= 2 && period.is_finite() && period > 0.0 && generator.is_finite()
}

/// Scale step a target is measured at. Never 0 (unison) or N (the period).
#[inline(always)]
pub fn target_step(ideal_cents: f64, period: f64, scale_size: usize) -> usize {
    let step_cents = period / scale_size as f64;
    let raw = (ideal_cents / step_cents).round();
    let max = (scale_size - 1) as f64;
    raw.clamp(1.0, max) as usize
}

/// Error of `ideal_cents` against the interval from `notes[tonic]` to
/// `notes[(tonic + step) mod N]`.
#[inline(always)]
pub fn target_error(notes: &[f64], period: f64, ideal_cents: f64, tonic: usize) -> TargetError {
    let n = notes.len();
    let step = target_step(ideal_cents, period, n);
    let upper = notes[(tonic + step) % n];
    let actual = wrap(upper - notes[tonic], period);
    let ideal = wrap(ideal_cents, period);
    TargetError {
        step,
        ideal,
        actual,
        error: circular_diff(actual, ideal, period),
    }
}

#[inline(always)]
fn exceeds_cap(t: &IntervalTarget, abs_err: f64) -> bool {
    matches!(t.max_error_cents, Some(cap) if abs_err > cap)
}

/// Root-only fitness: sum of `priority * err^2`, or `+inf` when any target
/// breaks its hard cap. Lower is better, 0 is a perfect match.
pub fn evaluate(genes: &[f64; 2], targets: &[IntervalTarget], scale_size: usize) -> f64 {
    evaluate_with_mode(genes, targets, scale_size, FitnessMode::Root)
}

pub fn evaluate_with_mode(
    genes: &[f64; 2],
    targets: &[IntervalTarget],
    scale_size: usize,
    mode: FitnessMode,
) -> f64 {
    let [period, generator] = *genes;
    if !genes_are_valid(period, generator, scale_size) {
        return f64::INFINITY;
    }
    let notes = scale_cents(period, generator, scale_size);

    let tonics = match mode {
        FitnessMode::Root => 1,
        FitnessMode::AllTonics => scale_size,
    };

    let mut total = 0.0;
    for t in targets {
        let ideal = t.ideal_cents();
        let mut sum = 0.0;
        for tonic in 0..tonics {
            let abs_err = target_error(&notes, period, ideal, tonic).error.abs();
            if exceeds_cap(t, abs_err) {
                return f64::INFINITY;
            }
            sum += t.priority * abs_err * abs_err;
        }
        total += sum / tonics as f64;
    }

    if total.is_nan() {
        f64::INFINITY
    } else {
        total
    }
}

/// Per-target breakdown measured from the tonic, for reports.
pub fn score_details(
    genes: &[f64; 2],
    targets: &[IntervalTarget],
    scale_size: usize,
    mode: FitnessMode,
) -> ScoreDetails {
    let [period, generator] = *genes;
    let fitness = evaluate_with_mode(genes, targets, scale_size, mode);
    if !genes_are_valid(period, generator, scale_size) {
        return ScoreDetails {
            fitness,
            disqualified: true,
            targets: Vec::new(),
        };
    }

    let notes = scale_cents(period, generator, scale_size);
    let targets: Vec<TargetScore> = targets
        .iter()
        .map(|t| {
            let e = target_error(&notes, period, t.ideal_cents(), 0);
            let abs_err = e.error.abs();
            TargetScore {
                id: t.id,
                degree: t.degree,
                ratio: t.fraction().to_string(),
                step: e.step,
                ideal_cents: e.ideal,
                actual_cents: e.actual,
                error_cents: e.error,
                contribution: t.priority * abs_err * abs_err,
                within_tolerance: abs_err <= t.tolerance_cents,
                disqualified: exceeds_cap(t, abs_err),
            }
        })
        .collect();

    ScoreDetails {
        fitness,
        disqualified: fitness.is_infinite(),
        targets,
    }
}

/// Signed error of every target (rows) from every tonic (columns).
pub fn tonic_error_matrix(
    genes: &[f64; 2],
    targets: &[IntervalTarget],
    scale_size: usize,
) -> Vec<Vec<f64>> {
    let [period, generator] = *genes;
    if !genes_are_valid(period, generator, scale_size) {
        return Vec::new();
    }
    let notes = scale_cents(period, generator, scale_size);
    targets
        .iter()
        .map(|t| {
            let ideal = t.ideal_cents();
            (0..scale_size)
                .map(|tonic| target_error(&notes, period, ideal, tonic).error)
                .collect()
        })
        .collect()
}
