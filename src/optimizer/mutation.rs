use super::GeneBounds;
use crate::scale::wrap;
use fastrand::Rng;
use std::f64::consts::TAU;

/// Standard normal sample (Box-Muller).
pub fn gaussian(rng: &mut Rng) -> f64 {
    let u1 = 1.0 - rng.f64(); // (0, 1], keeps ln finite
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Clamps the period into range and wraps the generator into `[0, period)`.
pub fn repair(genes: [f64; 2], bounds: &GeneBounds) -> [f64; 2] {
    let period = if genes[0].is_finite() {
        genes[0].clamp(bounds.period_min, bounds.period_max)
    } else {
        bounds.period_center
    };
    let generator = if genes[1].is_finite() {
        wrap(genes[1], period)
    } else {
        0.0
    };
    [period, generator]
}

/// Per-gene Gaussian mutation with probability `rate`.
pub fn mutate(
    genes: [f64; 2],
    rate: f64,
    sigmas: [f64; 2],
    bounds: &GeneBounds,
    rng: &mut Rng,
) -> [f64; 2] {
    let mut out = genes;
    for (gene, sigma) in out.iter_mut().zip(sigmas) {
        if rng.f64() < rate {
            *gene += gaussian(rng) * sigma;
        }
    }
    repair(out, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::BoundaryRatio;

    #[test]
    fn test_gaussian_moments() {
        let mut rng = Rng::with_seed(99);
        let samples: Vec<f64> = (0..20_000).map(|_| gaussian(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.05, "mean {}", mean);
        assert!((var - 1.0).abs() < 0.05, "variance {}", var);
    }

    #[test]
    fn test_zero_rate_only_repairs() {
        let mut rng = Rng::with_seed(5);
        let bounds = GeneBounds::around_boundary(&BoundaryRatio::OCTAVE, 10.0);
        let out = mutate([1200.0, 1900.0], 0.0, [5.0, 5.0], &bounds, &mut rng);
        assert_eq!(out, [1200.0, 700.0]);
    }

    #[test]
    fn test_repair_clamps_period() {
        let bounds = GeneBounds::around_boundary(&BoundaryRatio::OCTAVE, 10.0);
        assert_eq!(repair([1300.0, 100.0], &bounds)[0], 1210.0);
        assert_eq!(repair([f64::NAN, 100.0], &bounds)[0], 1200.0);
    }
}
