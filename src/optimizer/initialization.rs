use super::GeneBounds;
use fastrand::Rng;

pub fn random_genes(rng: &mut Rng, bounds: &GeneBounds) -> [f64; 2] {
    let span = bounds.period_max - bounds.period_min;
    let period = bounds.period_min + rng.f64() * span;
    let generator = rng.f64() * period;
    [period, generator]
}

/// Random population; the first genome uses the exact boundary period so an
/// unstretched solution is always on the table.
pub fn initial_population(rng: &mut Rng, bounds: &GeneBounds, size: usize) -> Vec<[f64; 2]> {
    let mut population: Vec<[f64; 2]> = (0..size).map(|_| random_genes(rng, bounds)).collect();
    if let Some(first) = population.first_mut() {
        first[0] = bounds.period_center;
        first[1] = rng.f64() * bounds.period_center;
    }
    population
}
