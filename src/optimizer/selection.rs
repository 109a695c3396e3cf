use super::Individual;
use fastrand::Rng;

/// Tournament selection over a population sorted by ascending fitness:
/// the lowest sampled index is the fittest contestant.
pub fn tournament<'a>(population: &'a [Individual], size: usize, rng: &mut Rng) -> &'a Individual {
    let len = population.len();
    let winner = (0..size.max(1))
        .map(|_| rng.usize(0..len))
        .min()
        .unwrap_or(0);
    &population[winner]
}
