use super::mutation::repair;
use super::GeneBounds;
use crate::scale::circular_diff;
use fastrand::Rng;

#[inline(always)]
fn blend(a: f64, b: f64, alpha: f64, rng: &mut Rng) -> f64 {
    let lo = a.min(b);
    let hi = a.max(b);
    let d = hi - lo;
    let min = lo - alpha * d;
    let max = hi + alpha * d;
    min + rng.f64() * (max - min)
}

// BLX-alpha blend crossover.
pub fn crossover_blend(
    p1: &[f64; 2],
    p2: &[f64; 2],
    alpha: f64,
    bounds: &GeneBounds,
    rng: &mut Rng,
) -> [f64; 2] {
    let period = blend(p1[0], p2[0], alpha, rng);

    // Generators live on a circle: 10 and 1190 cents are neighbours, so blend
    // p2's generator from its nearest copy to p1's.
    let g2_aligned = p1[1] + circular_diff(p2[1], p1[1], p1[0]);
    let generator = blend(p1[1], g2_aligned, alpha, rng);

    repair([period, generator], bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::BoundaryRatio;
    use proptest::prelude::*;

    fn octave_bounds() -> GeneBounds {
        GeneBounds::around_boundary(&BoundaryRatio::OCTAVE, 15.0)
    }

    #[test]
    fn test_identical_parents_give_identical_child() {
        let mut rng = Rng::with_seed(42);
        let p = [1200.0, 701.955];
        let child = crossover_blend(&p, &p, 0.25, &octave_bounds(), &mut rng);
        assert_eq!(child, p);
    }

    #[test]
    fn test_generator_blends_across_wraparound() {
        let mut rng = Rng::with_seed(42);
        let p1 = [1200.0, 10.0];
        let p2 = [1200.0, 1190.0];
        for _ in 0..100 {
            let child = crossover_blend(&p1, &p2, 0.0, &octave_bounds(), &mut rng);
            let g = child[1];
            assert!(g <= 10.0 || g >= 1190.0, "child generator {} left the arc", g);
        }
    }

    proptest! {
        #[test]
        fn prop_child_within_bounds(
            seed in any::<u64>(),
            p1 in 1185.0..1215.0f64,
            g1 in 0.0..1185.0f64,
            p2 in 1185.0..1215.0f64,
            g2 in 0.0..1185.0f64,
        ) {
            let mut rng = Rng::with_seed(seed);
            let bounds = octave_bounds();
            let child = crossover_blend(&[p1, g1], &[p2, g2], 0.5, &bounds, &mut rng);
            prop_assert!(child[0] >= bounds.period_min && child[0] <= bounds.period_max);
            prop_assert!(child[1] >= 0.0 && child[1] < child[0]);
        }
    }
}
