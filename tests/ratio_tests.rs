use proptest::prelude::*;
use rstest::rstest;
use temperforge::error::TemperError;
use temperforge::ratio::{
    approximate_ratio, normalize_ratio_to_boundary, BoundaryRatio, Fraction,
};

#[rstest]
#[case(81, 16, 81, 64, true)] // Pythagorean third
#[case(3, 2, 3, 2, false)]
#[case(2, 1, 1, 1, true)] // octave folds to unison
#[case(1, 1, 1, 1, false)]
#[case(2, 3, 4, 3, true)]
#[case(6, 4, 3, 2, false)] // reduced, but never moved
#[case(1, 8, 1, 1, true)]
fn test_octave_normalization(
    #[case] n: u64,
    #[case] d: u64,
    #[case] en: u64,
    #[case] ed: u64,
    #[case] adjusted: bool,
) {
    let r = normalize_ratio_to_boundary(n, d, &BoundaryRatio::OCTAVE).unwrap();
    assert_eq!(r.fraction, Fraction { n: en, d: ed });
    assert_eq!(r.adjusted, adjusted);
}

#[rstest]
#[case(5, 1, 5, 3)]
#[case(9, 4, 9, 4)]
#[case(1, 2, 3, 2)]
fn test_tritave_normalization(#[case] n: u64, #[case] d: u64, #[case] en: u64, #[case] ed: u64) {
    let r = normalize_ratio_to_boundary(n, d, &BoundaryRatio::TRITAVE).unwrap();
    assert_eq!(r.fraction, Fraction { n: en, d: ed });
}

#[rstest]
#[case(0, 1)]
#[case(3, 0)]
#[case(0, 0)]
fn test_zero_input_fails(#[case] n: u64, #[case] d: u64) {
    let err = normalize_ratio_to_boundary(n, d, &BoundaryRatio::OCTAVE).unwrap_err();
    assert!(matches!(err, TemperError::InvalidRatio { .. }));
}

#[test]
fn test_cap_leaves_huge_ratio_unnormalized() {
    // 2^20 needs 20 halvings; only 12 are applied.
    let r = normalize_ratio_to_boundary(1 << 20, 1, &BoundaryRatio::OCTAVE).unwrap();
    assert!(r.adjusted);
    assert_eq!(r.fraction, Fraction { n: 1 << 8, d: 1 });
}

#[test]
fn test_ratio_above_i64_range_normalizes() {
    let n = 10_000_000_000_000_000_000u64;
    let r = normalize_ratio_to_boundary(n, 1, &BoundaryRatio::OCTAVE).unwrap();
    assert!(r.adjusted);
    // 12 halvings leave 5^19 * 2^7
    assert_eq!(r.fraction, Fraction { n: n >> 12, d: 1 });
}

#[rstest]
#[case(2, 1, 2, 1)]
#[case(1, 1, 2, 1)] // unison boundary bumped
#[case(2, 3, 4, 3)]
#[case(6, 2, 3, 1)] // reduced
#[case(4, 0, 4, 1)] // zero denominator treated as 1
fn test_boundary_correction(#[case] n: u64, #[case] d: u64, #[case] en: u64, #[case] ed: u64) {
    let b = BoundaryRatio::new(n, d);
    assert_eq!((b.numerator(), b.denominator()), (en, ed));
    assert!(b.numerator() > b.denominator());
}

#[test]
fn test_boundary_cents() {
    assert!((BoundaryRatio::OCTAVE.cents() - 1200.0).abs() < 1e-9);
    assert!((BoundaryRatio::TRITAVE.cents() - 1901.955).abs() < 1e-3);
}

#[rstest]
#[case(1.25, 16, 5, 4)]
#[case(1.3333, 16, 4, 3)]
#[case(std::f64::consts::SQRT_2, 12, 17, 12)]
fn test_approximate_ratio(#[case] v: f64, #[case] max_den: u64, #[case] n: u64, #[case] d: u64) {
    assert_eq!(approximate_ratio(v, max_den).unwrap(), Fraction { n, d });
}

proptest! {
    #[test]
    fn prop_octave_bound(n in 1u64..2048, d in 1u64..2048) {
        let r = normalize_ratio_to_boundary(n, d, &BoundaryRatio::OCTAVE).unwrap();
        let v = r.fraction.value();
        prop_assert!(v >= 1.0 && v < 2.0, "{}/{} -> {}", n, d, r.fraction);
    }

    #[test]
    fn prop_result_is_reduced(n in 1u64..5000, d in 1u64..5000) {
        let r = normalize_ratio_to_boundary(n, d, &BoundaryRatio::TRITAVE).unwrap();
        prop_assert_eq!(r.fraction, r.fraction.reduced());
    }
}
