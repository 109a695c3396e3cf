use crate::consts::{CENTS_PER_OCTAVE, NORMALIZE_MAX_ITERATIONS};
use crate::error::{TemperError, TfResult};
use num_integer::gcd;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

static RATIO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s*/\s*([0-9]+)$").expect("static ratio pattern"));

#[inline]
pub fn ratio_to_cents(ratio: f64) -> f64 {
    CENTS_PER_OCTAVE * ratio.log2()
}

#[inline]
pub fn cents_to_ratio(cents: f64) -> f64 {
    (cents / CENTS_PER_OCTAVE).exp2()
}

/// An exact just-intonation ratio. Not necessarily in lowest terms until it
/// passes through [`Fraction::reduced`] or the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    pub n: u64,
    pub d: u64,
}

impl Fraction {
    pub const UNISON: Fraction = Fraction { n: 1, d: 1 };

    pub fn new(n: u64, d: u64) -> TfResult<Self> {
        if n == 0 || d == 0 {
            return Err(TemperError::InvalidRatio { n, d });
        }
        Ok(Self { n, d })
    }

    pub fn reduced(self) -> Self {
        let g = gcd(self.n, self.d);
        if g <= 1 {
            return self;
        }
        Self {
            n: self.n / g,
            d: self.d / g,
        }
    }

    pub fn value(&self) -> f64 {
        self.n as f64 / self.d as f64
    }

    pub fn cents(&self) -> f64 {
        ratio_to_cents(self.value())
    }

    /// Exact comparison against `num/den` by cross multiplication.
    fn cmp_ratio(&self, num: u64, den: u64) -> Ordering {
        (self.n as u128 * den as u128).cmp(&(num as u128 * self.d as u128))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

/// The equivalence interval every target is reduced into.
/// Always satisfies `numerator > denominator >= 1` and is kept in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRatio {
    numerator: u64,
    denominator: u64,
}

impl Default for BoundaryRatio {
    fn default() -> Self {
        Self::OCTAVE
    }
}

impl BoundaryRatio {
    pub const OCTAVE: BoundaryRatio = BoundaryRatio {
        numerator: 2,
        denominator: 1,
    };
    pub const TRITAVE: BoundaryRatio = BoundaryRatio {
        numerator: 3,
        denominator: 1,
    };

    /// Builds a boundary, correcting degenerate input instead of failing:
    /// a zero denominator becomes 1 and a numerator that does not exceed the
    /// denominator is bumped to `denominator + 1`.
    pub fn new(numerator: u64, denominator: u64) -> Self {
        let denominator = denominator.max(1);
        let mut numerator = numerator;
        if numerator <= denominator {
            warn!(
                "Boundary {}/{} is not wider than a unison, using {}/{}",
                numerator,
                denominator,
                denominator + 1,
                denominator
            );
            numerator = denominator + 1;
        }
        let g = gcd(numerator, denominator);
        Self {
            numerator: numerator / g,
            denominator: denominator / g,
        }
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    pub fn cents(&self) -> f64 {
        ratio_to_cents(self.value())
    }

    /// Parses `a/b` text into a (corrected) boundary.
    pub fn parse(text: &str) -> TfResult<Self> {
        let (n, d) = parse_ratio_text(text)?;
        Ok(Self::new(n, d))
    }
}

impl fmt::Display for BoundaryRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRatio {
    pub fraction: Fraction,
    pub adjusted: bool,
}

/// Strictly parses `integer/integer` text (whitespace allowed only around the slash).
pub fn parse_ratio_text(text: &str) -> TfResult<(u64, u64)> {
    let caps = RATIO_PATTERN
        .captures(text)
        .ok_or_else(|| TemperError::InvalidRatioSyntax(text.to_string()))?;

    let n = caps[1]
        .parse::<u64>()
        .map_err(|_| TemperError::InvalidRatioSyntax(text.to_string()))?;
    let d = caps[2]
        .parse::<u64>()
        .map_err(|_| TemperError::InvalidRatioSyntax(text.to_string()))?;
    Ok((n, d))
}

/// Reduces `n/d` into `[1, boundary)` by repeatedly dividing or multiplying by
/// the boundary, at most [`NORMALIZE_MAX_ITERATIONS`] times in total.
///
/// Ratios that would need more steps are returned un-normalized past the cap;
/// this is logged, not an error.
pub fn normalize_ratio_to_boundary(
    n: u64,
    d: u64,
    boundary: &BoundaryRatio,
) -> TfResult<NormalizedRatio> {
    if n == 0 || d == 0 {
        return Err(TemperError::InvalidRatio { n, d });
    }

    let (bn, bd) = (boundary.numerator, boundary.denominator);
    let mut frac = Fraction { n, d }.reduced();
    let mut adjusted = false;
    let mut loops = 0;

    let overflow = || TemperError::RatioOverflow { n, d };

    while frac.cmp_ratio(bn, bd) != Ordering::Less && loops < NORMALIZE_MAX_ITERATIONS {
        frac = Fraction {
            n: frac.n.checked_mul(bd).ok_or_else(overflow)?,
            d: frac.d.checked_mul(bn).ok_or_else(overflow)?,
        }
        .reduced();
        loops += 1;
        adjusted = true;
    }

    while frac.cmp_ratio(1, 1) == Ordering::Less && loops < NORMALIZE_MAX_ITERATIONS {
        frac = Fraction {
            n: frac.n.checked_mul(bn).ok_or_else(overflow)?,
            d: frac.d.checked_mul(bd).ok_or_else(overflow)?,
        }
        .reduced();
        loops += 1;
        adjusted = true;
    }

    if loops >= NORMALIZE_MAX_ITERATIONS
        && (frac.cmp_ratio(bn, bd) != Ordering::Less || frac.cmp_ratio(1, 1) == Ordering::Less)
    {
        warn!(
            "Ratio {}/{} not normalized into [1, {}) after {} steps; left at {}",
            n, d, boundary, NORMALIZE_MAX_ITERATIONS, frac
        );
    } else if adjusted {
        debug!("Normalized {}/{} to {} within {}", n, d, frac, boundary);
    }

    Ok(NormalizedRatio {
        fraction: frac,
        adjusted,
    })
}

/// Closest fraction to `value` with denominator at most `max_denominator`.
///
/// Walks the continued-fraction convergents, then checks the last admissible
/// semiconvergent. Values too small to round to a positive fraction give
/// `1/max_denominator`.
pub fn approximate_ratio(value: f64, max_denominator: u64) -> TfResult<Fraction> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TemperError::Validation(format!(
            "cannot approximate non-positive value {}",
            value
        )));
    }
    let max_denominator = max_denominator.max(1);

    // p0/q0 and p1/q1 are the last two convergents
    let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
    let mut x = value;
    loop {
        let a = x.floor() as u64;
        let Some(q2) = a.checked_mul(q1).and_then(|v| v.checked_add(q0)) else {
            break;
        };
        if q2 > max_denominator {
            break;
        }
        let Some(p2) = a.checked_mul(p1).and_then(|v| v.checked_add(p0)) else {
            break;
        };
        (p0, q0, p1, q1) = (p1, q1, p2, q2);

        let rest = x - x.floor();
        if rest < 1e-12 {
            break;
        }
        x = 1.0 / rest;
    }

    let error = |n: u64, d: u64| (value - n as f64 / d as f64).abs();
    let mut best = (p1, q1);
    let k = (max_denominator - q0) / q1;
    if let (Some(sn), Some(sd)) = (
        k.checked_mul(p1).and_then(|v| v.checked_add(p0)),
        k.checked_mul(q1).and_then(|v| v.checked_add(q0)),
    ) {
        if k > 0 && error(sn, sd) < error(p1, q1) {
            best = (sn, sd);
        }
    }

    if best.0 == 0 {
        return Ok(Fraction {
            n: 1,
            d: max_denominator,
        });
    }
    Ok(Fraction {
        n: best.0,
        d: best.1,
    }
    .reduced())
}
