use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Well-known rank-2 tunings, used as reference points by `validate`.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownTemperament {
    Equal12,
    Pythagorean,
    QuarterCommaMeantone,
    SeptimalMeantone,
    Schismatic,
    Superpyth,
    Mavila,
    Magic,
    Porcupine,
    BohlenPierce,
}

impl KnownTemperament {
    /// `[period, generator]` in cents.
    pub fn genes(&self) -> [f64; 2] {
        match self {
            Self::Equal12 => [1200.0, 100.0],
            Self::Pythagorean => [1200.0, 701.955],
            Self::QuarterCommaMeantone => [1200.0, 696.578],
            // POTE
            Self::SeptimalMeantone => [1200.0, 696.774],
            Self::Schismatic => [1200.0, 701.711],
            Self::Superpyth => [1200.0, 709.96],
            Self::Mavila => [1200.0, 679.8],
            Self::Magic => [1200.0, 380.352],
            Self::Porcupine => [1200.0, 163.2],
            // 13-EDT step on a 3/1 period
            Self::BohlenPierce => [1901.955, 146.304],
        }
    }

    /// Scale size the tuning is usually played in.
    pub fn scale_size(&self) -> usize {
        match self {
            Self::Equal12
            | Self::Pythagorean
            | Self::QuarterCommaMeantone
            | Self::SeptimalMeantone
            | Self::Schismatic => 12,
            Self::Superpyth | Self::Mavila => 9,
            Self::Magic => 10,
            Self::Porcupine => 8,
            Self::BohlenPierce => 13,
        }
    }

    /// Boundary ratio as `(numerator, denominator)`.
    pub fn boundary(&self) -> (u64, u64) {
        match self {
            Self::BohlenPierce => (3, 1),
            _ => (2, 1),
        }
    }
}

pub fn get_all_temperaments() -> HashMap<KnownTemperament, [f64; 2]> {
    KnownTemperament::iter().map(|t| (t, t.genes())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_names_round_trip() {
        for t in KnownTemperament::iter() {
            assert_eq!(KnownTemperament::from_str(&t.to_string()).unwrap(), t);
        }
        assert_eq!(
            KnownTemperament::from_str("quarter_comma_meantone").unwrap(),
            KnownTemperament::QuarterCommaMeantone
        );
    }

    #[test]
    fn test_generator_below_period() {
        for (_, genes) in get_all_temperaments() {
            assert!(genes[1] > 0.0 && genes[1] < genes[0]);
        }
    }
}
