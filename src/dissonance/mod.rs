//! Sensory dissonance between spectra and swept dissonance curves.

pub mod curve;
pub mod spectrum;

pub use self::curve::{
    find_local_minima, generate_dissonance_curve, label_minima, DissonanceCurveData, MinimumLabel,
};
pub use self::spectrum::{
    calculate_interval_dissonance, calculate_pair_dissonance, calculate_spectrum_dissonance,
    Partial, Spectrum,
};
