use crate::consts::{DISSONANCE_B1, DISSONANCE_B2, DISSONANCE_D_STAR, DISSONANCE_S1, DISSONANCE_S2};
use crate::error::{TemperError, TfResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Partial {
    pub frequency: f64,
    pub amplitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Spectrum {
    pub partials: Vec<Partial>,
}

impl Spectrum {
    /// Checked constructor: frequencies must be positive, amplitudes non-negative.
    pub fn new(partials: Vec<Partial>) -> TfResult<Self> {
        for (i, p) in partials.iter().enumerate() {
            if !p.frequency.is_finite() || p.frequency <= 0.0 {
                return Err(TemperError::Validation(format!(
                    "partial {} has invalid frequency {}",
                    i, p.frequency
                )));
            }
            if !p.amplitude.is_finite() || p.amplitude < 0.0 {
                return Err(TemperError::Validation(format!(
                    "partial {} has invalid amplitude {}",
                    i, p.amplitude
                )));
            }
        }
        Ok(Self { partials })
    }

    /// Harmonic timbre: partial `k` sits at `k * f0` with amplitude `rolloff^(k-1)`.
    pub fn harmonic(fundamental_hz: f64, count: usize, rolloff: f64) -> TfResult<Self> {
        let partials = (1..=count)
            .map(|k| Partial {
                frequency: fundamental_hz * k as f64,
                amplitude: rolloff.powi(k as i32 - 1),
            })
            .collect();
        Self::new(partials)
    }

    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            partials: self
                .partials
                .iter()
                .map(|p| Partial {
                    frequency: p.frequency * ratio,
                    amplitude: p.amplitude,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }
}

/// Plomp-Levelt roughness of two sine partials (Sethares parameterization).
#[inline(always)]
pub fn calculate_pair_dissonance(f1: f64, a1: f64, f2: f64, a2: f64) -> f64 {
    if a1 == 0.0 || a2 == 0.0 {
        return 0.0;
    }
    let f_min = f1.min(f2);
    let diff = (f1 - f2).abs();
    let s = DISSONANCE_D_STAR / (DISSONANCE_S1 * f_min + DISSONANCE_S2);
    let x = s * diff;
    a1 * a2 * ((-DISSONANCE_B1 * x).exp() - (-DISSONANCE_B2 * x).exp())
}

fn intrinsic(partials: &[Partial]) -> f64 {
    let mut total = 0.0;
    for (i, p) in partials.iter().enumerate() {
        for q in &partials[i + 1..] {
            total += calculate_pair_dissonance(p.frequency, p.amplitude, q.frequency, q.amplitude);
        }
    }
    total
}

fn cross(a: &[Partial], b: &[Partial]) -> f64 {
    a.iter()
        .map(|p| {
            b.iter()
                .map(|q| calculate_pair_dissonance(p.frequency, p.amplitude, q.frequency, q.amplitude))
                .sum::<f64>()
        })
        .sum()
}

/// Sum over all unordered partial pairs.
pub fn calculate_spectrum_dissonance(spectrum: &Spectrum) -> f64 {
    intrinsic(&spectrum.partials)
}

/// Dissonance of both partial sets sounding together. Equal to the spectrum
/// dissonance of their concatenation.
pub fn calculate_interval_dissonance(s1: &Spectrum, s2: &Spectrum) -> f64 {
    intrinsic(&s1.partials) + intrinsic(&s2.partials) + cross(&s1.partials, &s2.partials)
}
