use super::builder::SolverOutput;
use crate::consts::{MIDI_NOTE_COUNT, PITCH_BEND_CENTER, PITCH_BEND_MAX};
use crate::error::{TemperError, TfResult};
use serde::{Deserialize, Serialize};

/// Per-MIDI-note cents deviation from 12-TET for playing a scale on a
/// conventionally tuned instrument via pitch bend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuningTable {
    pub root_note: u8,
    pub deviations: Vec<f64>,
}

impl Default for TuningTable {
    fn default() -> Self {
        Self {
            root_note: 60,
            deviations: vec![0.0; MIDI_NOTE_COUNT],
        }
    }
}

impl TuningTable {
    /// Maps consecutive MIDI keys to consecutive scale degrees, with
    /// `root_note` sounding the tonic. Degrees past the scale size continue
    /// into the next period.
    pub fn from_solver_output(output: &SolverOutput, root_note: u8) -> TfResult<Self> {
        let size = output.notes.len();
        if size == 0 {
            return Err(TemperError::Validation(
                "cannot build a tuning table from an empty scale".to_string(),
            ));
        }
        let root_note = root_note.min((MIDI_NOTE_COUNT - 1) as u8);
        let period = output.input.cycle_cents;

        let deviations = (0..MIDI_NOTE_COUNT as i64)
            .map(|key| {
                let degree = key - root_note as i64;
                let cycle = degree.div_euclid(size as i64);
                let idx = degree.rem_euclid(size as i64) as usize;
                let pitch = cycle as f64 * period + output.notes[idx].cents_from_root;
                pitch - degree as f64 * 100.0
            })
            .collect();

        Ok(Self {
            root_note,
            deviations,
        })
    }

    pub fn deviation(&self, note: u8) -> f64 {
        self.deviations.get(note as usize).copied().unwrap_or(0.0)
    }

    /// 14-bit pitch wheel value for `note`, given the receiver's bend range.
    /// The range is clamped to 1..=96 semitones; 8192 means no bend.
    pub fn pitch_bend(&self, note: u8, bend_range_semitones: f64) -> u16 {
        pitch_bend_for_cents(self.deviation(note), bend_range_semitones)
    }
}

pub fn pitch_bend_for_cents(cents: f64, bend_range_semitones: f64) -> u16 {
    let range = if bend_range_semitones.is_nan() {
        1.0
    } else {
        bend_range_semitones.clamp(1.0, 96.0)
    };
    let normalized = cents / (range * 100.0);
    let center = PITCH_BEND_CENTER as f64;
    let value = (center + normalized * center) as i64;
    value.clamp(0, PITCH_BEND_MAX as i64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_bend_center_and_limits() {
        assert_eq!(pitch_bend_for_cents(0.0, 48.0), 8192);
        assert_eq!(pitch_bend_for_cents(4800.0, 48.0), 16383);
        assert_eq!(pitch_bend_for_cents(-4800.0, 48.0), 0);
        assert_eq!(pitch_bend_for_cents(100_000.0, 2.0), 16383);
    }

    #[test]
    fn test_pitch_bend_range_is_clamped() {
        // 0 semitones would divide by zero; it is clamped to 1.
        assert_eq!(pitch_bend_for_cents(50.0, 0.0), 8192 + 4096);
    }
}
