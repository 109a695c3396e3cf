/// Cents in a 2/1 octave.
pub const CENTS_PER_OCTAVE: f64 = 1200.0;

/// Maximum number of boundary multiplications/divisions applied while
/// normalizing a ratio. Inputs that need more are returned as-is past the cap.
pub const NORMALIZE_MAX_ITERATIONS: usize = 12;

/// Chromatic names used when a 12-note scale is labelled.
pub const CHROMATIC_NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

// Plomp-Levelt curve parameters (Sethares' fit).
pub const DISSONANCE_B1: f64 = 3.5;
pub const DISSONANCE_B2: f64 = 5.75;
pub const DISSONANCE_D_STAR: f64 = 0.24;
pub const DISSONANCE_S1: f64 = 0.0207;
pub const DISSONANCE_S2: f64 = 18.96;

/// Number of MIDI notes covered by a tuning table.
pub const MIDI_NOTE_COUNT: usize = 128;

/// Center (no bend) value of a 14-bit MIDI pitch wheel.
pub const PITCH_BEND_CENTER: u16 = 8192;

/// Largest 14-bit MIDI pitch wheel value.
pub const PITCH_BEND_MAX: u16 = 16383;
