//! Conversion settings

use crate::tempo::Tempo;

/// What to do with long notes still held when the file ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnterminatedLongNotes {
    /// Fail with [`ChartError::UnterminatedLongNote`](crate::beatmap::ChartError::UnterminatedLongNote).
    #[default]
    Reject,
    /// Leave them out of the beatmap.
    Drop,
}

#[doc = r#"
Knobs for a conversion.

# Example
```rust
# use midi2sif::prelude::*;
let settings = ConvertSettings::default()
    .with_initial_bpm(150.)
    .with_unterminated_long_notes(UnterminatedLongNotes::Drop);
assert_eq!(settings.initial_bpm, 150.);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertSettings {
    /// Tempo in force until the first tempo event.
    ///
    /// A value that is not finite and positive is replaced by the MIDI
    /// default of 120 BPM.
    pub initial_bpm: f64,
    /// Policy for long notes that are never released
    pub unterminated_long_notes: UnterminatedLongNotes,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            initial_bpm: Tempo::DEFAULT.bpm(),
            unterminated_long_notes: UnterminatedLongNotes::default(),
        }
    }
}

impl ConvertSettings {
    /// Sets the tempo in force before the first tempo event
    #[must_use]
    pub const fn with_initial_bpm(mut self, bpm: f64) -> Self {
        self.initial_bpm = bpm;
        self
    }

    /// Sets the policy for long notes that are never released
    #[must_use]
    pub const fn with_unterminated_long_notes(mut self, policy: UnterminatedLongNotes) -> Self {
        self.unterminated_long_notes = policy;
        self
    }
}
