#![doc = r#"
Beatmap notes and their construction from decoded MIDI events.

# Channel encoding

The MIDI channel of a note carries both its attribute and its effect:

```text
channel = attribute << 2 | (effect - 1)

           effect: Normal  Token  Long  Star
attribute
  (none)             0      1      2     3     <- ignored
  Smile              4      5      6     7
  Pure               8      9     10    11
  Cool              12     13     14    15
```

The key of the note picks its lane, see [`LaneRange`]. A long note starts on
its note-on and ends on the next note-off of the same lane.
"#]

mod error;
pub use error::*;

mod lane;
pub use lane::*;

mod simulator;
use simulator::Simulator;

#[cfg(feature = "json")]
mod json;

use alloc::vec::Vec;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{file::MidiFile, settings::ConvertSettings};

/// `effect_value` written for every note that is not a long note
pub const PLACEHOLDER_EFFECT_VALUE: f64 = 2.;

/// Scoring category of a note
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
#[repr(u8)]
pub enum Attribute {
    /// Channels 4-7
    Smile = 1,
    /// Channels 8-11
    Pure = 2,
    /// Channels 12-15
    Cool = 3,
}

/// Kind of note
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
#[repr(u8)]
pub enum Effect {
    /// A single tap
    Normal = 1,
    /// A tap that drops a token
    Token = 2,
    /// A held note
    Long = 3,
    /// A tap that costs a life when missed
    Star = 4,
}

impl Effect {
    /// The effect encoded in the two low bits of a channel
    pub const fn from_channel(channel: u8) -> Self {
        match channel & 0x3 {
            0 => Self::Normal,
            1 => Self::Token,
            2 => Self::Long,
            _ => Self::Star,
        }
    }
}

/// A note of the beatmap.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BeatmapRecord {
    /// Time of the note (start time for long notes), in seconds
    pub timing_sec: f64,
    /// Scoring category
    pub attribute: Attribute,
    /// Kind of note
    pub effect: Effect,
    /// Hold duration in seconds for long notes, [`PLACEHOLDER_EFFECT_VALUE`] otherwise
    pub effect_value: f64,
    /// Lane of the note
    pub position: Lane,
}

impl BeatmapRecord {
    /// A note without duration
    pub const fn new(timing_sec: f64, attribute: Attribute, effect: Effect, position: Lane) -> Self {
        Self {
            timing_sec,
            attribute,
            effect,
            effect_value: PLACEHOLDER_EFFECT_VALUE,
            position,
        }
    }

    /// A long note held for `duration` seconds
    pub const fn long(timing_sec: f64, duration: f64, attribute: Attribute, position: Lane) -> Self {
        Self {
            timing_sec,
            attribute,
            effect: Effect::Long,
            effect_value: duration,
            position,
        }
    }
}

#[doc = r#"
A beatmap: notes sorted by time.

Notes sharing a time keep the order they were completed in; long notes
complete on their release.
"#]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Beatmap {
    records: Vec<BeatmapRecord>,
}

impl Beatmap {
    /// Builds the beatmap of a decoded file.
    ///
    /// # Errors
    /// See [`ChartError`].
    pub fn from_midi(file: MidiFile<'_>, settings: &ConvertSettings) -> Result<Self, ChartError> {
        let lanes = LaneRange::from_pitches(file.timeline().notes().map(|note| note.pitch))?;
        let ticks_per_quarter_note = file.timing().ticks_per_quarter_note();
        let records = Simulator::new(ticks_per_quarter_note, lanes, settings).run(file.into_timeline())?;
        Ok(Self { records })
    }

    /// The notes, sorted by time
    pub fn records(&self) -> &[BeatmapRecord] {
        &self.records
    }

    /// Returns the notes
    pub fn into_records(self) -> Vec<BeatmapRecord> {
        self.records
    }

    /// Amount of notes
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the beatmap has no notes
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the notes in time order
    pub fn iter(&self) -> core::slice::Iter<'_, BeatmapRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Beatmap {
    type Item = &'a BeatmapRecord;
    type IntoIter = core::slice::Iter<'a, BeatmapRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[test]
fn channel_encoding() {
    assert_eq!(Attribute::try_from(0u8).ok(), None);
    assert_eq!(Attribute::try_from(5u8 >> 2).ok(), Some(Attribute::Smile));
    assert_eq!(Attribute::try_from(11u8 >> 2).ok(), Some(Attribute::Pure));
    assert_eq!(Attribute::try_from(13u8 >> 2).ok(), Some(Attribute::Cool));

    assert_eq!(Effect::from_channel(4), Effect::Normal);
    assert_eq!(Effect::from_channel(9), Effect::Token);
    assert_eq!(Effect::from_channel(14), Effect::Long);
    assert_eq!(Effect::from_channel(7), Effect::Star);
    for channel in 0..16u8 {
        assert_eq!(u8::from(Effect::from_channel(channel)), (channel & 0x3) + 1);
    }
}
