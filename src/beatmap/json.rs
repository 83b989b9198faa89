//! The game's beatmap JSON layout.

use std::io;

use serde::Serialize;
use serde_json::value::RawValue;

use super::{Attribute, Beatmap, BeatmapRecord, Effect, Lane};

/// The game only knows one note level.
const NOTES_LEVEL: u8 = 1;

/// One note object as the game reads it. Field order is significant.
#[derive(Serialize)]
struct SifNote {
    timing_sec: Box<RawValue>,
    notes_attribute: Attribute,
    notes_level: u8,
    effect: Effect,
    effect_value: Box<RawValue>,
    position: Lane,
}

impl TryFrom<&BeatmapRecord> for SifNote {
    type Error = serde_json::Error;

    fn try_from(record: &BeatmapRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            timing_sec: fixed4(record.timing_sec)?,
            notes_attribute: record.attribute,
            notes_level: NOTES_LEVEL,
            effect: record.effect,
            effect_value: fixed4(record.effect_value)?,
            position: record.position,
        })
    }
}

/// A number printed with exactly four decimals.
///
/// Non-finite values are not JSON and fail here.
fn fixed4(value: f64) -> serde_json::Result<Box<RawValue>> {
    RawValue::from_string(format!("{value:.4}"))
}

impl Beatmap {
    /// Writes the beatmap as a JSON array, one note object per line.
    ///
    /// An empty beatmap is written as `[` newline `]`.
    pub fn write_json<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"[\n")?;
        for (index, record) in self.records.iter().enumerate() {
            if index > 0 {
                out.write_all(b",\n")?;
            }
            serde_json::to_writer(&mut out, &SifNote::try_from(record)?)?;
        }
        out.write_all(b"]")
    }

    /// Renders the beatmap with [`Beatmap::write_json`].
    pub fn to_json_string(&self) -> io::Result<String> {
        let mut out = Vec::new();
        self.write_json(&mut out)?;
        String::from_utf8(out).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}
