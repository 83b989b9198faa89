#![doc = r#"
Converts Standard MIDI Files into rhythm game beatmaps.

Every track of the file is merged on one tick grid and replayed against its
tempo map. Each note-on becomes a tap at the time it sounds; long notes span
from their note-on to the next note-off on the same lane. The MIDI channel
of a note picks its attribute and effect, its key picks one of nine lanes.
See [`beatmap`] for the encoding.

# Example
```rust
use midi2sif::prelude::*;

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
    b'M', b'T', b'r', b'k', 0, 0, 0, 8,
    0x00, 0x94, 60, 100,
    0x00, 0xFF, 0x2F, 0x00,
];

let beatmap = convert(&bytes).unwrap();
assert_eq!(beatmap.len(), 1);

let note = &beatmap.records()[0];
assert_eq!(note.attribute, Attribute::Smile);
assert_eq!(note.effect, Effect::Normal);
assert_eq!(note.position, Lane::new(5).unwrap());
```
"#]
#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod beatmap;
mod error;
pub use error::*;
pub mod file;
pub mod prelude;
pub mod reader;
pub mod settings;
pub mod tempo;

use beatmap::Beatmap;
use file::MidiFile;
use settings::ConvertSettings;

/// Converts the bytes of a Standard MIDI File with the default settings.
///
/// # Errors
/// Fails if the file cannot be decoded or its notes do not form a beatmap.
pub fn convert(bytes: &[u8]) -> Result<Beatmap, ConvertError> {
    convert_with(bytes, &ConvertSettings::default())
}

/// Converts the bytes of a Standard MIDI File.
///
/// # Errors
/// Fails if the file cannot be decoded or its notes do not form a beatmap.
pub fn convert_with(bytes: &[u8], settings: &ConvertSettings) -> Result<Beatmap, ConvertError> {
    let file = MidiFile::parse(bytes)?;
    #[cfg(feature = "tracing")]
    tracing::debug!(
        format = file.header().format(),
        tracks = file.header().num_tracks(),
        ticks_per_quarter_note = file.timing().ticks_per_quarter_note(),
        events = file.timeline().len(),
        "decoded midi file"
    );
    Ok(Beatmap::from_midi(file, settings)?)
}
