//! Common imports
pub use crate::{
    ConvertError, convert, convert_with,
    beatmap::{Attribute, Beatmap, BeatmapRecord, ChartError, Effect, Lane, LaneRange},
    file::{MidiFile, MidiFileHeader, Timing},
    reader::{ReaderError, ReaderErrorKind},
    settings::{ConvertSettings, UnterminatedLongNotes},
    tempo::Tempo,
};
