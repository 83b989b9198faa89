#![doc = r#"
Rusty representation of a decoded [`MidiFile`]
"#]

mod header;
pub use header::*;

mod timing;
pub use timing::*;

pub mod chunk;
use chunk::Chunk;

mod event;
pub use event::*;

mod track;
pub use track::*;

mod timeline;
pub use timeline::*;

use crate::reader::{ReadResult, Reader};

#[doc = r#"
A Standard MIDI File reduced to what a beatmap needs: its header and every
note and meta event of every track, merged on one tick grid.

Payloads borrow from the parsed bytes.
"#]
#[derive(Clone, Debug, PartialEq)]
pub struct MidiFile<'a> {
    header: MidiFileHeader,
    timeline: EventTimeline<'a>,
}

impl<'a> MidiFile<'a> {
    /// Parse a set of bytes into a file struct
    ///
    /// Exactly as many chunks as the header declares are read; anything after
    /// them is ignored.
    pub fn parse(bytes: &'a [u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = MidiFileHeader::read(&mut reader)?;
        let mut timeline = EventTimeline::new();

        for _ in 0..header.num_tracks() {
            match Chunk::read(&mut reader)? {
                Chunk::Track(track) => track.read_events(&mut timeline)?,
                Chunk::Unknown(_chunk) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        tag = ?_chunk.tag(),
                        length = _chunk.length(),
                        "skipping unknown chunk"
                    );
                }
            }
        }

        Ok(Self { header, timeline })
    }

    /// Returns header info
    pub fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// Returns the file's timing
    pub fn timing(&self) -> Timing {
        *self.header.timing()
    }

    /// Events of all tracks in merged order
    pub fn timeline(&self) -> &EventTimeline<'a> {
        &self.timeline
    }

    /// Consumes the file, keeping only its events
    pub fn into_timeline(self) -> EventTimeline<'a> {
        self.timeline
    }
}
