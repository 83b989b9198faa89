use super::{EventTimeline, MetaEvent, NoteEvent, RawEventKind};
use crate::reader::{ReadResult, Reader, ReaderError, ReaderErrorKind};

const NOTE_ON: u8 = 0x9;
const META: u8 = 0xFF;
const SYSEX: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;

/// The body of an `MTrk` chunk, bounded to its declared length.
#[derive(Debug, Clone)]
pub struct TrackChunk<'a> {
    body: Reader<'a>,
}

impl<'a> TrackChunk<'a> {
    pub(crate) const fn new(body: Reader<'a>) -> Self {
        Self { body }
    }

    /// Length of the chunk body in bytes
    pub const fn len(&self) -> usize {
        self.body.remaining()
    }

    /// True if the chunk holds no bytes at all
    pub const fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Decodes every event of the track into `timeline`.
    ///
    /// Note and meta events are pushed at their absolute tick. System
    /// exclusive messages and every other channel message are consumed and
    /// dropped. Each event must carry its own status byte.
    pub fn read_events(self, timeline: &mut EventTimeline<'a>) -> ReadResult<()> {
        let mut reader = self.body;
        let mut tick: u32 = 0;

        while !reader.is_empty() {
            let delta = reader.read_varint()?;
            tick = tick.wrapping_add(delta);

            let status_position = reader.buffer_position();
            let status = reader.read_next()?;

            match status {
                0x80..=0x9F => {
                    let pitch = reader.read_next()?;
                    let _velocity = reader.read_next()?;
                    timeline.push(
                        tick,
                        RawEventKind::Note(NoteEvent {
                            is_note_on: status >> 4 == NOTE_ON,
                            pitch,
                            channel: status & 0x0F,
                        }),
                    );
                }
                META => {
                    let meta_id = reader.read_next()?;
                    let len = reader.read_varint()?;
                    let payload = reader.read_exact(len as usize)?;
                    timeline.push(tick, RawEventKind::Meta(MetaEvent { meta_id, payload }));
                }
                SYSEX | SYSEX_END => while reader.read_next()? != SYSEX_END {},
                // every other message is read as two data bytes
                0xA0..=0xEF | 0xF1..=0xFE => reader.skip(2)?,
                data => {
                    return Err(ReaderError::new(
                        status_position,
                        ReaderErrorKind::UnsupportedRunningStatus(data),
                    ));
                }
            }
        }
        Ok(())
    }
}
