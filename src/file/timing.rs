use crate::reader::{ReadResult, Reader, ReaderError, ReaderErrorKind};

/// The header timing type.
///
/// A Standard MIDI File either counts ticks per quarter note or divides
/// each second into SMPTE frames. Only the former can be converted, since
/// beatmap timing follows the file's tempo map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        let msb = ((tpqn >> 8) & 0x7F) as u8;
        let lsb = (tpqn & 0x00FF) as u8;
        Self::TicksPerQuarterNote(TicksPerQuarterNote { inner: [msb, lsb] })
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let position = reader.buffer_position();
        let bytes: [u8; 2] = reader.read_exact_size()?;
        let division = u16::from_be_bytes(bytes);
        match bytes[0] >> 7 {
            // A zero tick rate would make every tick last forever.
            0 if division != 0 => Ok(Timing::TicksPerQuarterNote(TicksPerQuarterNote {
                inner: bytes,
            })),
            _ => Err(ReaderError::new(
                position,
                ReaderErrorKind::UnsupportedTimeDivision(division),
            )),
        }
    }

    /// Returns the ticks per quarter note of the file
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(t) => t.ticks_per_quarter_note(),
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct TicksPerQuarterNote {
    pub(crate) inner: [u8; 2],
}
impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        let v = u16::from_be_bytes(self.inner);
        v & 0x7FFF
    }
}
