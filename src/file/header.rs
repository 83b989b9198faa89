use super::Timing;
use crate::reader::{ReadResult, Reader, ReaderError, ReaderErrorKind};

const HEADER_MAGIC: &[u8; 4] = b"MThd";
const HEADER_LENGTH: u32 = 6;

#[doc = r#"
The contents of the `MThd` chunk.

The format word is kept for inspection only; tracks are always merged
by absolute tick, whatever the declared format.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiFileHeader {
    format: u16,
    num_tracks: u16,
    timing: Timing,
}

impl MidiFileHeader {
    /// Create a new header
    pub fn new(format: u16, num_tracks: u16, timing: Timing) -> Self {
        Self {
            format,
            num_tracks,
            timing,
        }
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let magic_position = reader.buffer_position();
        let magic: [u8; 4] = reader.read_exact_size()?;
        if &magic != HEADER_MAGIC {
            return Err(ReaderError::new(magic_position, ReaderErrorKind::NotMidi));
        }

        let length_position = reader.buffer_position();
        let length = reader.read_u32()?;
        if length != HEADER_LENGTH {
            return Err(ReaderError::new(
                length_position,
                ReaderErrorKind::UnsupportedHeader(length),
            ));
        }

        let format = reader.read_u16()?;
        let num_tracks = reader.read_u16()?;
        let timing = Timing::read(reader)?;
        Ok(Self::new(format, num_tracks, timing))
    }

    /// The declared SMF format (0, 1 or 2)
    pub fn format(&self) -> u16 {
        self.format
    }
    /// Amount of chunks following the header
    pub fn num_tracks(&self) -> u16 {
        self.num_tracks
    }
    /// Get the timing props
    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(length: u32, division: [u8; 2]) -> alloc::vec::Vec<u8> {
        let mut bytes = alloc::vec::Vec::new();
        bytes.extend_from_slice(b"MThd");
        bytes.extend_from_slice(&length.to_be_bytes());
        bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x02]);
        bytes.extend_from_slice(&division);
        bytes
    }

    #[test]
    fn reads_a_valid_header() {
        let bytes = header(6, [0x00, 0x60]);
        let header = MidiFileHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
        assert_eq!(header.format(), 1);
        assert_eq!(header.num_tracks(), 2);
        assert_eq!(header.timing().ticks_per_quarter_note(), 96);
    }

    #[test]
    fn rejects_other_magic() {
        let bytes = b"RIFF\x00\x00\x00\x06\x00\x00\x00\x01\x00\x60";
        let err = MidiFileHeader::read(&mut Reader::from_byte_slice(bytes)).unwrap_err();
        assert_eq!(err.error_kind(), &ReaderErrorKind::NotMidi);
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn rejects_other_header_lengths() {
        let bytes = header(8, [0x00, 0x60]);
        let err = MidiFileHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert_eq!(err.error_kind(), &ReaderErrorKind::UnsupportedHeader(8));
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn short_magic_is_truncation() {
        let err = MidiFileHeader::read(&mut Reader::from_byte_slice(b"MTh")).unwrap_err();
        assert!(err.is_out_of_bounds());
    }
}
