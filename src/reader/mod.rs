#![doc = r#"
Byte-level access to a Standard MIDI File held in memory.

A [`Reader`] walks a borrowed byte slice and never reads past its end: every
short read is reported as [`ReaderErrorKind::TruncatedStream`] together with
the absolute offset at which it happened. Chunk bodies are read through
[`Reader::split_off`], which yields a reader bounded to the chunk's declared
length while keeping offsets relative to the start of the file.
"#]

mod error;
pub use error::*;

mod varint;
pub use varint::*;

/// A bounded cursor over MIDI bytes.
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
    /// Offset of `data[0]` within the whole file.
    base: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader over a whole file.
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self {
            data,
            position: 0,
            base: 0,
        }
    }

    /// Absolute offset of the next byte to be read.
    pub const fn buffer_position(&self) -> usize {
        self.base + self.position
    }

    /// Number of bytes left before the end of this reader.
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True when every byte has been consumed.
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads a single byte.
    pub fn read_next(&mut self) -> ReadResult<u8> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or_else(|| ReaderError::oob(self.buffer_position()))?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads exactly `len` bytes, borrowing them from the underlying slice.
    pub fn read_exact(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        let data = self.data;
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= data.len())
            .ok_or_else(|| ReaderError::oob(self.buffer_position()))?;
        let bytes = &data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Reads a fixed amount of bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Discards exactly `len` bytes.
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.read_exact(len).map(|_| ())
    }

    /// Splits the next `len` bytes off into their own reader.
    ///
    /// The returned reader reports positions relative to the start of the
    /// file, and this reader continues right after the split bytes.
    pub fn split_off(&mut self, len: usize) -> ReadResult<Reader<'slc>> {
        let base = self.buffer_position();
        let data = self.read_exact(len)?;
        Ok(Reader {
            data,
            position: 0,
            base,
        })
    }
}
