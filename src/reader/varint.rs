//! MIDI variable-length quantities.
//!
//! Delta-times and meta event lengths are stored big-endian in groups of
//! 7 bits. Every byte but the last has its top bit set.

use super::{ReadResult, Reader};
use alloc::vec::Vec;

impl Reader<'_> {
    /// Decodes a variable-length quantity.
    ///
    /// There is no cap on the number of continuation bytes: the reader's own
    /// bounds stop a run of bytes that never clears its top bit. Bits shifted
    /// past the 32-bit accumulator are discarded.
    pub fn read_varint(&mut self) -> ReadResult<u32> {
        let mut value: u32 = 0;
        loop {
            let byte = self.read_next()?;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
    }
}

/// Appends the variable-length encoding of `value` to `out`.
///
/// The encoding is minimal, so values up to `0x0FFF_FFFF` fit in at most
/// 4 bytes.
pub fn write_varint(value: u32, out: &mut Vec<u8>) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i == 0 { 0x00 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
}
