#![doc = r#"
Contains types for MIDI file chunks

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit length field and then the chunk data.

## Track Chunks

Track chunks (identified by "MTrk") contain the actual MIDI events and timing information.
Their body is handed to [`TrackChunk`] bounded to the declared length, so a malformed
event can never read into the following chunk.

## Unknown chunks

Any chunk with a type identifier other than "MTrk" following the header is skipped over
using its declared length. Its contents are never interpreted.

# Example Structure

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
[Proprietary chunk: "XFIH"]   <- skipped
[Track Chunk 2: "MTrk"]
```
"#]

use super::TrackChunk;
use crate::reader::{ReadResult, Reader};

const TRACK_MAGIC: &[u8; 4] = b"MTrk";

/// A chunk following the header.
#[derive(Debug, Clone)]
pub enum Chunk<'a> {
    /// An `MTrk` chunk
    Track(TrackChunk<'a>),
    /// Any other chunk, already skipped
    Unknown(UnknownChunk),
}

/// Identification of a skipped chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownChunk {
    tag: [u8; 4],
    length: u32,
}

impl UnknownChunk {
    /// The 4-byte type identifier
    pub fn tag(&self) -> [u8; 4] {
        self.tag
    }
    /// The declared body length
    pub fn length(&self) -> u32 {
        self.length
    }
}

impl<'a> Chunk<'a> {
    /// Reads the chunk header and takes or skips its body.
    pub(crate) fn read(reader: &mut Reader<'a>) -> ReadResult<Self> {
        let tag: [u8; 4] = reader.read_exact_size()?;
        let length = reader.read_u32()?;

        if &tag == TRACK_MAGIC {
            let body = reader.split_off(length as usize)?;
            Ok(Chunk::Track(TrackChunk::new(body)))
        } else {
            reader.skip(length as usize)?;
            Ok(Chunk::Unknown(UnknownChunk { tag, length }))
        }
    }
}
