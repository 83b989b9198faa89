//! Builds Standard MIDI Files byte by byte.
#![allow(dead_code)]

use midi2sif::reader::write_varint;

/// Events of one track, each with its delta-time.
#[derive(Default)]
pub struct Track {
    body: Vec<u8>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    fn event(mut self, delta: u32, bytes: &[u8]) -> Self {
        write_varint(delta, &mut self.body);
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn note_on(self, delta: u32, channel: u8, pitch: u8) -> Self {
        self.event(delta, &[0x90 | channel, pitch, 100])
    }

    pub fn note_off(self, delta: u32, channel: u8, pitch: u8) -> Self {
        self.event(delta, &[0x80 | channel, pitch, 0])
    }

    pub fn tempo(self, delta: u32, micros_per_quarter_note: u32) -> Self {
        let [_, a, b, c] = micros_per_quarter_note.to_be_bytes();
        self.event(delta, &[0xFF, 0x51, 0x03, a, b, c])
    }

    /// Program change padded to the two data bytes every skipped message carries
    pub fn program_change(self, delta: u32, channel: u8, program: u8) -> Self {
        self.event(delta, &[0xC0 | channel, program, 0])
    }

    pub fn sysex(self, delta: u32, data: &[u8]) -> Self {
        let mut bytes = vec![0xF0];
        bytes.extend_from_slice(data);
        bytes.push(0xF7);
        self.event(delta, &bytes)
    }

    pub fn end_of_track(self, delta: u32) -> Self {
        self.event(delta, &[0xFF, 0x2F, 0x00])
    }

    /// The complete `MTrk` chunk
    pub fn chunk(&self) -> Vec<u8> {
        chunk(b"MTrk", &self.body)
    }
}

pub fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

pub fn header(format: u16, num_tracks: u16, ticks_per_quarter_note: u16) -> Vec<u8> {
    let mut body = format.to_be_bytes().to_vec();
    body.extend_from_slice(&num_tracks.to_be_bytes());
    body.extend_from_slice(&ticks_per_quarter_note.to_be_bytes());
    chunk(b"MThd", &body)
}

/// A format 1 file holding `tracks`
pub fn smf(ticks_per_quarter_note: u16, tracks: &[Track]) -> Vec<u8> {
    let mut bytes = header(1, tracks.len() as u16, ticks_per_quarter_note);
    for track in tracks {
        bytes.extend(track.chunk());
    }
    bytes
}
