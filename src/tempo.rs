//! Tempo events and the time length of a tick

use core::fmt;

/// Microseconds per minute
const MICROS_PER_MINUTE: u32 = 60_000_000;

/// A tempo, as stored by the `FF 51` meta event.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub struct Tempo {
    micros_per_quarter_note: u32,
}

impl Tempo {
    /// 500000 µs per quarter note, i.e. 120 BPM
    pub const DEFAULT: Self = Self {
        micros_per_quarter_note: 500_000,
    };

    /// Creates a tempo from its duration of a quarter note.
    ///
    /// Returns `None` for zero.
    pub const fn new(micros_per_quarter_note: u32) -> Option<Self> {
        if micros_per_quarter_note == 0 {
            return None;
        }
        Some(Self {
            micros_per_quarter_note,
        })
    }

    /// Reads the 24-bit big-endian payload of a tempo meta event.
    ///
    /// Payloads of any other length, and a zero tempo, yield `None`.
    pub fn from_meta_payload(payload: &[u8]) -> Option<Self> {
        let &[a, b, c] = payload else {
            return None;
        };
        Self::new(u32::from_be_bytes([0, a, b, c]))
    }

    /// Returns the microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.micros_per_quarter_note
    }

    /// Beats per minute, truncated to one decimal.
    pub fn bpm(&self) -> f64 {
        // floor(60e6 / µs * 10) / 10, in integers so no rounding creeps in
        f64::from(MICROS_PER_MINUTE * 10 / self.micros_per_quarter_note) / 10.
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.bpm())
    }
}

/// Length of one tick, in seconds, at `bpm` with `ticks_per_quarter_note` resolution.
pub fn seconds_per_tick(ticks_per_quarter_note: u16, bpm: f64) -> f64 {
    60. / f64::from(ticks_per_quarter_note) / bpm
}
