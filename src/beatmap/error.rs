use thiserror::Error;

use super::Lane;

/// Errors raised while turning decoded events into beatmap notes
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChartError {
    /// The keys used by the file cannot be laid out on nine lanes.
    #[error(
        "Failed to analyze note position: keys {lowest}..={highest} span {} keys. Make sure you only use 9 note keys or odd amount of note keys",
        key_span(.lowest, .highest)
    )]
    InvalidLaneLayout {
        /// Lowest key found in the file
        lowest: u8,
        /// Highest key found in the file
        highest: u8,
    },
    /// A long note started on a lane that is still holding one.
    #[error("another note in pos {lane} is in queue")]
    DuplicateLongNoteStart {
        /// The lane already holding a long note
        lane: Lane,
    },
    /// A long note ended on a lane that holds none.
    #[error("queue for pos {lane} is empty")]
    UnmatchedLongNoteEnd {
        /// The lane the release happened on
        lane: Lane,
    },
    /// The file ended while a long note was still held.
    #[error("long note in pos {lane} is never released")]
    UnterminatedLongNote {
        /// The lowest lane still holding a long note
        lane: Lane,
    },
}

fn key_span(lowest: &u8, highest: &u8) -> u16 {
    u16::from(*highest) - u16::from(*lowest) + 1
}

#[test]
fn lane_layout_message() {
    let err = ChartError::InvalidLaneLayout {
        lowest: 60,
        highest: 69,
    };
    assert_eq!(
        alloc::string::ToString::to_string(&err),
        "Failed to analyze note position: keys 60..=69 span 10 keys. Make sure you only use 9 note keys or odd amount of note keys"
    );
}
