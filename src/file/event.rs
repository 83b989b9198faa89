/// Meta event type of a tempo change.
pub const TEMPO_META_ID: u8 = 0x51;

/// A decoded track event, positioned on the file-wide tick grid.
///
/// `sequence` numbers every emitted event across all tracks in the order it
/// was read. Events sharing a tick are applied in `sequence` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent<'a> {
    tick: u32,
    sequence: usize,
    kind: RawEventKind<'a>,
}

/// The payload of a [`RawEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEventKind<'a> {
    /// A note-on (`0x9n`) or note-off (`0x8n`) message
    Note(NoteEvent),
    /// A meta event (`0xFF`)
    Meta(MetaEvent<'a>),
}

/// A note message with its velocity dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    /// `true` for `0x9n`, `false` for `0x8n`. A note-on with velocity zero stays a note-on.
    pub is_note_on: bool,
    /// The key number, used as the lane before normalization
    pub pitch: u8,
    /// The low nibble of the status byte
    pub channel: u8,
}

/// A meta event, borrowing its payload from the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaEvent<'a> {
    /// The meta type byte
    pub meta_id: u8,
    /// Exactly the declared amount of payload bytes
    pub payload: &'a [u8],
}

impl MetaEvent<'_> {
    /// True for a `FF 51` set-tempo event
    pub const fn is_tempo(&self) -> bool {
        self.meta_id == TEMPO_META_ID
    }
}

impl<'a> RawEvent<'a> {
    pub(crate) const fn new(tick: u32, sequence: usize, kind: RawEventKind<'a>) -> Self {
        Self {
            tick,
            sequence,
            kind,
        }
    }
    /// Absolute tick of the event
    pub const fn tick(&self) -> u32 {
        self.tick
    }
    /// Global read order of the event
    pub const fn sequence(&self) -> usize {
        self.sequence
    }
    /// The event payload
    pub const fn kind(&self) -> &RawEventKind<'a> {
        &self.kind
    }
    /// Returns the note message, if this is one
    pub const fn as_note(&self) -> Option<&NoteEvent> {
        match &self.kind {
            RawEventKind::Note(note) => Some(note),
            RawEventKind::Meta(_) => None,
        }
    }
}
