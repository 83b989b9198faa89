use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a Standard MIDI File
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// The file does not start with the `MThd` magic.
    #[error("Not MIDI")]
    NotMidi,
    /// The header chunk declares a length other than 6.
    #[error("Header size is {0}, expected 6")]
    UnsupportedHeader(u32),
    /// The division field is not a ticks per quarter note value.
    #[error("Time division {0:#06x} is not supported, only ticks per quarter note are")]
    UnsupportedTimeDivision(u16),
    /// An event omitted its status byte.
    #[error("Running status is not supported (found data byte {0:#04x} in status position)")]
    UnsupportedRunningStatus(u8),
    /// Reading out of bounds.
    #[error("Unexpected EOF")]
    TruncatedStream,
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the input ended before a complete value could be read
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::TruncatedStream)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::TruncatedStream,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
