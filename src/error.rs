use thiserror::Error;

use crate::{beatmap::ChartError, reader::ReaderError};

/// Anything that can stop a conversion
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The bytes are not a Standard MIDI File this crate can decode
    #[error(transparent)]
    Read(#[from] ReaderError),
    /// The decoded notes do not form a valid beatmap
    #[error(transparent)]
    Chart(#[from] ChartError),
}
