use core::fmt;

use itertools::{Itertools, MinMaxResult};
use thiserror::Error;

use super::ChartError;

#[doc = r#"
One of the nine playable columns, numbered 1 to 9.

# Example
```rust
# use midi2sif::prelude::*;
let lane = Lane::new(5).unwrap();
assert_eq!(lane.get(), 5);
assert!(Lane::new(0).is_none());
assert!(Lane::new(10).is_none());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub struct Lane(u8);

impl Lane {
    /// Amount of lanes on the playfield
    pub const COUNT: u8 = 9;

    /// Create a lane, checking it lies in `1..=9`
    pub const fn new(position: u8) -> Option<Self> {
        if position >= 1 && position <= Self::COUNT {
            Some(Self(position))
        } else {
            None
        }
    }

    /// Returns the 1-based lane number
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Lane> for u8 {
    fn from(lane: Lane) -> Self {
        lane.0
    }
}

/// A lane number outside `1..=9`
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("lane {0} is outside 1..=9")]
pub struct InvalidLane(pub u8);

impl TryFrom<u8> for Lane {
    type Error = InvalidLane;
    fn try_from(position: u8) -> Result<Self, Self::Error> {
        Lane::new(position).ok_or(InvalidLane(position))
    }
}

#[doc = r#"
The key range mapped onto the nine lanes.

The range is taken from the lowest and highest key of every note message in
the file. It must cover an odd amount of keys, at most nine, so that it has a
middle key: ranges narrower than nine are widened evenly around that middle
key, which then lands on lane 5.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct LaneRange {
    lowest: i16,
    highest: i16,
}

impl LaneRange {
    /// Fits the given keys onto the playfield.
    ///
    /// Returns `Ok(None)` when there are no keys at all.
    ///
    /// # Errors
    /// [`ChartError::InvalidLaneLayout`] if the keys span an even amount of
    /// keys, or more than nine.
    pub fn from_pitches<I>(pitches: I) -> Result<Option<Self>, ChartError>
    where
        I: IntoIterator<Item = u8>,
    {
        let (lowest, highest) = match pitches.into_iter().minmax() {
            MinMaxResult::NoElements => return Ok(None),
            MinMaxResult::OneElement(pitch) => (pitch, pitch),
            MinMaxResult::MinMax(lowest, highest) => (lowest, highest),
        };

        let width = i16::from(highest) - i16::from(lowest) + 1;
        if width > i16::from(Lane::COUNT) || width % 2 == 0 {
            return Err(ChartError::InvalidLaneLayout { lowest, highest });
        }

        let half = i16::from(Lane::COUNT / 2);
        let center = (i16::from(highest) + i16::from(lowest)) / 2;
        Ok(Some(Self {
            lowest: center - half,
            highest: center + half,
        }))
    }

    /// Key mapped onto lane 1. May be negative after centering.
    pub const fn lowest(&self) -> i16 {
        self.lowest
    }

    /// Key mapped onto lane 9.
    pub const fn highest(&self) -> i16 {
        self.highest
    }

    /// The lane of `pitch`, or `None` if the key lies outside the range.
    pub fn lane(&self, pitch: u8) -> Option<Lane> {
        let position = i16::from(pitch) - self.lowest + 1;
        u8::try_from(position).ok().and_then(Lane::new)
    }
}
