use alloc::{
    collections::{BTreeMap, btree_map},
    vec::Vec,
};

use super::{NoteEvent, RawEvent, RawEventKind};

#[doc = r#"
Every event of a file, merged across tracks and ordered by absolute tick.

Tracks are read one after another, so pushing into a tick bucket happens in
`sequence` order. Iterating visits ticks in ascending order and each bucket in
insertion order, which is the same as sorting by `(tick, sequence)`: at equal
ticks, earlier tracks win over later ones and earlier events of a track over
later ones.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTimeline<'a> {
    buckets: BTreeMap<u32, Vec<RawEvent<'a>>>,
    next_sequence: usize,
}

impl<'a> EventTimeline<'a> {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event at `tick`, assigning it the next sequence number.
    pub fn push(&mut self, tick: u32, kind: RawEventKind<'a>) -> usize {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.buckets
            .entry(tick)
            .or_default()
            .push(RawEvent::new(tick, sequence, kind));
        sequence
    }

    /// Total amount of events
    pub fn len(&self) -> usize {
        self.next_sequence
    }

    /// True if no event was pushed
    pub fn is_empty(&self) -> bool {
        self.next_sequence == 0
    }

    /// The lowest and highest ticks holding an event
    pub fn tick_range(&self) -> Option<(u32, u32)> {
        let first = *self.buckets.first_key_value()?.0;
        let last = *self.buckets.last_key_value()?.0;
        Some((first, last))
    }

    /// Iterates events in merged order
    pub fn iter(&self) -> impl Iterator<Item = &RawEvent<'a>> {
        self.buckets.values().flatten()
    }

    /// Iterates every note message in merged order
    pub fn notes(&self) -> impl Iterator<Item = &NoteEvent> {
        self.iter().filter_map(RawEvent::as_note)
    }
}

impl<'a> IntoIterator for EventTimeline<'a> {
    type Item = RawEvent<'a>;
    type IntoIter = core::iter::Flatten<btree_map::IntoValues<u32, Vec<RawEvent<'a>>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::MetaEvent;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn note(pitch: u8) -> RawEventKind<'static> {
        RawEventKind::Note(NoteEvent {
            is_note_on: true,
            pitch,
            channel: 4,
        })
    }

    #[test]
    fn orders_by_tick_then_sequence() {
        let mut timeline = EventTimeline::new();
        // first track
        timeline.push(0, note(60));
        timeline.push(480, note(61));
        timeline.push(960, note(62));
        // second track
        timeline.push(240, note(63));
        timeline.push(480, note(64));

        let order: Vec<_> = timeline
            .iter()
            .map(|event| (event.tick(), event.sequence()))
            .collect();
        assert_eq!(order, vec![(0, 0), (240, 3), (480, 1), (480, 4), (960, 2)]);

        let pitches: Vec<_> = timeline
            .into_iter()
            .filter_map(|e| e.as_note().map(|n| n.pitch))
            .collect();
        assert_eq!(pitches, vec![60, 63, 61, 64, 62]);
    }

    #[test]
    fn reports_tick_range_and_notes() {
        let mut timeline = EventTimeline::new();
        assert_eq!(timeline.tick_range(), None);

        timeline.push(
            96,
            RawEventKind::Meta(MetaEvent {
                meta_id: 0x51,
                payload: &[0x07, 0xA1, 0x20],
            }),
        );
        timeline.push(12, note(70));
        assert_eq!(timeline.tick_range(), Some((12, 96)));
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.notes().count(), 1);
    }
}
