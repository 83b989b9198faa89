use alloc::{collections::BTreeMap, vec::Vec};

use super::{Attribute, BeatmapRecord, ChartError, Effect, Lane, LaneRange};
use crate::{
    file::{EventTimeline, MetaEvent, NoteEvent, RawEventKind},
    settings::{ConvertSettings, UnterminatedLongNotes},
    tempo::{Tempo, seconds_per_tick},
};

/// A long note waiting for its release.
#[derive(Debug, Clone, Copy)]
struct PendingLongNote {
    start_time: f64,
}

/// Walks the merged events in tick order, keeping track of elapsed time.
///
/// Time starts at zero on the first tick holding an event. Every event of a
/// tick is applied before time moves on, so a tempo change affects the ticks
/// after it and notes on the same tick as it are already placed.
pub(crate) struct Simulator {
    ticks_per_quarter_note: u16,
    lanes: Option<LaneRange>,
    policy: UnterminatedLongNotes,
    current_time: f64,
    seconds_per_tick: f64,
    pending: BTreeMap<Lane, PendingLongNote>,
    records: Vec<BeatmapRecord>,
}

/// The configured starting tempo, or the MIDI default if it is not a positive
/// finite number.
fn initial_bpm(settings: &ConvertSettings) -> f64 {
    if settings.initial_bpm.is_finite() && settings.initial_bpm > 0. {
        settings.initial_bpm
    } else {
        #[cfg(feature = "tracing")]
        tracing::debug!(bpm = settings.initial_bpm, "ignoring invalid initial tempo");
        Tempo::DEFAULT.bpm()
    }
}

impl Simulator {
    pub(crate) fn new(
        ticks_per_quarter_note: u16,
        lanes: Option<LaneRange>,
        settings: &ConvertSettings,
    ) -> Self {
        Self {
            ticks_per_quarter_note,
            lanes,
            policy: settings.unterminated_long_notes,
            current_time: 0.,
            seconds_per_tick: seconds_per_tick(ticks_per_quarter_note, initial_bpm(settings)),
            pending: BTreeMap::new(),
            records: Vec::new(),
        }
    }

    /// Consumes every event and returns the notes sorted by time.
    pub(crate) fn run(mut self, timeline: EventTimeline<'_>) -> Result<Vec<BeatmapRecord>, ChartError> {
        let mut last_tick = None;
        for event in timeline {
            if let Some(last_tick) = last_tick {
                self.advance(event.tick() - last_tick);
            }
            last_tick = Some(event.tick());

            match event.kind() {
                RawEventKind::Meta(meta) => self.apply_meta(meta),
                RawEventKind::Note(note) => self.apply_note(note)?,
            }
        }
        self.finish()
    }

    /// Adds one tick length per tick, so rounding builds up the same way for
    /// every file.
    fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.current_time += self.seconds_per_tick;
        }
    }

    fn apply_meta(&mut self, meta: &MetaEvent<'_>) {
        if !meta.is_tempo() {
            return;
        }
        let Some(tempo) = Tempo::from_meta_payload(meta.payload) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(payload = ?meta.payload, "ignoring malformed tempo event");
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(time = self.current_time, %tempo, "tempo change");
        self.seconds_per_tick = seconds_per_tick(self.ticks_per_quarter_note, tempo.bpm());
    }

    fn apply_note(&mut self, note: &NoteEvent) -> Result<(), ChartError> {
        let Ok(attribute) = Attribute::try_from(note.channel >> 2) else {
            return Ok(());
        };
        let Some(lane) = self.lanes.and_then(|lanes| lanes.lane(note.pitch)) else {
            return Ok(());
        };
        let effect = Effect::from_channel(note.channel);

        match (note.is_note_on, effect) {
            (true, Effect::Long) => {
                if self.pending.contains_key(&lane) {
                    return Err(ChartError::DuplicateLongNoteStart { lane });
                }
                self.pending.insert(
                    lane,
                    PendingLongNote {
                        start_time: self.current_time,
                    },
                );
            }
            (true, effect) => self.records.push(BeatmapRecord::new(
                self.current_time,
                attribute,
                effect,
                lane,
            )),
            (false, Effect::Long) => {
                let pending = self
                    .pending
                    .remove(&lane)
                    .ok_or(ChartError::UnmatchedLongNoteEnd { lane })?;
                self.records.push(BeatmapRecord::long(
                    pending.start_time,
                    self.current_time - pending.start_time,
                    attribute,
                    lane,
                ));
            }
            (false, _) => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<BeatmapRecord>, ChartError> {
        if let Some((&lane, _)) = self.pending.first_key_value() {
            match self.policy {
                UnterminatedLongNotes::Reject => {
                    return Err(ChartError::UnterminatedLongNote { lane });
                }
                UnterminatedLongNotes::Drop => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(count = self.pending.len(), "dropping unreleased long notes");
                }
            }
        }
        self.records
            .sort_by(|a, b| a.timing_sec.total_cmp(&b.timing_sec));
        Ok(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    const TPQN: u16 = 480;
    const TEMPO_60: [u8; 3] = [0x0F, 0x42, 0x40];

    fn note(timeline: &mut EventTimeline<'_>, tick: u32, is_note_on: bool, pitch: u8, channel: u8) {
        timeline.push(
            tick,
            RawEventKind::Note(NoteEvent {
                is_note_on,
                pitch,
                channel,
            }),
        );
    }

    fn simulate(timeline: EventTimeline<'_>) -> Result<Vec<BeatmapRecord>, ChartError> {
        simulate_with(timeline, &ConvertSettings::default())
    }

    fn simulate_with(
        timeline: EventTimeline<'_>,
        settings: &ConvertSettings,
    ) -> Result<Vec<BeatmapRecord>, ChartError> {
        let lanes = LaneRange::from_pitches(timeline.notes().map(|n| n.pitch))?;
        Simulator::new(TPQN, lanes, settings).run(timeline)
    }

    fn lane(n: u8) -> Lane {
        Lane::new(n).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn places_notes_at_default_tempo() {
        let mut timeline = EventTimeline::new();
        note(&mut timeline, 0, true, 60, 4);
        note(&mut timeline, 480, true, 60, 9);
        note(&mut timeline, 960, true, 60, 15);

        let records = simulate(timeline).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.attribute, r.effect, r.position))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Attribute::Smile, Effect::Normal, lane(5)),
                (Attribute::Pure, Effect::Token, lane(5)),
                (Attribute::Cool, Effect::Star, lane(5)),
            ]
        );
        assert_close(records[0].timing_sec, 0.);
        assert_close(records[1].timing_sec, 0.5);
        assert_close(records[2].timing_sec, 1.);
        assert!(records.iter().all(|r| r.effect_value == 2.));
    }

    #[test]
    fn time_is_summed_tick_by_tick() {
        let mut timeline = EventTimeline::new();
        note(&mut timeline, 0, true, 60, 4);
        note(&mut timeline, 978, true, 60, 4);

        let lanes = LaneRange::from_pitches([60]).unwrap();
        let records = Simulator::new(96, lanes, &ConvertSettings::default())
            .run(timeline)
            .unwrap();

        let step = seconds_per_tick(96, 120.);
        let expected = (0..978).fold(0., |time, _| time + step);
        assert_eq!(records[1].timing_sec, expected);
    }

    #[test]
    fn invalid_initial_tempos_fall_back_to_120_bpm() {
        for bpm in [0., -60., f64::NAN, f64::INFINITY] {
            let mut timeline = EventTimeline::new();
            note(&mut timeline, 0, true, 60, 4);
            note(&mut timeline, 480, true, 60, 4);

            let settings = ConvertSettings::default().with_initial_bpm(bpm);
            let records = simulate_with(timeline, &settings).unwrap();
            assert_close(records[1].timing_sec, 0.5);
        }
    }

    #[test]
    fn time_starts_at_the_first_event() {
        let mut timeline = EventTimeline::new();
        note(&mut timeline, 960, true, 60, 4);
        note(&mut timeline, 1440, true, 60, 4);

        let records = simulate(timeline).unwrap();
        assert_close(records[0].timing_sec, 0.);
        assert_close(records[1].timing_sec, 0.5);
    }

    #[test]
    fn tempo_changes_apply_to_later_ticks() {
        let mut timeline = EventTimeline::new();
        timeline.push(
            0,
            RawEventKind::Meta(MetaEvent {
                meta_id: 0x51,
                payload: &TEMPO_60,
            }),
        );
        note(&mut timeline, 480, true, 60, 4);
        timeline.push(
            480,
            RawEventKind::Meta(MetaEvent {
                meta_id: 0x51,
                payload: &[0x07, 0xA1, 0x20],
            }),
        );
        note(&mut timeline, 960, true, 60, 4);

        let records = simulate(timeline).unwrap();
        assert_close(records[0].timing_sec, 1.);
        assert_close(records[1].timing_sec, 1.5);
    }

    #[test]
    fn malformed_tempo_events_are_ignored() {
        let mut timeline = EventTimeline::new();
        timeline.push(
            0,
            RawEventKind::Meta(MetaEvent {
                meta_id: 0x51,
                payload: &[0x00, 0x00, 0x00],
            }),
        );
        timeline.push(
            0,
            RawEventKind::Meta(MetaEvent {
                meta_id: 0x51,
                payload: &[0x0F, 0x42],
            }),
        );
        note(&mut timeline, 480, true, 60, 4);

        let records = simulate(timeline).unwrap();
        assert_close(records[0].timing_sec, 0.5);
    }

    #[test]
    fn pairs_long_notes() {
        let mut timeline = EventTimeline::new();
        note(&mut timeline, 0, true, 60, 6);
        note(&mut timeline, 240, true, 62, 4);
        note(&mut timeline, 720, false, 60, 6);

        let records = simulate(timeline).unwrap();
        assert_eq!(records.len(), 2);

        let long = &records[0];
        assert_eq!(long.effect, Effect::Long);
        assert_eq!(long.attribute, Attribute::Smile);
        assert_eq!(long.position, lane(4));
        assert_close(long.timing_sec, 0.);
        assert_close(long.effect_value, 0.75);

        assert_eq!(records[1].effect, Effect::Normal);
        assert_eq!(records[1].position, lane(6));
        assert_close(records[1].timing_sec, 0.25);
    }

    #[test]
    fn low_channels_and_plain_note_offs_are_ignored() {
        let mut timeline = EventTimeline::new();
        note(&mut timeline, 0, true, 60, 0);
        note(&mut timeline, 0, true, 60, 2);
        note(&mut timeline, 10, false, 60, 2);
        note(&mut timeline, 20, false, 60, 4);

        assert_eq!(simulate(timeline), Ok(vec![]));
    }

    #[test]
    fn duplicate_long_note_start_fails() {
        let mut timeline = EventTimeline::new();
        note(&mut timeline, 0, true, 60, 6);
        note(&mut timeline, 10, true, 60, 10);

        assert_eq!(
            simulate(timeline),
            Err(ChartError::DuplicateLongNoteStart { lane: lane(5) })
        );
    }

    #[test]
    fn unmatched_long_note_end_fails() {
        let mut timeline = EventTimeline::new();
        note(&mut timeline, 0, false, 60, 14);

        assert_eq!(
            simulate(timeline),
            Err(ChartError::UnmatchedLongNoteEnd { lane: lane(5) })
        );
    }

    #[test]
    fn unreleased_long_notes_follow_the_policy() {
        let build = || {
            let mut timeline = EventTimeline::new();
            note(&mut timeline, 0, true, 62, 6);
            note(&mut timeline, 0, true, 60, 6);
            note(&mut timeline, 0, true, 61, 4);
            timeline
        };

        assert_eq!(
            simulate(build()),
            Err(ChartError::UnterminatedLongNote { lane: lane(4) })
        );

        let lenient = ConvertSettings::default()
            .with_unterminated_long_notes(UnterminatedLongNotes::Drop);
        let records = simulate_with(build(), &lenient).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].position, lane(5));
    }
}
