//! Two-tune handoff on a shared tone channel.

use std::sync::Arc;

use carillon_types::{Sequence, ToneChannel};

use crate::backend::SignalBackend;
use crate::clock::Clock;
use crate::player::{PlayerEvent, SequencePlayer};

/// Which of the switcher's two slots is currently driving the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveSlot {
    A,
    B,
}

impl ActiveSlot {
    fn other(self) -> ActiveSlot {
        match self {
            ActiveSlot::A => ActiveSlot::B,
            ActiveSlot::B => ActiveSlot::A,
        }
    }
}

impl std::fmt::Display for ActiveSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveSlot::A => write!(f, "A"),
            ActiveSlot::B => write!(f, "B"),
        }
    }
}

/// Progress surfaced by one switcher tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherEvent {
    StepStarted {
        slot: ActiveSlot,
        index: usize,
        frequency: u16,
    },
    TuneFinished {
        slot: ActiveSlot,
    },
    Switched {
        active: ActiveSlot,
    },
}

/// Alternates one tone channel between two sequences: when the active
/// player finishes (and auto-rewinds itself), the other one is rewound and
/// started. Both players are built here on the same channel, and only the
/// active one is ever updated or started, so the two never report playing
/// at the same time.
pub struct SequenceSwitcher {
    a: SequencePlayer,
    b: SequencePlayer,
    active: ActiveSlot,
}

impl SequenceSwitcher {
    pub fn new(channel: ToneChannel, a: Arc<Sequence>, b: Arc<Sequence>) -> Self {
        Self {
            a: SequencePlayer::new(channel, a),
            b: SequencePlayer::new(channel, b),
            active: ActiveSlot::A,
        }
    }

    pub fn active(&self) -> ActiveSlot {
        self.active
    }

    pub fn is_playing(&self) -> bool {
        self.active_player().is_playing()
    }

    fn active_player(&self) -> &SequencePlayer {
        match self.active {
            ActiveSlot::A => &self.a,
            ActiveSlot::B => &self.b,
        }
    }

    fn active_player_mut(&mut self) -> &mut SequencePlayer {
        match self.active {
            ActiveSlot::A => &mut self.a,
            ActiveSlot::B => &mut self.b,
        }
    }

    /// Start the active slot from wherever its cursor stands.
    pub fn play(&mut self, clock: &dyn Clock, backend: &mut dyn SignalBackend) {
        self.active_player_mut().play(clock, backend);
    }

    /// Silence the channel and halt the active slot.
    pub fn pause(&mut self, backend: &mut dyn SignalBackend) {
        self.active_player_mut().pause(backend);
    }

    /// Rewind the active slot. If it was playing, restart it from the top;
    /// otherwise leave it stopped.
    pub fn rewind(&mut self, clock: &dyn Clock, backend: &mut dyn SignalBackend) {
        let was_playing = self.is_playing();
        let player = self.active_player_mut();
        if was_playing {
            player.pause(backend);
        }
        player.from_the_top();
        if was_playing {
            player.play(clock, backend);
        }
    }

    /// Tick the active player; on completion hand the channel to the other
    /// slot. The handoff happens on the same tick the finish is observed,
    /// so there is never a poll on which both players report playing.
    pub fn update(
        &mut self,
        clock: &dyn Clock,
        backend: &mut dyn SignalBackend,
    ) -> Vec<SwitcherEvent> {
        let mut out = Vec::new();
        let slot = self.active;

        match self.active_player_mut().update(clock, backend) {
            None => {}
            Some(PlayerEvent::StepStarted { index, frequency }) => {
                out.push(SwitcherEvent::StepStarted {
                    slot,
                    index,
                    frequency,
                });
            }
            Some(PlayerEvent::Finished) => {
                out.push(SwitcherEvent::TuneFinished { slot });

                self.active = slot.other();
                let next = self.active_player_mut();
                next.from_the_top();
                next.play(clock, backend);
                log::debug!(target: "switcher", "handoff to slot {}", self.active);
                out.push(SwitcherEvent::Switched {
                    active: self.active,
                });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RecordingBackend, SignalEffect};
    use crate::clock::ManualClock;
    use carillon_types::{pitch, Step};

    const CH: ToneChannel = ToneChannel::new(3);

    fn make_switcher() -> SequenceSwitcher {
        // A: two quarters; B: a single half note.
        let a = Arc::new(
            Sequence::new(vec![
                Step::note(pitch::C4, 4),
                Step::note(pitch::E4, 4),
            ])
            .unwrap(),
        );
        let b = Arc::new(Sequence::new(vec![Step::note(pitch::G4, 2)]).unwrap());
        SequenceSwitcher::new(CH, a, b)
    }

    #[test]
    fn hands_off_to_the_other_slot_on_completion() {
        let clock = ManualClock::new(0);
        let mut backend = RecordingBackend::new();
        let mut switcher = make_switcher();

        switcher.play(&clock, &mut backend);
        assert_eq!(switcher.active(), ActiveSlot::A);

        clock.set(250);
        switcher.update(&clock, &mut backend);

        // A finishes at t=500; B must take over on the same tick.
        clock.set(500);
        let events = switcher.update(&clock, &mut backend);
        assert_eq!(
            events,
            vec![
                SwitcherEvent::TuneFinished { slot: ActiveSlot::A },
                SwitcherEvent::Switched {
                    active: ActiveSlot::B
                },
            ]
        );
        assert_eq!(switcher.active(), ActiveSlot::B);
        assert!(switcher.is_playing());

        // B's half note runs to t=1000, then the channel returns to A.
        clock.set(1000);
        let events = switcher.update(&clock, &mut backend);
        assert!(events.contains(&SwitcherEvent::Switched {
            active: ActiveSlot::A
        }));
    }

    #[test]
    fn players_never_both_report_playing() {
        let clock = ManualClock::new(0);
        let mut backend = RecordingBackend::new();
        let mut switcher = make_switcher();

        switcher.play(&clock, &mut backend);
        for t in (0..5_000).step_by(50) {
            clock.set(t);
            switcher.update(&clock, &mut backend);
            let both = switcher.a.is_playing() && switcher.b.is_playing();
            assert!(!both, "both players playing at t={}", t);
        }
    }

    #[test]
    fn handoff_emission_follows_the_finish_stop() {
        let clock = ManualClock::new(0);
        let mut backend = RecordingBackend::new();
        let mut switcher = make_switcher();

        switcher.play(&clock, &mut backend);
        clock.set(250);
        switcher.update(&clock, &mut backend);
        backend.take();

        clock.set(500);
        switcher.update(&clock, &mut backend);
        assert_eq!(
            backend.take(),
            vec![
                SignalEffect::ToneStopped { channel: CH },
                SignalEffect::ToneStarted {
                    channel: CH,
                    frequency: pitch::G4
                },
            ]
        );
    }

    #[test]
    fn pause_halts_the_active_slot_only() {
        let clock = ManualClock::new(0);
        let mut backend = RecordingBackend::new();
        let mut switcher = make_switcher();

        switcher.play(&clock, &mut backend);
        switcher.pause(&mut backend);
        assert!(!switcher.is_playing());

        // Paused: time passing produces no events and no effects.
        backend.take();
        clock.set(10_000);
        assert!(switcher.update(&clock, &mut backend).is_empty());
        assert!(backend.take().is_empty());

        // Resume continues the active slot where it stood.
        switcher.play(&clock, &mut backend);
        assert_eq!(switcher.active(), ActiveSlot::A);
        assert!(switcher.is_playing());
    }

    #[test]
    fn rewind_while_playing_restarts_the_active_tune() {
        let clock = ManualClock::new(0);
        let mut backend = RecordingBackend::new();
        let mut switcher = make_switcher();

        switcher.play(&clock, &mut backend);
        clock.set(250);
        switcher.update(&clock, &mut backend); // A now at step 1
        backend.take();

        switcher.rewind(&clock, &mut backend);
        assert!(switcher.is_playing());
        assert_eq!(
            backend.take(),
            vec![
                SignalEffect::ToneStopped { channel: CH },
                SignalEffect::ToneStarted {
                    channel: CH,
                    frequency: pitch::C4
                },
            ]
        );
    }
}
