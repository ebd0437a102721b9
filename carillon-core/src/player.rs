//! Non-blocking timed-sequence player.
//!
//! Advances through a validated [`Sequence`] one step at a time, holding
//! each step for `1000 / duration_code` milliseconds against the polled
//! clock. Nothing here blocks or sleeps; `update` is meant to run every
//! control-loop iteration and returns immediately inside a step's hold
//! window.

use std::sync::Arc;

use carillon_types::{Sequence, Step, ToneChannel};

use crate::backend::SignalBackend;
use crate::clock::{elapsed, Clock, Millis};

/// What an `update` call did, for callers that surface playback progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Advanced into the step at `index`; `frequency` 0 means the step is
    /// a rest and nothing was emitted.
    StepStarted { index: usize, frequency: u16 },
    /// Ran past the final step. The player has stopped and rewound itself.
    Finished,
}

/// Per-player mutable state, bound at construction to one channel and one
/// shared sequence. The sequence is read-only; the cursor lives here.
pub struct SequencePlayer {
    channel: ToneChannel,
    sequence: Arc<Sequence>,
    running: bool,
    cursor: usize,
    step_start: Millis,
    step_duration: Millis,
}

impl SequencePlayer {
    pub fn new(channel: ToneChannel, sequence: Arc<Sequence>) -> Self {
        Self {
            channel,
            sequence,
            running: false,
            cursor: 0,
            step_start: 0,
            step_duration: 0,
        }
    }

    /// Start (or re-enter) playback of the current step. Re-arms the step
    /// timer and retunes if the channel is already emitting; a rest step
    /// emits nothing and the channel stays silent.
    pub fn play(&mut self, clock: &dyn Clock, backend: &mut dyn SignalBackend) {
        let Some(step) = self.current_step().copied() else {
            return;
        };
        self.running = true;
        self.step_start = clock.now();
        self.step_duration = step.hold_ms();
        if !step.is_rest() {
            backend.start_tone(self.channel, step.frequency);
        }
        log::debug!(
            target: "player",
            "play: channel {} step {} ({} Hz, {} ms)",
            self.channel, self.cursor, step.frequency, self.step_duration
        );
    }

    /// Stop emission immediately and halt advancement. The cursor is
    /// preserved; a later `play` restarts the current step's full hold
    /// time rather than resuming mid-step.
    pub fn pause(&mut self, backend: &mut dyn SignalBackend) {
        backend.stop_tone(self.channel);
        self.running = false;
    }

    /// Rewind to step 0 and clear the timing fields. Touches neither the
    /// running flag nor the hardware: callers pair this with explicit
    /// `pause`/`play`. A subsequent `play` re-arms the timer.
    pub fn from_the_top(&mut self) {
        self.cursor = 0;
        self.step_start = 0;
        self.step_duration = 0;
    }

    /// True exactly while the sequence is mid-advancement, including while
    /// the terminal step is held.
    pub fn is_playing(&self) -> bool {
        self.running
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.sequence.step(self.cursor)
    }

    /// The core tick. Inside a step's hold window this is a no-op; at a
    /// boundary it stops the current emission, advances, and either starts
    /// the next step or completes. On completion the player stops and
    /// rewinds itself, so the next `play` starts the sequence over without
    /// an explicit `from_the_top`.
    pub fn update(
        &mut self,
        clock: &dyn Clock,
        backend: &mut dyn SignalBackend,
    ) -> Option<PlayerEvent> {
        if !self.running {
            return None;
        }

        let now = clock.now();
        if elapsed(self.step_start, now) < self.step_duration {
            return None;
        }

        backend.stop_tone(self.channel);
        self.cursor += 1;

        if self.cursor >= self.sequence.len() {
            self.running = false;
            self.cursor = 0;
            self.step_start = 0;
            self.step_duration = 0;
            log::debug!(target: "player", "sequence complete on channel {}", self.channel);
            return Some(PlayerEvent::Finished);
        }

        let Some(step) = self.sequence.step(self.cursor).copied() else {
            return None;
        };

        // Re-arm from this tick's time, not the nominal boundary; the
        // drift equals tick latency and is accepted.
        self.step_start = now;
        self.step_duration = step.hold_ms();
        if !step.is_rest() {
            backend.start_tone(self.channel, step.frequency);
        }

        Some(PlayerEvent::StepStarted {
            index: self.cursor,
            frequency: step.frequency,
        })
    }
}
