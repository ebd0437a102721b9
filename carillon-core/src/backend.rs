//! Signal backend trait: a semantic-level abstraction over the physical
//! output effects.
//!
//! `SignalBackend` captures what a component *means* to do (start a tone,
//! silence a channel, drive a pin) independently of how it's done. Effects
//! are fire-and-forget: nothing downstream acknowledges, so the methods
//! are infallible by design. Implementations translate the calls into real
//! output or record them for testing.

use carillon_types::{Level, SwitchChannel, ToneChannel};

pub trait SignalBackend: Send {
    /// Begin continuous emission at `frequency` on `channel`. Idempotent
    /// while already emitting: the channel retunes.
    fn start_tone(&mut self, channel: ToneChannel, frequency: u16);

    /// Silence `channel`. Idempotent when already silent.
    fn stop_tone(&mut self, channel: ToneChannel);

    /// Drive a binary output.
    fn set_level(&mut self, channel: SwitchChannel, level: Level);
}

/// One recorded effect, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEffect {
    ToneStarted { channel: ToneChannel, frequency: u16 },
    ToneStopped { channel: ToneChannel },
    LevelSet { channel: SwitchChannel, level: Level },
}

/// Backend double that records every effect verbatim, deduplicating
/// nothing. Tests assert on the exact effect stream.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub effects: Vec<SignalEffect>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded effects, leaving the backend empty.
    pub fn take(&mut self) -> Vec<SignalEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl SignalBackend for RecordingBackend {
    fn start_tone(&mut self, channel: ToneChannel, frequency: u16) {
        self.effects
            .push(SignalEffect::ToneStarted { channel, frequency });
    }

    fn stop_tone(&mut self, channel: ToneChannel) {
        self.effects.push(SignalEffect::ToneStopped { channel });
    }

    fn set_level(&mut self, channel: SwitchChannel, level: Level) {
        self.effects.push(SignalEffect::LevelSet { channel, level });
    }
}
