//! Log-backed signal backend.
//!
//! Stands in for the physical outputs on a development host: every effect
//! becomes a log line on the `signal` target, in call order.

use carillon_core::SignalBackend;
use carillon_types::{Level, SwitchChannel, ToneChannel};

pub struct ConsoleBackend;

impl SignalBackend for ConsoleBackend {
    fn start_tone(&mut self, channel: ToneChannel, frequency: u16) {
        log::info!(target: "signal", "tone {} Hz on channel {}", frequency, channel);
    }

    fn stop_tone(&mut self, channel: ToneChannel) {
        log::info!(target: "signal", "silence on channel {}", channel);
    }

    fn set_level(&mut self, channel: SwitchChannel, level: Level) {
        log::info!(target: "signal", "channel {} {}", channel, level.name());
    }
}
