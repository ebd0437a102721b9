//! Free-running periodic output toggler.

use carillon_types::{BlinkerConfig, Level, SwitchChannel};

use crate::backend::SignalBackend;
use crate::clock::{elapsed, Clock, Millis};

/// Toggles a binary output between two independently configured hold
/// durations, forever. Shares nothing with the players beyond the polling
/// cadence of the loop that updates it.
pub struct PeriodicBlinker {
    channel: SwitchChannel,
    config: BlinkerConfig,
    level: Level,
    last_toggle: Millis,
}

impl PeriodicBlinker {
    /// Starts Low with `last_toggle = 0`, so the first update after
    /// construction may toggle immediately once `now >= off_ms` — accepted
    /// startup skew.
    pub fn new(channel: SwitchChannel, config: BlinkerConfig) -> Self {
        Self {
            channel,
            config,
            level: Level::Low,
            last_toggle: 0,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn config(&self) -> BlinkerConfig {
        self.config
    }

    /// Toggle at most once per call: a hold overrun spanning several
    /// multiples of the duration is caught one toggle per subsequent call,
    /// never compensated within one.
    pub fn update(
        &mut self,
        clock: &dyn Clock,
        backend: &mut dyn SignalBackend,
    ) -> Option<Level> {
        let now = clock.now();
        let held = elapsed(self.last_toggle, now);

        let hold = match self.level {
            Level::High => self.config.on_ms,
            Level::Low => self.config.off_ms,
        };
        if held < hold {
            return None;
        }

        self.level = self.level.toggled();
        self.last_toggle = now;
        backend.set_level(self.channel, self.level);
        log::trace!(target: "blinker", "channel {} -> {}", self.channel, self.level.name());
        Some(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RecordingBackend, SignalEffect};
    use crate::clock::ManualClock;

    const CH: SwitchChannel = SwitchChannel::new(13);

    fn make_blinker(on_ms: u32, off_ms: u32) -> PeriodicBlinker {
        PeriodicBlinker::new(CH, BlinkerConfig { on_ms, off_ms })
    }

    #[test]
    fn alternates_between_the_two_hold_durations() {
        let clock = ManualClock::new(0);
        let mut backend = RecordingBackend::new();
        let mut blinker = make_blinker(100, 300);

        // Off hold runs from t=0.
        clock.set(299);
        assert_eq!(blinker.update(&clock, &mut backend), None);
        clock.set(300);
        assert_eq!(blinker.update(&clock, &mut backend), Some(Level::High));

        clock.set(399);
        assert_eq!(blinker.update(&clock, &mut backend), None);
        clock.set(400);
        assert_eq!(blinker.update(&clock, &mut backend), Some(Level::Low));

        assert_eq!(
            backend.take(),
            vec![
                SignalEffect::LevelSet {
                    channel: CH,
                    level: Level::High
                },
                SignalEffect::LevelSet {
                    channel: CH,
                    level: Level::Low
                },
            ]
        );
    }

    #[test]
    fn toggles_at_most_once_per_call() {
        let clock = ManualClock::new(0);
        let mut backend = RecordingBackend::new();
        let mut blinker = make_blinker(100, 100);

        // Ten full periods elapse before anyone polls.
        clock.set(2_000);
        assert_eq!(blinker.update(&clock, &mut backend), Some(Level::High));
        assert_eq!(backend.take().len(), 1);

        // The missed cycles are not compensated; the next toggle waits a
        // full hold from this one.
        clock.set(2_099);
        assert_eq!(blinker.update(&clock, &mut backend), None);
        clock.set(2_100);
        assert_eq!(blinker.update(&clock, &mut backend), Some(Level::Low));
    }

    #[test]
    fn startup_skew_can_fire_immediately() {
        let clock = ManualClock::new(500);
        let mut backend = RecordingBackend::new();
        let mut blinker = make_blinker(100, 300);

        // Constructed with last_toggle = 0 while the clock already reads
        // 500: the first poll toggles at once.
        assert_eq!(blinker.update(&clock, &mut backend), Some(Level::High));
    }

    #[test]
    fn keeps_oscillating_across_wraparound() {
        let clock = ManualClock::new(0);
        let mut backend = RecordingBackend::new();
        let mut blinker = make_blinker(200, 200);

        clock.set(u32::MAX - 50);
        blinker.update(&clock, &mut backend);
        assert_eq!(blinker.level(), Level::High);

        // 200 ms later the counter has wrapped to 149.
        clock.advance(199);
        assert_eq!(blinker.update(&clock, &mut backend), None);
        clock.advance(1);
        assert_eq!(blinker.update(&clock, &mut backend), Some(Level::Low));
    }
}
