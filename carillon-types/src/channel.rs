use serde::{Deserialize, Serialize};

/// Identifies the output a player emits tones on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ToneChannel(u8);

impl ToneChannel {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ToneChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a binary output (an indicator LED pin, typically).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SwitchChannel(u8);

impl SwitchChannel {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for SwitchChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logic level on a binary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn toggled(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::High => "high",
        }
    }
}

/// Hold durations for a periodic blinker. Immutable after construction;
/// replacing the blinker is how the durations change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkerConfig {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl Default for BlinkerConfig {
    fn default() -> Self {
        Self {
            on_ms: 500,
            off_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_toggles_both_ways() {
        assert_eq!(Level::Low.toggled(), Level::High);
        assert_eq!(Level::High.toggled(), Level::Low);
    }

    #[test]
    fn channel_newtypes_round_trip_transparently() {
        let json = serde_json::to_string(&ToneChannel::new(8)).unwrap();
        assert_eq!(json, "8");
        let back: ToneChannel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(), 8);
    }
}
