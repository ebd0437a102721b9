//! Command and feedback types for the control-loop thread.
//!
//! `CarillonHandle` serializes commands through a channel to the loop
//! thread and drains feedback on the caller's side; neither direction
//! blocks the loop.

use carillon_types::{BlinkerConfig, Level};

use crate::switcher::ActiveSlot;

/// Commands sent from the owning thread into the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarillonCmd {
    /// Resume (`true`) or pause (`false`) the active tune.
    SetPlaying { playing: bool },
    /// Rewind the active tune; restarts it if it was playing.
    Rewind,
    /// Replace the blinker with one holding the new durations.
    SetBlink { config: BlinkerConfig },
    /// Stop the loop, silencing every output on the way out.
    Shutdown,
}

/// Progress reported by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarillonFeedback {
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
    Toggled {
        level: Level,
    },
}
