//! # carillon-types
//!
//! Shared type definitions for the carillon playback ecosystem.
//! This crate contains the plain data carried between the control loop,
//! the configuration layer, and tune files: pitches, steps, sequences,
//! and the hardware-facing channel vocabulary.

pub mod channel;
pub mod pitch;
pub mod step;
pub mod tunes;

pub use channel::{BlinkerConfig, Level, SwitchChannel, ToneChannel};
pub use pitch::Key;
pub use step::{Sequence, SequenceError, Step, WHOLE_NOTE_MS};
pub use tunes::{Tune, TuneError};
