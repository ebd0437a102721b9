//! Steps and validated sequences.

use serde::{Deserialize, Serialize};

use crate::pitch::REST;

/// One whole note at the fixed implicit tempo, in milliseconds. A step's
/// hold time is `WHOLE_NOTE_MS / duration_code`, truncating; the drift that
/// truncation accumulates over a long sequence is accepted, not corrected.
pub const WHOLE_NOTE_MS: u32 = 1000;

/// One unit of a sequence: a frequency to emit and a musical note-value
/// divisor (4 = quarter, 12 = twelfth). Frequency 0 is a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub frequency: u16,
    pub duration_code: u16,
}

impl Step {
    pub fn note(frequency: u16, duration_code: u16) -> Self {
        Self {
            frequency,
            duration_code,
        }
    }

    pub fn rest(duration_code: u16) -> Self {
        Self {
            frequency: REST,
            duration_code,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.frequency == REST
    }

    /// Hold time in milliseconds. `Sequence` construction guarantees the
    /// duration code is nonzero; a bare `Step` that bypassed validation
    /// would divide by zero here.
    pub fn hold_ms(&self) -> u32 {
        WHOLE_NOTE_MS / self.duration_code as u32
    }
}

/// Error from `Sequence` construction. Data errors are rejected here, never
/// deferred to playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    Empty,
    ZeroDurationCode { index: usize },
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "sequence has no steps"),
            Self::ZeroDurationCode { index } => {
                write!(f, "step {} has a zero duration code", index)
            }
        }
    }
}

impl std::error::Error for SequenceError {}

/// An ordered, fixed-length list of steps behind a validating constructor.
/// Players share a sequence read-only; every mutable cursor lives in the
/// player, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new(steps: Vec<Step>) -> Result<Self, SequenceError> {
        if steps.is_empty() {
            return Err(SequenceError::Empty);
        }
        for (index, step) in steps.iter().enumerate() {
            if step.duration_code == 0 {
                return Err(SequenceError::ZeroDurationCode { index });
            }
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl TryFrom<Vec<Step>> for Sequence {
    type Error = SequenceError;

    fn try_from(steps: Vec<Step>) -> Result<Self, Self::Error> {
        Sequence::new(steps)
    }
}

impl From<Sequence> for Vec<Step> {
    fn from(sequence: Sequence) -> Self {
        sequence.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch;

    #[test]
    fn rejects_empty_sequence() {
        assert_eq!(Sequence::new(Vec::new()), Err(SequenceError::Empty));
    }

    #[test]
    fn rejects_zero_duration_code() {
        let steps = vec![Step::note(pitch::A4, 4), Step::note(pitch::E4, 0)];
        assert_eq!(
            Sequence::new(steps),
            Err(SequenceError::ZeroDurationCode { index: 1 })
        );
    }

    #[test]
    fn hold_times_truncate() {
        assert_eq!(Step::note(pitch::A4, 4).hold_ms(), 250);
        assert_eq!(Step::note(pitch::A4, 2).hold_ms(), 500);
        // 1000 / 12 truncates; the remainder is dropped, not carried.
        assert_eq!(Step::note(pitch::A4, 12).hold_ms(), 83);
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let err = serde_json::from_str::<Sequence>(
            r#"[{"frequency": 440, "duration_code": 0}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("zero duration code"));

        let ok: Sequence =
            serde_json::from_str(r#"[{"frequency": 440, "duration_code": 4}]"#).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn rest_constructor_is_silent() {
        let rest = Step::rest(8);
        assert!(rest.is_rest());
        assert_eq!(rest.frequency, pitch::REST);
    }
}
