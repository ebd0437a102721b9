//! Built-in tunes and tune-file loading.
//!
//! A tune file is a JSON document:
//!
//! ```json
//! {
//!   "name": "doorbell",
//!   "steps": [
//!     { "frequency": 659, "duration_code": 4 },
//!     { "frequency": 523, "duration_code": 2 }
//!   ]
//! }
//! ```
//!
//! Loading goes through `Sequence::new`, so a document with no steps or a
//! zero duration code is rejected here and never reaches playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pitch;
use crate::step::{Sequence, SequenceError, Step};

/// A named, validated sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tune {
    pub name: String,
    pub steps: Sequence,
}

/// Error type for tune-file loading.
#[derive(Debug)]
pub enum TuneError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(SequenceError),
}

impl From<std::io::Error> for TuneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuneError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<SequenceError> for TuneError {
    fn from(e: SequenceError) -> Self {
        Self::Invalid(e)
    }
}

impl std::fmt::Display for TuneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Invalid(e) => write!(f, "invalid sequence: {}", e),
        }
    }
}

impl std::error::Error for TuneError {}

impl Tune {
    pub fn new(name: impl Into<String>, steps: Sequence) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Load a tune from a JSON file. The step list is deserialized raw and
    /// then validated, so data errors surface as `TuneError::Invalid`
    /// rather than being folded into the JSON error.
    pub fn from_json_file(path: &Path) -> Result<Tune, TuneError> {
        #[derive(Deserialize)]
        struct TuneFile {
            name: String,
            steps: Vec<Step>,
        }

        let file = File::open(path)?;
        let raw: TuneFile = serde_json::from_reader(BufReader::new(file))?;
        let steps = Sequence::new(raw.steps)?;
        Ok(Tune {
            name: raw.name,
            steps,
        })
    }
}

fn sequence(steps: Vec<Step>) -> Sequence {
    // Built-in data; a construction error here is a bug in this file.
    Sequence::new(steps).expect("built-in tune must be valid")
}

/// Ascending three-chime figure with a breath before the answer.
pub fn chime_a() -> Tune {
    Tune::new(
        "chime-a",
        sequence(vec![
            Step::note(pitch::C4, 4),
            Step::note(pitch::E4, 4),
            Step::note(pitch::G4, 4),
            Step::rest(4),
            Step::note(pitch::C5, 2),
            Step::rest(2),
        ]),
    )
}

/// Descending answer to `chime_a`, ending on the low tonic.
pub fn chime_b() -> Tune {
    Tune::new(
        "chime-b",
        sequence(vec![
            Step::note(pitch::C5, 4),
            Step::note(pitch::G4, 4),
            Step::note(pitch::E4, 4),
            Step::rest(8),
            Step::note(pitch::C4, 2),
            Step::rest(2),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_tunes_are_valid() {
        assert!(chime_a().steps.len() >= 1);
        assert!(chime_b().steps.len() >= 1);
    }

    #[test]
    fn builtin_tunes_exercise_rests() {
        assert!(chime_a().steps.steps().iter().any(|s| s.is_rest()));
        assert!(chime_b().steps.steps().iter().any(|s| s.is_rest()));
    }

    #[test]
    fn loads_a_tune_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "test", "steps": [{{"frequency": 440, "duration_code": 4}}]}}"#
        )
        .unwrap();

        let tune = Tune::from_json_file(file.path()).unwrap();
        assert_eq!(tune.name, "test");
        assert_eq!(tune.steps.len(), 1);
    }

    #[test]
    fn rejects_a_tune_file_with_zero_duration_code() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "bad", "steps": [{{"frequency": 440, "duration_code": 0}}]}}"#
        )
        .unwrap();

        match Tune::from_json_file(file.path()) {
            Err(TuneError::Invalid(SequenceError::ZeroDurationCode { index: 0 })) => {}
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_maps_to_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match Tune::from_json_file(&path) {
            Err(TuneError::Io(_)) => {}
            other => panic!("expected an IO error, got {:?}", other),
        }
    }
}
