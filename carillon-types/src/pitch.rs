//! Pitch vocabulary for sequence authors.
//!
//! Frequencies are in hertz, rounded to the nearest integer from twelve-tone
//! equal temperament at A4 = 440. Frequency 0 is the silence sentinel: a
//! step carrying it is a rest and never reaches the hardware as a tone.

use serde::{Deserialize, Serialize};

/// The silence sentinel. A step with this frequency is a rest.
pub const REST: u16 = 0;

pub const C3: u16 = 131;
pub const CS3: u16 = 139;
pub const D3: u16 = 147;
pub const DS3: u16 = 156;
pub const E3: u16 = 165;
pub const F3: u16 = 175;
pub const FS3: u16 = 185;
pub const G3: u16 = 196;
pub const GS3: u16 = 208;
pub const A3: u16 = 220;
pub const AS3: u16 = 233;
pub const B3: u16 = 247;

pub const C4: u16 = 262;
pub const CS4: u16 = 277;
pub const D4: u16 = 294;
pub const DS4: u16 = 311;
pub const E4: u16 = 330;
pub const F4: u16 = 349;
pub const FS4: u16 = 370;
pub const G4: u16 = 392;
pub const GS4: u16 = 415;
pub const A4: u16 = 440;
pub const AS4: u16 = 466;
pub const B4: u16 = 494;

pub const C5: u16 = 523;
pub const CS5: u16 = 554;
pub const D5: u16 = 587;
pub const DS5: u16 = 622;
pub const E5: u16 = 659;
pub const F5: u16 = 698;
pub const FS5: u16 = 740;
pub const G5: u16 = 784;
pub const GS5: u16 = 831;
pub const A5: u16 = 880;
pub const AS5: u16 = 932;
pub const B5: u16 = 988;

/// Musical key (pitch class)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::C,
        Key::Cs,
        Key::D,
        Key::Ds,
        Key::E,
        Key::F,
        Key::Fs,
        Key::G,
        Key::Gs,
        Key::A,
        Key::As,
        Key::B,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Key::C => "C",
            Key::Cs => "C#",
            Key::D => "D",
            Key::Ds => "D#",
            Key::E => "E",
            Key::F => "F",
            Key::Fs => "F#",
            Key::G => "G",
            Key::Gs => "G#",
            Key::A => "A",
            Key::As => "A#",
            Key::B => "B",
        }
    }

    /// Semitone offset within the octave, C = 0.
    pub fn semitone(&self) -> i32 {
        match self {
            Key::C => 0,
            Key::Cs => 1,
            Key::D => 2,
            Key::Ds => 3,
            Key::E => 4,
            Key::F => 5,
            Key::Fs => 6,
            Key::G => 7,
            Key::Gs => 8,
            Key::A => 9,
            Key::As => 10,
            Key::B => 11,
        }
    }
}

/// Equal-tempered frequency of a key in the given octave, A4 = 440,
/// rounded to the nearest hertz.
pub fn frequency(key: Key, octave: i32) -> u16 {
    let semitones_from_a4 = (octave - 4) * 12 + key.semitone() - Key::A.semitone();
    let hz = 440.0_f32 * 2.0_f32.powf(semitones_from_a4 as f32 / 12.0);
    hz.round() as u16
}
