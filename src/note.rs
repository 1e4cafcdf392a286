//! Musical note conversion
//!
//! Maps a frequency onto the nearest equal-tempered note (A4 = 440 Hz) and
//! reports how far off it is in cents.

use std::fmt;

use crate::config::{check_octave_range, DEFAULT_MAX_OCTAVE, DEFAULT_MIN_OCTAVE};
use crate::error::TunerError;

pub const A4_FREQUENCY: f64 = 440.0;

/// Semitone index of A4 counted from C0.
const A4_SEMITONE: i32 = 57;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Position within the octave, C = 0 through B = 11.
    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

/// One equal-tempered note and its reference frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: i32,
    pub reference_frequency: f64,
}

impl Note {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self {
            pitch_class,
            octave,
            reference_frequency: note_frequency(pitch_class, octave),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class.name(), self.octave)
    }
}

/// What the tuner reports for one qualifying frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningResult {
    pub measured_frequency: f64,
    pub nearest_note: Note,
    /// Negative when flat, positive when sharp.
    pub cents_offset: f64,
}

/// `440 * 2^((octave*12 + note - 57)/12)`
pub fn note_frequency(pitch_class: PitchClass, octave: i32) -> f64 {
    let semitones = octave * 12 + pitch_class.index() - A4_SEMITONE;
    A4_FREQUENCY * 2.0_f64.powf(f64::from(semitones) / 12.0)
}

pub fn cents_between(measured: f64, reference: f64) -> f64 {
    1200.0 * (measured / reference).log2()
}

/// Every note the tuner can report, lowest first.
#[derive(Debug, Clone)]
pub struct NoteTable {
    notes: Vec<Note>,
}

fn build_notes(min_octave: i32, max_octave: i32) -> Vec<Note> {
    (min_octave..=max_octave)
        .flat_map(|octave| {
            PitchClass::ALL
                .iter()
                .map(move |&pitch_class| Note::new(pitch_class, octave))
        })
        .collect()
}

impl NoteTable {
    /// Builds the table for octaves `min_octave..=max_octave`, octave-major.
    pub fn new(min_octave: i32, max_octave: i32) -> Result<Self, TunerError> {
        check_octave_range(min_octave, max_octave)?;

        Ok(Self {
            notes: build_notes(min_octave, max_octave),
        })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The note whose reference frequency is closest in Hz.
    ///
    /// Distance is measured in Hz rather than cents, so just above the
    /// midpoint between two notes the lower one is still reported, with an
    /// offset a little over +50 cents. Ties go to the lower note.
    pub fn nearest(&self, frequency: f64) -> Note {
        let mut closest = self.notes[0];
        let mut min_difference = (closest.reference_frequency - frequency).abs();

        for note in &self.notes[1..] {
            let difference = (note.reference_frequency - frequency).abs();
            if difference < min_difference {
                min_difference = difference;
                closest = *note;
            }
        }

        closest
    }

    pub fn map(&self, frequency: f64) -> TuningResult {
        let nearest_note = self.nearest(frequency);
        TuningResult {
            measured_frequency: frequency,
            nearest_note,
            cents_offset: cents_between(frequency, nearest_note.reference_frequency),
        }
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self {
            notes: build_notes(DEFAULT_MIN_OCTAVE, DEFAULT_MAX_OCTAVE),
        }
    }
}
