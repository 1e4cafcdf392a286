//! Pitch-detection core for the pluck-tuner guitar tuner
//!
//! Turns fixed-size frames of captured audio into the nearest equal-tempered
//! note and a cents offset. The library holds no audio, terminal or process
//! state; the binary wires it to a capture device and a display.
//!
//! ```
//! use pluck_tuner::{PitchDetector, TunerConfig};
//!
//! let config = TunerConfig::default();
//! let frame: Vec<f64> = (0..config.window_size)
//!     .map(|i| 0.5 * (2.0 * std::f64::consts::PI * 110.0 * i as f64 / config.sample_rate).sin())
//!     .collect();
//!
//! let mut detector = PitchDetector::new(config).unwrap();
//! let result = detector.analyze(&frame).unwrap().unwrap();
//! assert_eq!(result.nearest_note.to_string(), "A2");
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod frame;
pub mod gate;
pub mod handoff;
pub mod note;
pub mod peak;
pub mod pitch;
pub mod preset;
pub mod spectrum;
pub mod window;

pub use config::TunerConfig;
pub use error::TunerError;
pub use frame::FrameAssembler;
pub use handoff::{ResultPublisher, ResultReader};
pub use note::{Note, NoteTable, PitchClass, TuningResult};
pub use pitch::PitchDetector;
pub use preset::{StringTarget, TuningPreset};
