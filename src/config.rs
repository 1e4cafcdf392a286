//! Analyzer configuration
//!
//! A `TunerConfig` is built once at startup, validated, and then only ever
//! read. Every preallocated buffer in the pipeline is sized from it.

use crate::error::TunerError;

pub const DEFAULT_WINDOW_SIZE: usize = 4096;
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_MIN_AMPLITUDE: f64 = 0.01;
pub const DEFAULT_MIN_OCTAVE: i32 = 0;
pub const DEFAULT_MAX_OCTAVE: i32 = 7;

/// Smallest window whose N/2-bin spectrum still has three bins to interpolate over.
pub const MIN_WINDOW_SIZE: usize = 6;
/// Octaves outside this range are below hearing or above any sample rate.
pub const LOWEST_OCTAVE: i32 = -1;
pub const HIGHEST_OCTAVE: i32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TunerConfig {
    /// Samples per analysis frame.
    pub window_size: usize,
    /// Sample rate in Hz of the frames fed to the detector.
    pub sample_rate: f64,
    /// RMS level a frame must exceed to be analyzed.
    pub min_amplitude: f64,
    /// Lowest octave in the note table.
    pub min_octave: i32,
    /// Highest octave in the note table (inclusive).
    pub max_octave: i32,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            sample_rate: f64::from(DEFAULT_SAMPLE_RATE),
            min_amplitude: DEFAULT_MIN_AMPLITUDE,
            min_octave: DEFAULT_MIN_OCTAVE,
            max_octave: DEFAULT_MAX_OCTAVE,
        }
    }
}

impl TunerConfig {
    /// Returns a copy of this configuration using the rate the device actually negotiated.
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Width of one spectral bin in Hz.
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        self.sample_rate / self.window_size as f64
    }

    /// Checks every field against the range the pipeline can handle.
    ///
    /// # Errors
    /// Returns [`TunerError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), TunerError> {
        if self.window_size < MIN_WINDOW_SIZE {
            return Err(TunerError::InvalidConfig(format!(
                "window size must be at least {MIN_WINDOW_SIZE}, got {}",
                self.window_size
            )));
        }
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(TunerError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if !self.min_amplitude.is_finite() || self.min_amplitude < 0.0 {
            return Err(TunerError::InvalidConfig(format!(
                "amplitude threshold must be a non-negative number, got {}",
                self.min_amplitude
            )));
        }
        check_octave_range(self.min_octave, self.max_octave)
    }
}

/// Rejects an empty octave range or one reaching past
/// [`LOWEST_OCTAVE`]..=[`HIGHEST_OCTAVE`].
pub(crate) fn check_octave_range(min_octave: i32, max_octave: i32) -> Result<(), TunerError> {
    if min_octave > max_octave {
        return Err(TunerError::InvalidConfig(format!(
            "octave range {min_octave}..={max_octave} is empty"
        )));
    }
    if min_octave < LOWEST_OCTAVE || max_octave > HIGHEST_OCTAVE {
        return Err(TunerError::InvalidConfig(format!(
            "octave range {min_octave}..={max_octave} must lie within \
             {LOWEST_OCTAVE}..={HIGHEST_OCTAVE}"
        )));
    }
    Ok(())
}
