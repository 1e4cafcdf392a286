//! Pitch detection and musical note conversion
//!
//! Runs the full per-frame pipeline: sample conversion, amplitude gate, Hann
//! window, real FFT, peak refinement and note mapping. Every buffer is
//! allocated in [`PitchDetector::new`]; analyzing a frame only overwrites
//! them, which keeps the detector safe to call from an audio callback.

use cpal::{FromSample, Sample};
use rustfft::num_complex::Complex;

use crate::config::TunerConfig;
use crate::convert::convert_frame;
use crate::error::TunerError;
use crate::gate::AmplitudeGate;
use crate::note::{NoteTable, TuningResult};
use crate::peak::refine_peak;
use crate::spectrum::SpectralTransform;
use crate::window::HannWindow;

pub struct PitchDetector {
    config: TunerConfig,
    frame: Vec<f64>,
    gate: AmplitudeGate,
    window: HannWindow,
    transform: SpectralTransform,
    notes: NoteTable,
}

impl PitchDetector {
    /// # Errors
    /// Returns [`TunerError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: TunerConfig) -> Result<Self, TunerError> {
        config.validate()?;

        let window_size = config.window_size;
        Ok(Self {
            frame: vec![0.0; window_size],
            gate: AmplitudeGate::new(config.min_amplitude),
            window: HannWindow::new(window_size),
            transform: SpectralTransform::new(window_size),
            notes: NoteTable::new(config.min_octave, config.max_octave)?,
            config,
        })
    }

    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    pub fn notes(&self) -> &NoteTable {
        &self.notes
    }

    /// One-sided spectrum of the last frame that made it past the gate.
    pub fn spectrum(&self) -> &[Complex<f64>] {
        self.transform.spectrum()
    }

    /// Converts a frame of raw device samples and analyzes it.
    ///
    /// # Errors
    /// Returns [`TunerError::InvalidFrameLength`] if `raw` is not exactly one
    /// window long.
    pub fn process<T>(&mut self, raw: &[T]) -> Result<Option<TuningResult>, TunerError>
    where
        T: Sample,
        f64: FromSample<T>,
    {
        convert_frame(raw, &mut self.frame)?;

        // Vec::new does not allocate, so swapping the frame out is free
        let frame = std::mem::take(&mut self.frame);
        let result = self.analyze(&frame);
        self.frame = frame;
        result
    }

    /// Analyzes one frame of normalized samples.
    ///
    /// `Ok(None)` means the frame was too quiet or had no usable peak; the
    /// caller should simply keep showing whatever it showed before.
    ///
    /// # Errors
    /// Returns [`TunerError::InvalidFrameLength`] if `frame` is not exactly
    /// one window long.
    pub fn analyze(&mut self, frame: &[f64]) -> Result<Option<TuningResult>, TunerError> {
        Ok(self
            .estimate_pitch(frame)?
            .map(|frequency| self.notes.map(frequency)))
    }

    /// Refined fundamental frequency of `frame` in Hz, without note mapping.
    ///
    /// # Errors
    /// Returns [`TunerError::InvalidFrameLength`] if `frame` is not exactly
    /// one window long.
    pub fn estimate_pitch(&mut self, frame: &[f64]) -> Result<Option<f64>, TunerError> {
        let window_size = self.config.window_size;
        if frame.len() != window_size {
            return Err(TunerError::InvalidFrameLength {
                expected: window_size,
                actual: frame.len(),
            });
        }

        if !self.gate.passes(frame) {
            return Ok(None);
        }

        self.window.apply(frame, self.transform.input_mut());
        let spectrum = self.transform.process()?;

        match refine_peak(spectrum, self.config.sample_rate, window_size) {
            Ok(frequency) => Ok(Some(frequency)),
            Err(TunerError::NoSpectralPeak) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
