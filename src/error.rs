//! Error taxonomy for the pitch-detection pipeline

use thiserror::Error;

/// Errors produced by the tuner core.
///
/// Only [`TunerError::InvalidFrameLength`] and [`TunerError::InvalidConfig`]
/// ever reach a caller of [`crate::PitchDetector`]. A missing spectral peak is
/// an expected condition during silence or noise and is folded into "no
/// result" by the detector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TunerError {
    /// The frame handed to the pipeline does not match the configured window size.
    #[error("invalid frame length: expected {expected} samples, got {actual}")]
    InvalidFrameLength {
        /// Configured window size.
        expected: usize,
        /// Length of the rejected frame.
        actual: usize,
    },

    /// The spectrum has no usable dominant bin.
    #[error("no spectral peak found")]
    NoSpectralPeak,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The FFT backend rejected its buffers.
    #[error("spectral transform failed: {0}")]
    Transform(String),
}
