//! Forward real-to-complex FFT with preallocated buffers
//!
//! The plan, input, output and scratch buffers are created once. Each call
//! overwrites them in place, so the per-frame path never allocates.

use std::sync::Arc;

use realfft::{RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;

use crate::error::TunerError;

pub struct SpectralTransform {
    plan: Arc<dyn RealToComplex<f64>>,
    size: usize,
    input: Vec<f64>,
    output: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl SpectralTransform {
    pub fn new(size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let plan = planner.plan_fft_forward(size);

        let input = plan.make_input_vec();
        let output = plan.make_output_vec();
        let scratch = plan.make_scratch_vec();

        Self {
            plan,
            size,
            input,
            output,
            scratch,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Time-domain buffer the next frame is written into.
    ///
    /// The transform uses it as workspace, so its contents are garbage after
    /// [`SpectralTransform::process`] and must be rewritten every frame.
    pub fn input_mut(&mut self) -> &mut [f64] {
        &mut self.input
    }

    /// Runs the forward transform over the input buffer.
    ///
    /// Returns the one-sided spectrum: the first `N/2` bins, DC first. No
    /// normalization is applied.
    pub fn process(&mut self) -> Result<&[Complex<f64>], TunerError> {
        self.plan
            .process_with_scratch(&mut self.input, &mut self.output, &mut self.scratch)
            .map_err(|err| TunerError::Transform(err.to_string()))?;

        Ok(self.spectrum())
    }

    /// The spectrum computed by the last call to [`SpectralTransform::process`].
    pub fn spectrum(&self) -> &[Complex<f64>] {
        &self.output[..self.size / 2]
    }
}
