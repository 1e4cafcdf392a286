//! Amplitude gate
//!
//! Keeps the noise floor from being reported as a note: frames whose RMS does
//! not exceed the threshold are skipped before any spectral work happens.

/// Root-mean-square amplitude of `frame`. Empty frames have an RMS of zero.
pub fn rms(frame: &[f64]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let energy: f64 = frame.iter().map(|&s| s * s).sum();
    (energy / frame.len() as f64).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeGate {
    threshold: f64,
}

impl AmplitudeGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// True when the frame is loud enough to analyze.
    ///
    /// The comparison is strict: a frame sitting exactly on the threshold is
    /// treated as silence.
    pub fn passes(&self, frame: &[f64]) -> bool {
        rms(frame) > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(rms(&[0.0; 16]), 0.0);
        assert_eq!(rms(&[0.5, -0.5, 0.5, -0.5]), 0.5);
    }

    #[test]
    fn test_silence_is_gated() {
        let gate = AmplitudeGate::new(0.01);
        assert!(!gate.passes(&[0.0; 4096]));
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        let frame: Vec<f64> = (0..4096)
            .map(|i| if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();

        assert!(!AmplitudeGate::new(0.5).passes(&frame));
        assert!(AmplitudeGate::new(0.499_999).passes(&frame));

        let quiet = vec![0.003; 4096];
        let at_threshold = AmplitudeGate::new(rms(&quiet));
        assert!(!at_threshold.passes(&quiet));
    }
}
