//! Hann window
//!
//! Tapers each frame to zero at both ends before the transform. Without it
//! the frame edges leak energy across the spectrum and the peak refiner
//! locks onto the wrong shape.

#[derive(Debug, Clone)]
pub struct HannWindow {
    coefficients: Vec<f64>,
}

impl HannWindow {
    /// Precomputes `0.5 * (1 - cos(2π·i/(N-1)))` for every index.
    pub fn new(size: usize) -> Self {
        let denominator = size.saturating_sub(1).max(1) as f64;
        let coefficients = (0..size)
            .map(|i| {
                let x = i as f64 / denominator;
                0.5 * (1.0 - (2.0 * std::f64::consts::PI * x).cos())
            })
            .collect();

        Self { coefficients }
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Writes `frame[i] * w[i]` into `out`. Both slices must be window-sized.
    pub fn apply(&self, frame: &[f64], out: &mut [f64]) {
        debug_assert_eq!(frame.len(), self.coefficients.len());
        debug_assert_eq!(out.len(), self.coefficients.len());

        for ((slot, &sample), &weight) in out.iter_mut().zip(frame).zip(&self.coefficients) {
            *slot = sample * weight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let window = HannWindow::new(4096);
        let w = window.coefficients();

        assert_eq!(w.len(), 4096);
        assert!(w[0].abs() < 1e-12);
        assert!(w[4095].abs() < 1e-12);
        assert!(w.iter().all(|&c| (0.0..=1.0).contains(&c)));
        // symmetric around the centre
        for i in 0..2048 {
            assert!((w[i] - w[4095 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_odd_length_peaks_at_one() {
        let window = HannWindow::new(9);
        assert!((window.coefficients()[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply() {
        let window = HannWindow::new(5);
        let frame = [2.0; 5];
        let mut out = [0.0; 5];
        window.apply(&frame, &mut out);

        assert!(out[0].abs() < 1e-12);
        assert!((out[1] - 1.0).abs() < 1e-12);
        assert!((out[2] - 2.0).abs() < 1e-12);
    }
}
