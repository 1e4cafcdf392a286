//! Dominant-bin search and sub-bin refinement
//!
//! The strongest bin gives the pitch to within one bin width (about 10.8 Hz
//! at 44.1 kHz / 4096). A parabola through the log amplitudes of that bin and
//! its two neighbours moves the estimate between bins, typically to within a
//! twentieth of a bin.

use rustfft::num_complex::Complex;

use crate::error::TunerError;

/// Index of the loudest bin in `[1, len - 1)`.
///
/// DC is skipped, and so is the top bin because it has no right neighbour to
/// interpolate against.
pub fn find_peak_bin(spectrum: &[Complex<f64>]) -> Result<usize, TunerError> {
    if spectrum.len() < 3 {
        return Err(TunerError::NoSpectralPeak);
    }

    let mut max_magnitude = 0.0;
    let mut max_bin = None;

    for (bin, value) in spectrum.iter().enumerate().take(spectrum.len() - 1).skip(1) {
        let magnitude = value.norm();
        if magnitude > max_magnitude {
            max_magnitude = magnitude;
            max_bin = Some(bin);
        }
    }

    max_bin.ok_or(TunerError::NoSpectralPeak)
}

/// Fractional offset of the true peak from bin `k`, in bins.
///
/// FIXME: the log amplitudes come from the real part of each bin, not its
/// magnitude, while [`find_peak_bin`] ranks bins by magnitude. This looks
/// like a defect but is kept so estimates match the established tuner output.
/// It breaks down when the real parts around the peak are close to zero: a
/// 409.12 Hz sine (almost exactly on bin 38 at 44.1 kHz / 4096) has real
/// parts near 1 against imaginary parts near 500, and is estimated about
/// 1.8 Hz low, well outside a tenth of a bin.
///
/// Returns `None` when the parabola is flat or any log is undefined.
pub fn interpolation_offset(spectrum: &[Complex<f64>], k: usize) -> Option<f64> {
    if k == 0 || k + 1 >= spectrum.len() {
        return None;
    }

    let alpha = spectrum[k - 1].re.abs().ln();
    let beta = spectrum[k].re.abs().ln();
    let gamma = spectrum[k + 1].re.abs().ln();

    let denominator = alpha - 2.0 * beta + gamma;
    if denominator == 0.0 {
        return None;
    }

    let delta = 0.5 * (alpha - gamma) / denominator;
    delta.is_finite().then_some(delta)
}

/// Refined frequency in Hz of the dominant spectral peak.
///
/// `window_size` is the length of the time-domain frame (twice the spectrum
/// length). When interpolation breaks down the unrefined bin frequency is
/// reported instead.
pub fn refine_peak(
    spectrum: &[Complex<f64>],
    sample_rate: f64,
    window_size: usize,
) -> Result<f64, TunerError> {
    if window_size == 0 {
        return Err(TunerError::NoSpectralPeak);
    }

    let k = find_peak_bin(spectrum)?;
    let bin_width = sample_rate / window_size as f64;
    let coarse = k as f64 * bin_width;

    let refined = interpolation_offset(spectrum, k)
        .map(|delta| (k as f64 + delta) * bin_width)
        .filter(|frequency| frequency.is_finite() && *frequency > 0.0);

    Ok(refined.unwrap_or(coarse))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(values: &[f64]) -> Vec<Complex<f64>> {
        values.iter().map(|&re| Complex::new(re, 0.0)).collect()
    }

    #[test]
    fn test_degenerate_spectra() {
        assert_eq!(find_peak_bin(&[]), Err(TunerError::NoSpectralPeak));
        assert_eq!(
            find_peak_bin(&real(&[1.0, 2.0])),
            Err(TunerError::NoSpectralPeak)
        );
        assert_eq!(
            find_peak_bin(&real(&[5.0, 0.0, 0.0, 9.0])),
            Err(TunerError::NoSpectralPeak)
        );
        assert_eq!(
            refine_peak(&real(&[0.0, 1.0, 0.5]), 44100.0, 0),
            Err(TunerError::NoSpectralPeak)
        );
    }

    #[test]
    fn test_skips_dc_and_top_bin() {
        let spectrum = real(&[100.0, 1.0, 3.0, 2.0, 50.0]);
        assert_eq!(find_peak_bin(&spectrum), Ok(2));
    }

    #[test]
    fn test_ranks_by_magnitude() {
        let spectrum = vec![
            Complex::new(0.0, 0.0),
            Complex::new(2.0, 0.0),
            Complex::new(0.5, 3.0),
            Complex::new(1.0, 0.0),
        ];
        assert_eq!(find_peak_bin(&spectrum), Ok(2));
    }

    #[test]
    fn test_symmetric_peak_has_no_offset() {
        let spectrum = real(&[0.0, 0.5, 1.0, 0.5, 0.0]);
        assert_eq!(interpolation_offset(&spectrum, 2), Some(0.0));
        assert_eq!(refine_peak(&spectrum, 1000.0, 10), Ok(200.0));
    }

    #[test]
    fn test_gaussian_peak_is_recovered_exactly() {
        // a Gaussian is a parabola in log space, so the fit is exact
        let centre = 6.3;
        let spectrum: Vec<Complex<f64>> = (0..16)
            .map(|i| {
                let d = i as f64 - centre;
                Complex::new((-d * d / 4.0).exp(), 0.0)
            })
            .collect();

        let frequency = refine_peak(&spectrum, 3200.0, 32).unwrap();
        assert!((frequency - centre * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_uses_real_part_for_refinement() {
        // magnitudes are symmetric but the real parts are not
        let spectrum = vec![
            Complex::new(0.0, 0.0),
            Complex::new(0.5, 0.0),
            Complex::new(1.0, 0.0),
            Complex::new(0.25, 0.433_012_701_892_219_3),
            Complex::new(0.0, 0.0),
        ];
        let delta = interpolation_offset(&spectrum, 2).unwrap();
        assert!(delta < 0.0);
    }

    #[test]
    fn test_flat_peak_falls_back_to_bin() {
        let spectrum = real(&[0.0, 1.0, 1.0, 1.0, 0.0]);
        assert_eq!(interpolation_offset(&spectrum, 2), None);
        // bin 1 wins the tie; its left neighbour is DC with ln(0) = -inf
        assert_eq!(refine_peak(&spectrum, 1000.0, 10), Ok(100.0));
    }

    #[test]
    fn test_zero_real_part_falls_back_to_bin() {
        let spectrum = vec![
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.5),
            Complex::new(1.0, 0.0),
            Complex::new(0.5, 0.0),
            Complex::new(0.0, 0.0),
        ];
        assert_eq!(interpolation_offset(&spectrum, 2), None);
        assert_eq!(refine_peak(&spectrum, 1000.0, 10), Ok(200.0));
    }
}
