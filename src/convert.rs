//! Sample conversion from device formats to the analysis signal
//!
//! Capture devices hand out samples in whatever representation they were
//! opened with. The pipeline works on `f64` in roughly [-1, 1], so every
//! frame passes through here first. Unsigned formats are re-centred on zero
//! by cpal's `FromSample` conversions.

use cpal::{FromSample, Sample};

use crate::error::TunerError;

/// Converts `input` into `output`, one sample per slot.
///
/// `output` is the caller's preallocated frame, so its length is the
/// configured window size. Nothing is resampled or mixed.
pub fn convert_frame<T>(input: &[T], output: &mut [f64]) -> Result<(), TunerError>
where
    T: Sample,
    f64: FromSample<T>,
{
    if input.len() != output.len() {
        return Err(TunerError::InvalidFrameLength {
            expected: output.len(),
            actual: input.len(),
        });
    }

    for (slot, &sample) in output.iter_mut().zip(input) {
        *slot = f64::from_sample(sample);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_fixed_point_is_normalized() {
        let input = [i16::MIN, 0, i16::MAX / 2];
        let mut output = [0.0; 3];
        convert_frame(&input, &mut output).unwrap();

        assert_eq!(output[0], -1.0);
        assert_eq!(output[1], 0.0);
        assert!((output[2] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_unsigned_is_centred() {
        let input = [0u8, 128, 255];
        let mut output = [0.0; 3];
        convert_frame(&input, &mut output).unwrap();

        assert_eq!(output[0], -1.0);
        assert_eq!(output[1], 0.0);
        assert!(output[2] > 0.99);
    }

    #[test]
    fn test_float_passes_through() {
        let input = [0.25f32, -0.75];
        let mut output = [0.0; 2];
        convert_frame(&input, &mut output).unwrap();
        assert_eq!(output, [0.25, -0.75]);
    }

    #[test]
    fn test_length_mismatch() {
        let input = [0.0f32; 7];
        let mut output = [0.0; 8];
        assert_eq!(
            convert_frame(&input, &mut output),
            Err(TunerError::InvalidFrameLength {
                expected: 8,
                actual: 7
            })
        );
    }
}
