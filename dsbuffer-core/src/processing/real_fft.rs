use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::models::error::{DsBufferError, Result};
use crate::traits::spectral_transform::SpectralTransform;

/// Real-input forward FFT backed by `rustfft`.
///
/// Plans a complex forward FFT once for a fixed length, feeds the real samples
/// with zero imaginary parts and keeps the non-redundant half of the output
/// (`len / 2 + 1` bins).
pub struct RustFftTransform {
    fft: Arc<dyn Fft<f32>>,
    len: usize,
}

impl RustFftTransform {
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(len);
        Self { fft, len }
    }
}

impl fmt::Debug for RustFftTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RustFftTransform").field("len", &self.len).finish()
    }
}

impl SpectralTransform for RustFftTransform {
    fn len(&self) -> usize {
        self.len
    }

    fn process(&self, input: &[f32]) -> Result<Vec<Complex<f32>>> {
        if input.len() != self.len {
            return Err(DsBufferError::LengthMismatch {
                expected: self.len,
                actual: input.len(),
            });
        }

        let mut buf: Vec<Complex<f32>> = input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        self.fft.process(&mut buf);
        buf.truncate(self.len / 2 + 1);
        Ok(buf)
    }
}
