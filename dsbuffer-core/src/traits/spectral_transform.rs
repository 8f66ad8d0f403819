use rustfft::num_complex::Complex;

use crate::models::error::Result;

/// Interface for real-input forward transforms.
///
/// Given `len()` real samples in natural time order, an implementation
/// produces `len() / 2 + 1` complex bins from DC up to Nyquist.
/// Implemented by:
/// - `RustFftTransform` (default, backed by `rustfft`)
///
/// The ring buffer never interprets the bins it gets back.
pub trait SpectralTransform: Send + Sync {
    /// Number of input samples the transform was planned for.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transform `input` (length must equal `len()`).
    fn process(&self, input: &[f32]) -> Result<Vec<Complex<f32>>>;
}
