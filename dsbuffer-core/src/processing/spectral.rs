//! Spectral queries on transform-capable buffers.
//!
//! The contiguous window is handed to the transform collaborator without a
//! copy. Power features reuse a cached spectrum that is dropped on every push
//! or clear.

use rustfft::num_complex::Complex;

use super::ring_buffer::RingBuffer;
use crate::models::error::{DsBufferError, Result};

impl RingBuffer {
    /// Transform the current window: `capacity / 2 + 1` bins, DC to Nyquist.
    pub fn compute_transform(&self) -> Result<Vec<Complex<f32>>> {
        let transform = self.transform.as_ref().ok_or(DsBufferError::TransformUnsupported)?;
        let window = &self.data[self.head..self.head + self.capacity];
        transform.process(window)
    }

    /// Center frequency of each transform bin: `i * sample_rate / capacity`.
    pub fn frequency_axis(&self, sample_rate: f32) -> Result<Vec<f32>> {
        check_sample_rate(sample_rate)?;
        let interval = sample_rate / self.capacity as f32;
        Ok((0..self.capacity / 2 + 1).map(|i| i as f32 * interval).collect())
    }

    /// Cached transform of the current window, recomputed only when stale.
    pub fn spectrum(&mut self) -> Result<&[Complex<f32>]> {
        if !self.spectrum_fresh {
            log::trace!("recomputing spectrum for {} samples", self.capacity);
            self.spectrum = self.compute_transform()?;
            self.spectrum_fresh = true;
        }
        Ok(&self.spectrum)
    }

    /// `|X[k]|` for every bin.
    pub fn fft_magnitudes(&mut self) -> Result<Vec<f32>> {
        Ok(self.spectrum()?.iter().map(|c| c.norm()).collect())
    }

    /// `2 * |X[k]|^2`, DC bin not doubled.
    pub fn squared_power_spectrum(&mut self) -> Result<Vec<f32>> {
        self.one_sided_power(1.0)
    }

    /// `2 * |X[k]|^2 / N`, DC bin not doubled.
    pub fn mean_squared_power_spectrum(&mut self) -> Result<Vec<f32>> {
        let n = self.capacity as f32;
        self.one_sided_power(n)
    }

    /// Power spectral density: `2 * |X[k]|^2 / (fs * N)`, DC bin not doubled.
    pub fn power_spectral_density(&mut self, sample_rate: f32) -> Result<Vec<f32>> {
        check_sample_rate(sample_rate)?;
        let n = self.capacity as f32;
        self.one_sided_power(sample_rate * n)
    }

    fn one_sided_power(&mut self, scale: f32) -> Result<Vec<f32>> {
        let mut power: Vec<f32> = self.spectrum()?.iter().map(|c| c.norm_sqr() * 2.0 / scale).collect();
        if let Some(dc) = power.first_mut() {
            *dc /= 2.0;
        }
        Ok(power)
    }

    /// Mean of `|X[k]|^2` over the bins covering `[from_hz, to_hz]`.
    ///
    /// The bin range is widened outwards: `floor(from * N / fs)` to
    /// `ceil(to * N / fs)`.
    pub fn average_band_power(&mut self, from_hz: f32, to_hz: f32, sample_rate: f32) -> Result<f32> {
        check_sample_rate(sample_rate)?;
        let nyquist = sample_rate / 2.0;
        if !(from_hz >= 0.0 && from_hz <= to_hz && to_hz <= nyquist) {
            return Err(DsBufferError::InvalidBand {
                from: from_hz,
                to: to_hz,
                nyquist,
            });
        }

        let n = self.capacity as f32;
        let last_bin = self.capacity / 2;
        let from_idx = ((from_hz * n / sample_rate).floor() as usize).min(last_bin);
        let to_idx = ((to_hz * n / sample_rate).ceil() as usize).min(last_bin);

        let band = &self.spectrum()?[from_idx..=to_idx];
        let total = band.iter().fold(0.0, |acc, c| acc + c.norm_sqr());
        Ok(total / band.len() as f32)
    }
}

fn check_sample_rate(sample_rate: f32) -> Result<()> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(DsBufferError::InvalidSampleRate(sample_rate));
    }
    Ok(())
}
