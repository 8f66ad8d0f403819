//! Statistics and elementwise producers over the chronological window.
//!
//! Every reduction walks the window oldest-first, so results do not depend on
//! where the head happens to sit or on the addressing mode. Producers return
//! fresh vectors and leave the buffer untouched.

use super::ring_buffer::RingBuffer;
use super::vector;
use crate::models::error::{DsBufferError, Result};
use crate::models::statistics::WindowStatistics;

impl RingBuffer {
    pub fn sum(&self) -> f32 {
        self.iter().fold(0.0, |acc, x| acc + x)
    }

    pub fn mean(&self) -> f32 {
        self.sum() / self.capacity as f32
    }

    /// Euclidean length of the window as a vector.
    pub fn length(&self) -> f32 {
        self.energy().sqrt()
    }

    /// Sum of squares.
    pub fn energy(&self) -> f32 {
        self.iter().fold(0.0, |acc, x| acc + x * x)
    }

    pub fn max(&self) -> f32 {
        self.iter().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn min(&self) -> f32 {
        self.iter().fold(f32::INFINITY, f32::min)
    }

    /// Sample variance (`n - 1` denominator). Needs at least two samples.
    pub fn variance(&self) -> Result<f32> {
        if self.capacity <= 1 {
            return Err(DsBufferError::InsufficientSamples {
                required: 2,
                actual: self.capacity,
            });
        }
        let mean = self.mean();
        let ss = self.iter().fold(0.0, |acc, x| {
            let c = x - mean;
            acc + c * c
        });
        Ok(ss / (self.capacity - 1) as f32)
    }

    pub fn std(&self) -> Result<f32> {
        Ok(self.variance()?.sqrt())
    }

    /// All scalar statistics in one snapshot.
    pub fn statistics(&self) -> WindowStatistics {
        let variance = self.variance().ok();
        WindowStatistics {
            mean: self.mean(),
            sum: self.sum(),
            length: self.length(),
            energy: self.energy(),
            max: self.max(),
            min: self.min(),
            variance,
            std: variance.map(f32::sqrt),
        }
    }

    pub fn add(&self, value: f32) -> Vec<f32> {
        self.iter().map(|x| x + value).collect()
    }

    pub fn multiply(&self, value: f32) -> Vec<f32> {
        self.iter().map(|x| x * value).collect()
    }

    /// Remainder of each sample divided by `value`, with the sign of the
    /// sample (C `fmodf`).
    pub fn modulo(&self, value: f32) -> Vec<f32> {
        self.iter().map(|x| x % value).collect()
    }

    pub fn sqrt(&self) -> Vec<f32> {
        self.iter().map(f32::sqrt).collect()
    }

    pub fn remove_mean(&self) -> Vec<f32> {
        self.add(-self.mean())
    }

    /// Window scaled to unit length, optionally centred first. A window whose
    /// (centred) length is exactly zero comes back unscaled.
    pub fn normalize_to_unit_length(&self, remove_mean: bool) -> Vec<f32> {
        vector::normalize_to_unit_length(&self.dump(), remove_mean)
    }

    /// Window scaled to unit variance, optionally centred first.
    ///
    /// A single-sample window yields `[1.0]`; a zero-variance window comes
    /// back unscaled.
    pub fn normalize_to_unit_variance(&self, remove_mean: bool) -> Vec<f32> {
        if self.capacity == 1 {
            return vec![1.0];
        }

        let mean = self.mean();
        let ss = self.iter().fold(0.0, |acc, x| {
            let c = x - mean;
            acc + c * c
        });
        let std = (ss / (self.capacity - 1) as f32).sqrt();

        let mut output = if remove_mean { self.add(-mean) } else { self.dump() };
        if std > 0.0 {
            for x in output.iter_mut() {
                *x /= std;
            }
        }
        output
    }

    /// Dot product with a vector of the same length, oldest sample first.
    pub fn dot_product(&self, vector: &[f32]) -> Result<f32> {
        self.check_len(vector)?;
        Ok(self.iter().zip(vector).fold(0.0, |acc, (x, &y)| acc + x * y))
    }

    /// Pearson correlation between the window and `vector`.
    pub fn correlation_coefficient(&self, vector: &[f32]) -> Result<f32> {
        self.check_len(vector)?;
        vector::correlation_coefficient(&self.dump(), vector)
    }

    fn check_len(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.capacity {
            return Err(DsBufferError::LengthMismatch {
                expected: self.capacity,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}
