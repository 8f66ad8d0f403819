use std::fmt;

use rustfft::num_complex::Complex;

use super::addressing::{AddressingMode, FirWalk, PushStrategy};
use super::real_fft::RustFftTransform;
use crate::models::config::BufferConfiguration;
use crate::models::error::{DsBufferError, Result};
use crate::traits::spectral_transform::SpectralTransform;

/// Fixed-capacity circular buffer of the most recent samples.
///
/// The buffer is always full: it starts zero-filled and every push evicts the
/// oldest sample. Logical index 0 is the oldest sample, `capacity - 1` the
/// newest.
///
/// A transform-capable buffer keeps a second copy of the ring at
/// `[capacity, 2 * capacity)`, so `[head, head + capacity)` is always a
/// contiguous, chronological window that can be handed to the FFT as-is.
///
/// Not synchronized. Wrap in `Arc<parking_lot::Mutex<RingBuffer>>` to share a
/// single writer with readers; `dump()` snapshots are independent copies.
pub struct RingBuffer {
    pub(super) data: Vec<f32>,
    pub(super) capacity: usize,
    pub(super) head: usize,
    pub(super) addressing: AddressingMode,
    pusher: PushStrategy,
    pub(super) transform: Option<Box<dyn SpectralTransform>>,
    pub(super) spectrum: Vec<Complex<f32>>,
    pub(super) spectrum_fresh: bool,
    pub(super) fir_taps: Vec<f32>,
    pub(super) fir_walk: Option<FirWalk>,
}

impl RingBuffer {
    /// Create a zero-filled buffer.
    ///
    /// With `transform_capable`, the capacity must be even and a
    /// [`RustFftTransform`] is planned for it.
    pub fn new(capacity: usize, transform_capable: bool) -> Result<Self> {
        let transform: Option<Box<dyn SpectralTransform>> = if transform_capable {
            check_transform_capacity(capacity)?;
            Some(Box::new(RustFftTransform::new(capacity)))
        } else {
            None
        };
        Self::build(capacity, transform)
    }

    /// Create a transform-capable buffer with a custom transform collaborator.
    pub fn with_transform(capacity: usize, transform: Box<dyn SpectralTransform>) -> Result<Self> {
        check_transform_capacity(capacity)?;
        if transform.len() != capacity {
            return Err(DsBufferError::LengthMismatch {
                expected: capacity,
                actual: transform.len(),
            });
        }
        Self::build(capacity, Some(transform))
    }

    /// Create a buffer from a validated configuration, applying its taps.
    pub fn from_config(config: &BufferConfiguration) -> Result<Self> {
        config.validate()?;
        let mut buffer = Self::new(config.capacity, config.transform_capable)?;
        if let Some(taps) = &config.fir_taps {
            buffer.setup_fir_taps(taps)?;
        }
        Ok(buffer)
    }

    fn build(capacity: usize, transform: Option<Box<dyn SpectralTransform>>) -> Result<Self> {
        if capacity == 0 {
            return Err(DsBufferError::InvalidCapacity {
                capacity,
                reason: "capacity must be positive",
            });
        }

        let mirrored = transform.is_some();
        let addressing = AddressingMode::for_capacity(capacity);
        let pusher = PushStrategy::select(addressing, mirrored);
        let alloc_size = if mirrored { capacity * 2 } else { capacity };

        log::debug!(
            "ring buffer created: capacity={}, push strategy={:?}, transform capable={}",
            capacity,
            pusher,
            mirrored
        );

        Ok(Self {
            data: vec![0.0; alloc_size],
            capacity,
            head: 0,
            addressing,
            pusher,
            transform,
            spectrum: Vec::new(),
            spectrum_fresh: false,
            fir_taps: Vec::new(),
            fir_walk: None,
        })
    }

    /// Push a new sample, evicting the oldest one. O(1).
    #[inline]
    pub fn push(&mut self, value: f32) {
        self.pusher.push(&mut self.data, &mut self.head, self.capacity, value);
        self.spectrum_fresh = false;
    }

    /// Sample `index` positions after the oldest one.
    pub fn at(&self, index: usize) -> Result<f32> {
        if index >= self.capacity {
            return Err(DsBufferError::IndexOutOfRange {
                index,
                capacity: self.capacity,
            });
        }
        let slot = if self.is_transform_capable() {
            self.head + index
        } else {
            self.addressing.wrap(self.head + index, self.capacity)
        };
        Ok(self.data[slot])
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> f32 {
        let slot = self.addressing.rewind(self.head, self.capacity);
        self.data[slot]
    }

    /// Copy the window out, oldest first.
    pub fn dump(&self) -> Vec<f32> {
        let (older, newer) = self.as_slices();
        let mut out = Vec::with_capacity(self.capacity);
        out.extend_from_slice(older);
        out.extend_from_slice(newer);
        out
    }

    /// Copy the window, oldest first, into a caller-owned slice of exactly
    /// `capacity` samples.
    pub fn dump_into(&self, output: &mut [f32]) -> Result<()> {
        if output.len() != self.capacity {
            return Err(DsBufferError::LengthMismatch {
                expected: self.capacity,
                actual: output.len(),
            });
        }
        let (older, newer) = self.as_slices();
        output[..older.len()].copy_from_slice(older);
        output[older.len()..].copy_from_slice(newer);
        Ok(())
    }

    /// Zero-copy chronological window. Only transform-capable buffers keep
    /// one; plain buffers return `None`.
    pub fn contiguous_window(&self) -> Option<&[f32]> {
        if self.is_transform_capable() {
            Some(&self.data[self.head..self.head + self.capacity])
        } else {
            None
        }
    }

    /// The window as two chronological runs: older part, then newer part.
    /// The second run is empty for transform-capable buffers.
    pub fn as_slices(&self) -> (&[f32], &[f32]) {
        match self.contiguous_window() {
            Some(window) => (window, &[]),
            None => (&self.data[self.head..], &self.data[..self.head]),
        }
    }

    /// Iterate the window, oldest first, without allocating.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer.iter()).copied()
    }

    /// Zero both storage regions and rewind the head.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.head = 0;
        self.spectrum_fresh = false;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_transform_capable(&self) -> bool {
        self.transform.is_some()
    }

    pub fn addressing_mode(&self) -> AddressingMode {
        self.addressing
    }
}

fn check_transform_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(DsBufferError::InvalidCapacity {
            capacity,
            reason: "capacity must be positive",
        });
    }
    if capacity % 2 != 0 {
        return Err(DsBufferError::InvalidCapacity {
            capacity,
            reason: "capacity must be even for spectral transforms",
        });
    }
    Ok(())
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("head", &self.head)
            .field("addressing", &self.addressing)
            .field("transform_capable", &self.is_transform_capable())
            .field("num_taps", &self.fir_taps.len())
            .finish()
    }
}

impl fmt::Display for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DSBuffer size: {}", self.capacity)?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:.2}", value)?;
        }
        Ok(())
    }
}
