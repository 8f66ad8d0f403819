//! # dsbuffer-core
//!
//! Fixed-capacity circular sample buffer for windowed signal processing.
//!
//! Samples are pushed one at a time; the buffer keeps the most recent
//! `capacity` of them and computes statistics, FIR filter outputs and
//! spectral transforms directly over the ring, without the caller having to
//! linearize it first.
//!
//! ## Architecture
//!
//! ```text
//! dsbuffer-core (this crate)
//! ├── models/      ← DsBufferError, BufferConfiguration, WindowStatistics
//! ├── processing/  ← RingBuffer, addressing, FIR, statistics, spectral, vector math, RustFftTransform
//! └── traits/      ← SpectralTransform
//! ```
//!
//! ## Example
//!
//! ```
//! use dsbuffer_core::RingBuffer;
//!
//! let mut buf = RingBuffer::new(8, true)?;
//! for x in [1.0, 4.0, 2.0, 5.0, 6.0, 7.0, -1.0, -8.0] {
//!     buf.push(x);
//! }
//! assert_eq!(buf.latest(), -8.0);
//! let bins = buf.compute_transform()?;
//! assert_eq!(bins.len(), 5);
//! # Ok::<(), dsbuffer_core::DsBufferError>(())
//! ```

pub mod models;
pub mod processing;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::config::BufferConfiguration;
pub use models::error::{DsBufferError, Result};
pub use models::statistics::WindowStatistics;
pub use processing::addressing::AddressingMode;
pub use processing::real_fft::RustFftTransform;
pub use processing::ring_buffer::RingBuffer;
pub use processing::vector;
pub use rustfft::num_complex::Complex32;
pub use traits::spectral_transform::SpectralTransform;
