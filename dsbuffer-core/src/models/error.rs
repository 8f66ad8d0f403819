use thiserror::Error;

/// Errors returned by buffer, filter and vector operations.
///
/// Every precondition the buffer checks surfaces as one of these variants;
/// nothing in the library panics on bad input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DsBufferError {
    #[error("invalid capacity {capacity}: {reason}")]
    InvalidCapacity { capacity: usize, reason: &'static str },

    #[error("index {index} out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("FIR taps not configured")]
    TapsNotConfigured,

    #[error("{taps} FIR taps exceed buffer capacity {capacity}")]
    TooManyTaps { taps: usize, capacity: usize },

    #[error("empty input")]
    EmptyInput,

    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    #[error("invalid frequency band {from}..{to} Hz (nyquist {nyquist} Hz)")]
    InvalidBand { from: f32, to: f32, nyquist: f32 },

    #[error("buffer was not created with spectral transform support")]
    TransformUnsupported,

    #[error("need at least {required} samples, buffer holds {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, DsBufferError>;
