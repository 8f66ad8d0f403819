use serde::{Deserialize, Serialize};

use super::error::{DsBufferError, Result};

/// Construction parameters for a [`RingBuffer`](crate::RingBuffer).
///
/// Serializable so hosts can keep buffer setups in JSON next to their
/// recordings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfiguration {
    /// Number of samples in the window (default: 256).
    pub capacity: usize,

    /// Keep a doubled storage region so the window can be transformed
    /// without a copy (default: true). Requires an even capacity.
    pub transform_capable: bool,

    /// Optional FIR taps applied right after construction.
    pub fir_taps: Option<Vec<f32>>,
}

impl BufferConfiguration {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(DsBufferError::InvalidConfiguration("capacity must be positive".into()));
        }
        if self.transform_capable && self.capacity % 2 != 0 {
            return Err(DsBufferError::InvalidConfiguration(format!(
                "capacity {} must be even for spectral transforms",
                self.capacity
            )));
        }
        if let Some(taps) = &self.fir_taps {
            if taps.is_empty() {
                return Err(DsBufferError::InvalidConfiguration("fir_taps must not be empty".into()));
            }
            if taps.len() > self.capacity {
                return Err(DsBufferError::InvalidConfiguration(format!(
                    "{} FIR taps exceed capacity {}",
                    taps.len(),
                    self.capacity
                )));
            }
        }
        Ok(())
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DsBufferError::InvalidConfiguration(format!("failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DsBufferError::InvalidConfiguration(format!("failed to serialize configuration: {}", e)))
    }
}

impl Default for BufferConfiguration {
    fn default() -> Self {
        Self {
            capacity: 256,
            transform_capable: true,
            fir_taps: None,
        }
    }
}
