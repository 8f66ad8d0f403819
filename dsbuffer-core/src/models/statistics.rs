use serde::{Deserialize, Serialize};

/// Snapshot of every scalar statistic of a buffer window.
///
/// `variance` and `std` are `None` for single-sample windows, where the
/// `n - 1` denominator is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStatistics {
    pub mean: f32,
    pub sum: f32,
    pub length: f32,
    pub energy: f32,
    pub max: f32,
    pub min: f32,
    pub variance: Option<f32>,
    pub std: Option<f32>,
}
