use std::f32::consts::TAU;

use anyhow::{Context, Result};

/// `n` samples of a unit-amplitude sine at `frequency` Hz.
pub fn sine(frequency: f32, sample_rate: f32, n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| (TAU * frequency * i as f32 / sample_rate).sin())
        .collect()
}

/// Parse whitespace-separated floats. The first bad token is an error.
pub fn parse_samples(text: &str) -> Result<Vec<f32>> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f32>()
                .with_context(|| format!("sample {} is not a number: {:?}", i, token))
        })
        .collect()
}
