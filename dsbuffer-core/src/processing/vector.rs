//! Stateless vector arithmetic over caller-owned slices.
//!
//! Generic over `f32` and `f64`. Copy variants return a fresh `Vec`;
//! `_inplace` variants overwrite their input.
//!
//! Normalization treats a zero-length vector as already normalized: the copy
//! variants return it verbatim and the in-place variants leave it alone.

use rustfft::num_traits::Float;

use crate::models::error::{DsBufferError, Result};

/// Arithmetic mean. Fails on an empty slice.
pub fn mean<T: Float>(v: &[T]) -> Result<T> {
    if v.is_empty() {
        return Err(DsBufferError::EmptyInput);
    }
    let n = T::from(v.len()).ok_or(DsBufferError::EmptyInput)?;
    Ok(sum(v) / n)
}

pub fn sum<T: Float>(v: &[T]) -> T {
    v.iter().fold(T::zero(), |acc, &x| acc + x)
}

/// Euclidean length.
pub fn length<T: Float>(v: &[T]) -> T {
    power(v).sqrt()
}

/// Squared Euclidean length.
pub fn power<T: Float>(v: &[T]) -> T {
    v.iter().fold(T::zero(), |acc, &x| acc + x * x)
}

pub fn sqrt<T: Float>(v: &[T]) -> Vec<T> {
    v.iter().map(|x| x.sqrt()).collect()
}

pub fn add<T: Float>(v: &[T], value: T) -> Vec<T> {
    v.iter().map(|&x| x + value).collect()
}

pub fn add_inplace<T: Float>(v: &mut [T], value: T) {
    for x in v.iter_mut() {
        *x = *x + value;
    }
}

pub fn multiply<T: Float>(v: &[T], value: T) -> Vec<T> {
    v.iter().map(|&x| x * value).collect()
}

pub fn multiply_inplace<T: Float>(v: &mut [T], value: T) {
    for x in v.iter_mut() {
        *x = *x * value;
    }
}

/// Centre the vector on zero. An empty slice yields an empty `Vec`.
pub fn remove_mean<T: Float>(v: &[T]) -> Vec<T> {
    match mean(v) {
        Ok(m) => add(v, -m),
        Err(_) => Vec::new(),
    }
}

pub fn remove_mean_inplace<T: Float>(v: &mut [T]) {
    if let Ok(m) = mean(v) {
        add_inplace(v, -m);
    }
}

/// Scale to unit length, optionally centring first.
pub fn normalize_to_unit_length<T: Float>(v: &[T], remove_mean_first: bool) -> Vec<T> {
    let mut out = if remove_mean_first { remove_mean(v) } else { v.to_vec() };
    divide_by_length(&mut out);
    out
}

pub fn normalize_to_unit_length_inplace<T: Float>(v: &mut [T], remove_mean_first: bool) {
    if remove_mean_first {
        remove_mean_inplace(v);
    }
    divide_by_length(v);
}

fn divide_by_length<T: Float>(v: &mut [T]) {
    let len = length(v);
    if len > T::zero() {
        for x in v.iter_mut() {
            *x = *x / len;
        }
    }
}

pub fn dot_product<T: Float>(v1: &[T], v2: &[T]) -> Result<T> {
    if v1.len() != v2.len() {
        return Err(DsBufferError::LengthMismatch {
            expected: v1.len(),
            actual: v2.len(),
        });
    }
    Ok(v1.iter().zip(v2).fold(T::zero(), |acc, (&a, &b)| acc + a * b))
}

/// Pearson correlation: dot product of both centred, unit-length vectors.
pub fn correlation_coefficient<T: Float>(v1: &[T], v2: &[T]) -> Result<T> {
    if v1.len() != v2.len() {
        return Err(DsBufferError::LengthMismatch {
            expected: v1.len(),
            actual: v2.len(),
        });
    }
    dot_product(&normalize_to_unit_length(v1, true), &normalize_to_unit_length(v2, true))
}
