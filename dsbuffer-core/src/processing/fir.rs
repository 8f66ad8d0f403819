//! FIR filtering directly over the ring.
//!
//! Tap 0 weighs the newest sample, tap `k` the sample pushed `k` steps
//! earlier: `y = sum(b[k] * x[newest - k])` for k = 0 to taps-1.

use super::addressing::FirWalk;
use super::ring_buffer::RingBuffer;
use crate::models::error::{DsBufferError, Result};

impl RingBuffer {
    /// Configure FIR taps. Replaces any taps set before.
    ///
    /// Fewer taps than the capacity is allowed (only the newest `taps.len()`
    /// samples are filtered) and logged as a warning.
    pub fn setup_fir_taps(&mut self, taps: &[f32]) -> Result<()> {
        if taps.is_empty() {
            return Err(DsBufferError::EmptyInput);
        }
        if taps.len() > self.capacity {
            return Err(DsBufferError::TooManyTaps {
                taps: taps.len(),
                capacity: self.capacity,
            });
        }
        if taps.len() < self.capacity {
            log::warn!(
                "buffer capacity {} is larger than number of FIR taps {}",
                self.capacity,
                taps.len()
            );
        }

        self.fir_taps.clear();
        self.fir_taps.extend_from_slice(taps);
        self.fir_walk = Some(FirWalk::select(self.addressing));
        Ok(())
    }

    pub fn clear_taps(&mut self) {
        self.fir_taps.clear();
        self.fir_walk = None;
    }

    pub fn num_taps(&self) -> usize {
        self.fir_taps.len()
    }

    pub fn taps(&self) -> Option<&[f32]> {
        if self.fir_taps.is_empty() {
            None
        } else {
            Some(&self.fir_taps)
        }
    }

    /// Filter output for the newest sample. O(taps).
    pub fn latest_fir_output(&self) -> Result<f32> {
        let walk = self.fir_walk.ok_or(DsBufferError::TapsNotConfigured)?;
        Ok(walk.output(&self.data, self.head, self.capacity, &self.fir_taps))
    }

    /// Filter the whole window, oldest first.
    ///
    /// Early outputs only convolve over the history that exists inside the
    /// window (`k <= i`); samples before the window are not treated as zeros
    /// padded in, they are simply not part of the sum.
    pub fn fir_filter(&self) -> Result<Vec<f32>> {
        if self.fir_taps.is_empty() {
            return Err(DsBufferError::TapsNotConfigured);
        }

        let owned;
        let window: &[f32] = match self.contiguous_window() {
            Some(window) => window,
            None => {
                owned = self.dump();
                &owned
            }
        };

        let output = (0..self.capacity)
            .map(|i| {
                let reach = i.min(self.fir_taps.len() - 1);
                let mut acc = 0.0;
                for (k, &tap) in self.fir_taps[..=reach].iter().enumerate() {
                    acc += tap * window[i - k];
                }
                acc
            })
            .collect();
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::addressing::AddressingMode;
    use approx::assert_relative_eq;

    const TAPS: [f32; 4] = [0.5, 0.25, 2.0, -1.0];

    #[test]
    fn causal_truncation_at_window_start() {
        for transform in [false, true] {
            let mut buf = RingBuffer::new(4, transform).unwrap();
            buf.setup_fir_taps(&TAPS).unwrap();
            for v in [1.0, 4.0, 2.0, 5.0] {
                buf.push(v);
            }

            let [t0, t1, t2, t3] = TAPS;
            let out = buf.fir_filter().unwrap();
            assert_relative_eq!(out[0], t0 * 1.0);
            assert_relative_eq!(out[1], t0 * 4.0 + t1 * 1.0);
            assert_relative_eq!(out[2], t0 * 2.0 + t1 * 4.0 + t2 * 1.0);
            assert_relative_eq!(out[3], t0 * 5.0 + t1 * 2.0 + t2 * 4.0 + t3 * 1.0);
        }
    }

    #[test]
    fn latest_output_weighs_newest_sample_first() {
        let mut buf = RingBuffer::new(4, false).unwrap();
        buf.setup_fir_taps(&TAPS).unwrap();
        for v in [1.0, 4.0, 2.0, 5.0] {
            buf.push(v);
        }
        assert_relative_eq!(buf.latest_fir_output().unwrap(), 0.5 * 5.0 + 0.25 * 2.0 + 2.0 * 4.0 - 1.0);
    }

    #[test]
    fn impulse_response_walks_the_taps() {
        for capacity in [4, 6] {
            let mut buf = RingBuffer::new(capacity, false).unwrap();
            buf.setup_fir_taps(&[1.0, 2.0, 3.0]).unwrap();

            buf.push(1.0);
            assert_eq!(buf.latest_fir_output().unwrap(), 1.0);
            buf.push(0.0);
            assert_eq!(buf.latest_fir_output().unwrap(), 2.0);
            buf.push(0.0);
            assert_eq!(buf.latest_fir_output().unwrap(), 3.0);
            buf.push(0.0);
            assert_eq!(buf.latest_fir_output().unwrap(), 0.0);
        }
    }

    #[test]
    fn latest_output_is_last_filtered_sample() {
        for (capacity, transform) in [(8, false), (8, true), (10, false), (10, true)] {
            let mut buf = RingBuffer::new(capacity, transform).unwrap();
            buf.setup_fir_taps(&[0.3, -0.2, 0.1, 0.05, 0.7]).unwrap();
            for i in 0..23 {
                buf.push((i as f32 * 0.37).sin());
                let filtered = buf.fir_filter().unwrap();
                assert_eq!(filtered[capacity - 1], buf.latest_fir_output().unwrap());
            }
        }
    }

    #[test]
    fn masked_and_modulo_walks_agree() {
        let samples: Vec<f32> = (0..40).map(|i| (i as f32 * 1.3).cos() * 10.0).collect();
        let taps = [0.2, 0.2, 0.2, 0.2];

        let mut masked = RingBuffer::new(8, false).unwrap();
        let mut modulo = RingBuffer::new(6, false).unwrap();
        masked.setup_fir_taps(&taps).unwrap();
        modulo.setup_fir_taps(&taps).unwrap();
        assert_eq!(masked.addressing_mode(), AddressingMode::Masked);
        assert_eq!(modulo.addressing_mode(), AddressingMode::Modulo);

        for &s in &samples {
            masked.push(s);
            modulo.push(s);
            assert_eq!(masked.latest_fir_output().unwrap(), modulo.latest_fir_output().unwrap());
        }
    }

    #[test]
    fn full_filter_agrees_between_masked_and_modulo() {
        let samples: Vec<f32> = (0..29).map(|i| (i as f32 * 0.53).sin() * 4.0 + 0.25).collect();
        let taps = [0.4, -0.3, 0.2, 0.1];

        for transform in [false, true] {
            let mut masked = RingBuffer::new(8, transform).unwrap();
            let mut modulo = RingBuffer::new(12, transform).unwrap();
            masked.setup_fir_taps(&taps).unwrap();
            modulo.setup_fir_taps(&taps).unwrap();
            for &s in &samples {
                masked.push(s);
                modulo.push(s);
            }

            // Once the taps no longer reach past the shorter window, both
            // buffers filter the same history.
            let short = masked.fir_filter().unwrap();
            let long = modulo.fir_filter().unwrap();
            for i in taps.len() - 1..8 {
                assert_eq!(short[i], long[i + 4]);
            }
            assert_eq!(masked.latest_fir_output().unwrap(), modulo.latest_fir_output().unwrap());
        }
    }

    #[test]
    fn moving_average_of_constant_signal() {
        let mut buf = RingBuffer::new(5, false).unwrap();
        buf.setup_fir_taps(&[0.2; 5]).unwrap();
        for _ in 0..5 {
            buf.push(1.0);
        }
        assert_relative_eq!(buf.latest_fir_output().unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn queries_require_taps() {
        let buf = RingBuffer::new(4, false).unwrap();
        assert_eq!(buf.latest_fir_output(), Err(DsBufferError::TapsNotConfigured));
        assert_eq!(buf.fir_filter(), Err(DsBufferError::TapsNotConfigured));
        assert!(buf.taps().is_none());
    }

    #[test]
    fn setup_validates_tap_count() {
        let mut buf = RingBuffer::new(3, false).unwrap();
        assert_eq!(
            buf.setup_fir_taps(&[1.0; 4]),
            Err(DsBufferError::TooManyTaps { taps: 4, capacity: 3 })
        );
        assert_eq!(buf.setup_fir_taps(&[]), Err(DsBufferError::EmptyInput));

        // Fewer taps than capacity is only advisory.
        assert!(buf.setup_fir_taps(&[1.0]).is_ok());
        assert_eq!(buf.num_taps(), 1);
        assert_eq!(buf.fir_walk, Some(FirWalk::Modulo));
    }

    #[test]
    fn setup_overwrites_and_clear_removes() {
        let mut buf = RingBuffer::new(4, true).unwrap();
        buf.push(2.0);
        buf.setup_fir_taps(&[1.0]).unwrap();
        assert_eq!(buf.latest_fir_output().unwrap(), 2.0);

        buf.setup_fir_taps(&[3.0, 1.0]).unwrap();
        assert_eq!(buf.taps(), Some(&[3.0, 1.0][..]));
        assert_eq!(buf.latest_fir_output().unwrap(), 6.0);

        buf.clear_taps();
        assert_eq!(buf.num_taps(), 0);
        assert_eq!(buf.fir_walk, None);
        assert!(buf.latest_fir_output().is_err());
    }
}
