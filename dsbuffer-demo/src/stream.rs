//! Live mode: one producer thread feeds a shared buffer while the caller
//! takes periodic snapshots.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{anyhow, ensure, Context, Result};
use parking_lot::Mutex;

use dsbuffer_core::{RingBuffer, WindowStatistics};

/// Samples pushed per producer wakeup.
const BLOCK_SIZE: usize = 16;

/// A buffer being filled by a background sine generator.
pub struct SignalStream {
    buffer: Arc<Mutex<RingBuffer>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<u64>>,
}

impl SignalStream {
    /// Start pushing a sine at `frequency` Hz, paced to roughly `sample_rate`
    /// samples per second.
    pub fn start(buffer: RingBuffer, frequency: f32, sample_rate: f32) -> Result<Self> {
        ensure!(
            sample_rate.is_finite() && sample_rate > 0.0,
            "invalid sample rate: {}",
            sample_rate
        );
        let block_period = Duration::try_from_secs_f32(BLOCK_SIZE as f32 / sample_rate)
            .with_context(|| format!("sample rate {} gives no usable producer period", sample_rate))?;

        let buffer = Arc::new(Mutex::new(buffer));
        let running = Arc::new(AtomicBool::new(true));

        let buf = Arc::clone(&buffer);
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("dsbuffer-producer".into())
            .spawn(move || {
                let mut n: u64 = 0;
                while flag.load(Ordering::SeqCst) {
                    {
                        let mut b = buf.lock();
                        for _ in 0..BLOCK_SIZE {
                            let phase = (n as f64 * frequency as f64 / sample_rate as f64).fract() as f32;
                            b.push((TAU * phase).sin());
                            n += 1;
                        }
                    }
                    thread::sleep(block_period);
                }
                n
            })
            .context("failed to spawn producer thread")?;

        Ok(Self {
            buffer,
            running,
            handle: Some(handle),
        })
    }

    /// Chronological copy of the current window.
    pub fn snapshot(&self) -> Vec<f32> {
        self.buffer.lock().dump()
    }

    pub fn statistics(&self) -> WindowStatistics {
        self.buffer.lock().statistics()
    }

    /// Stop the producer and return the number of samples it pushed.
    pub fn stop(&mut self) -> Result<u64> {
        self.running.store(false, Ordering::SeqCst);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| anyhow!("producer thread panicked")),
            None => Ok(0),
        }
    }
}

impl Drop for SignalStream {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.stop() {
                log::error!("Failed to stop producer: {}", e);
            }
        }
    }
}

/// Run a stream for `duration`, logging a snapshot every `interval`.
/// Returns the final window statistics and the number of samples pushed.
pub fn run(
    buffer: RingBuffer,
    frequency: f32,
    sample_rate: f32,
    duration: Duration,
    interval: Duration,
) -> Result<(WindowStatistics, u64)> {
    let mut stream = SignalStream::start(buffer, frequency, sample_rate)?;
    let deadline = Instant::now() + duration;

    while Instant::now() < deadline {
        thread::sleep(interval.min(deadline.saturating_duration_since(Instant::now())));
        let stats = stream.statistics();
        log::info!("snapshot: mean={:.4}, max={:.4}", stats.mean, stats.max);
    }

    let pushed = stream.stop()?;
    let stats = stream.statistics();
    log::info!("producer stopped after {} samples", pushed);
    Ok((stats, pushed))
}
