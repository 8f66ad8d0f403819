//! Command-line host for `dsbuffer-core`.
//!
//! Feeds a buffer from a synthetic sine, from stdin, or from a live producer
//! thread and prints a JSON report of the resulting window.

mod report;
mod signal;
mod stream;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use dsbuffer_core::{BufferConfiguration, RingBuffer};

use crate::report::Report;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Push a sine wave and print a report
    Synth {
        #[command(flatten)]
        buffer: BufferArgs,

        /// Tone frequency in Hz
        #[arg(long, default_value_t = 5.0)]
        frequency: f32,

        /// Number of samples to push (default: one full window)
        #[arg(long)]
        samples: Option<usize>,
    },

    /// Push whitespace-separated samples read from stdin and print a report
    Stdin {
        #[command(flatten)]
        buffer: BufferArgs,
    },

    /// Fill a shared buffer from a producer thread and log snapshots
    Stream {
        #[command(flatten)]
        buffer: BufferArgs,

        /// Tone frequency in Hz
        #[arg(long, default_value_t = 5.0)]
        frequency: f32,

        /// How long to run
        #[arg(long, default_value_t = 1000)]
        duration_ms: u64,

        /// Snapshot interval
        #[arg(long, default_value_t = 100)]
        interval_ms: u64,
    },
}

#[derive(Args)]
struct BufferArgs {
    /// Window size in samples
    #[arg(long)]
    capacity: Option<usize>,

    /// Keep a doubled window for spectral transforms (needs even capacity)
    #[arg(long, conflicts_with = "no_fft")]
    fft: bool,

    /// Plain buffer without spectral transforms
    #[arg(long)]
    no_fft: bool,

    /// FIR taps, newest sample first
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    taps: Option<Vec<f32>>,

    /// JSON buffer configuration; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 100.0, value_parser = parse_sample_rate)]
    sample_rate: f32,
}

fn parse_sample_rate(text: &str) -> Result<f32, String> {
    let rate: f32 = text.parse().map_err(|e| format!("{}", e))?;
    if !(rate.is_finite() && rate > 0.0) {
        return Err(format!("sample rate must be a positive number, got {}", rate));
    }
    Ok(rate)
}

impl BufferArgs {
    fn to_config(&self) -> Result<BufferConfiguration> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                BufferConfiguration::from_json(&json)?
            }
            None => BufferConfiguration::default(),
        };

        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if self.fft {
            config.transform_capable = true;
        } else if self.no_fft {
            config.transform_capable = false;
        }
        if let Some(taps) = &self.taps {
            config.fir_taps = Some(taps.clone());
        }

        config.validate()?;
        Ok(config)
    }

    fn build(&self) -> Result<RingBuffer> {
        let config = self.to_config()?;
        log::info!(
            "buffer: capacity={}, transform capable={}, taps={}",
            config.capacity,
            config.transform_capable,
            config.fir_taps.as_ref().map_or(0, Vec::len)
        );
        Ok(RingBuffer::from_config(&config)?)
    }
}

fn print_report(buffer: &mut RingBuffer, sample_rate: f32) -> Result<()> {
    let report = Report::from_buffer(buffer, sample_rate)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Synth {
            buffer: args,
            frequency,
            samples,
        } => {
            let mut buffer = args.build()?;
            let n = samples.unwrap_or(buffer.capacity());
            for x in signal::sine(frequency, args.sample_rate, n) {
                buffer.push(x);
            }
            print_report(&mut buffer, args.sample_rate)?;
        }
        Command::Stdin { buffer: args } => {
            let mut buffer = args.build()?;
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            let samples = signal::parse_samples(&text)?;
            log::debug!("read {} samples from stdin", samples.len());
            for x in samples {
                buffer.push(x);
            }
            print_report(&mut buffer, args.sample_rate)?;
        }
        Command::Stream {
            buffer: args,
            frequency,
            duration_ms,
            interval_ms,
        } => {
            let buffer = args.build()?;
            let (stats, pushed) = stream::run(
                buffer,
                frequency,
                args.sample_rate,
                Duration::from_millis(duration_ms),
                Duration::from_millis(interval_ms.max(1)),
            )?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "samples_pushed": pushed,
                    "statistics": stats,
                }))?
            );
        }
    }

    Ok(())
}
