use serde::Serialize;

use dsbuffer_core::{AddressingMode, RingBuffer, WindowStatistics};

/// JSON summary of a buffer after a run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub capacity: usize,
    pub transform_capable: bool,
    pub addressing: &'static str,
    pub window: Vec<f32>,
    pub statistics: WindowStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fir: Option<FirReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrum: Option<SpectrumReport>,
}

#[derive(Debug, Serialize)]
pub struct FirReport {
    pub taps: Vec<f32>,
    pub latest: f32,
    pub filtered: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct SpectrumReport {
    pub frequencies: Vec<f32>,
    pub magnitudes: Vec<f32>,
    pub peak_frequency: f32,
}

impl Report {
    pub fn from_buffer(buffer: &mut RingBuffer, sample_rate: f32) -> dsbuffer_core::Result<Self> {
        let fir = match buffer.taps() {
            Some(taps) => Some(FirReport {
                taps: taps.to_vec(),
                latest: buffer.latest_fir_output()?,
                filtered: buffer.fir_filter()?,
            }),
            None => None,
        };

        let spectrum = if buffer.is_transform_capable() {
            let frequencies = buffer.frequency_axis(sample_rate)?;
            let magnitudes = buffer.fft_magnitudes()?;
            // DC is skipped so an offset does not hide the tone.
            let peak_bin = magnitudes
                .iter()
                .enumerate()
                .skip(1)
                .fold((0, f32::NEG_INFINITY), |best, (i, &m)| if m > best.1 { (i, m) } else { best })
                .0;
            Some(SpectrumReport {
                peak_frequency: frequencies[peak_bin],
                frequencies,
                magnitudes,
            })
        } else {
            None
        };

        Ok(Self {
            capacity: buffer.capacity(),
            transform_capable: buffer.is_transform_capable(),
            addressing: match buffer.addressing_mode() {
                AddressingMode::Masked => "masked",
                AddressingMode::Modulo => "modulo",
            },
            window: buffer.dump(),
            statistics: buffer.statistics(),
            fir,
            spectrum,
        })
    }
}
