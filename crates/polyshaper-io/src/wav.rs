//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Layout of a file on disk.
///
/// Input files may carry several channels; the waveshaper only takes one,
/// so anything written back out is normally mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Channel count as stored in the file.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// 32 selects float samples; anything else is integer PCM.
    pub bits_per_sample: u16,
}

/// Mono 48 kHz float.
impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

// 32 bits maps to float samples.
impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file and return interleaved samples as f32 along with the spec.
///
/// Channels are left interleaved; use [`mix_to_mono`] to downmix. Integer
/// PCM is scaled to `[-1, 1)`.
///
/// # Example
/// ```ignore
/// let (samples, spec) = read_wav("input.wav")?;
/// println!("Loaded {} samples at {} Hz", samples.len(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample)?;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    tracing::debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        samples = samples.len(),
        "read wav"
    );

    Ok((samples, spec))
}

/// Average interleaved channels into one.
///
/// `channels` of 0 or 1 returns the input unchanged. A trailing partial
/// frame is averaged over the samples present.
pub fn mix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels as usize;
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Write interleaved samples to a WAV file.
///
/// Samples are written as-is for 32-bit float output. Integer depths clamp
/// to the representable range, so out-of-range transform output clips here
/// rather than wrapping.
///
/// # Example
/// ```ignore
/// let samples = vec![0.0f32; 48000]; // 1 second of silence
/// let spec = WavSpec { sample_rate: 48000, ..Default::default() };
/// write_wav("output.wav", &samples, spec)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let max_val = if spec.bits_per_sample == 32 {
        None
    } else {
        Some(int_scale(spec.bits_per_sample)?)
    };

    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    match max_val {
        None => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
        Some(max_val) => {
            for &sample in samples {
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    tracing::debug!(samples = samples.len(), bits = spec.bits_per_sample, "wrote wav");
    Ok(())
}

fn int_scale(bits: u16) -> Result<f32> {
    match bits {
        8 | 16 | 24 => Ok((1i32 << (bits - 1)) as f32),
        other => Err(Error::UnsupportedFormat(format!(
            "{other}-bit integer PCM"
        ))),
    }
}
