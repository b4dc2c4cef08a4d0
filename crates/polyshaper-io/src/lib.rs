//! File and host-loop layer for polyshaper transforms.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for loading/saving audio files,
//!   [`mix_to_mono`] for hosts that downmix before processing
//! - **Block processing**: [`StreamRunner`] drives any [`Transform`](polyshaper_core::Transform)
//!   over a signal one [`AudioBuffer`](polyshaper_core::AudioBuffer) at a time
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use polyshaper_core::StreamFormat;
//! use polyshaper_effects::Waveshaper;
//! use polyshaper_io::{StreamRunner, read_wav, write_wav};
//!
//! let (samples, spec) = read_wav("input.wav")?;
//!
//! let format = StreamFormat { sample_rate: spec.sample_rate, channels: spec.channels };
//! let mut runner = StreamRunner::new(Waveshaper::new(), format, 1024)?;
//! let processed = runner.run(&samples)?;
//!
//! write_wav("output.wav", &processed, spec)?;
//! ```

mod runner;
mod wav;

use polyshaper_core::TransformError;

pub use runner::StreamRunner;
pub use wav::{WavSpec, mix_to_mono, read_wav, write_wav};

/// Error types for file I/O and host processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The transform rejected the stream or a block.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Block size of zero.
    #[error("Block size must be at least 1")]
    InvalidBlockSize,
}

/// Convenience result type for I/O and host processing.
pub type Result<T> = std::result::Result<T, Error>;
