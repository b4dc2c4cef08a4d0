//! Block host loop.

use polyshaper_core::{AudioBuffer, StreamFormat, Transform};

use crate::{Error, Result};

/// Drives a [`Transform`] over a whole signal in fixed-size blocks.
///
/// The transform is configured once in [`new`](Self::new). Each block is
/// copied into its own [`AudioBuffer`], processed through
/// [`Transform::process_buffer`], and appended to the output, so the
/// transform sees the same serial block sequence a streaming host would
/// give it.
#[derive(Debug)]
pub struct StreamRunner<T> {
    transform: T,
    format: StreamFormat,
    block_size: usize,
}

impl<T: Transform> StreamRunner<T> {
    /// Configure `transform` for `format` and wrap it.
    ///
    /// Fails if the transform rejects the format or `block_size` is zero.
    pub fn new(mut transform: T, format: StreamFormat, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        transform.configure(format)?;

        tracing::debug!(
            sample_rate = format.sample_rate,
            channels = format.channels,
            block_size,
            "stream runner ready"
        );

        Ok(Self {
            transform,
            format,
            block_size,
        })
    }

    /// Negotiated stream format.
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Samples per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The wrapped transform.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// The wrapped transform, mutably.
    pub fn transform_mut(&mut self) -> &mut T {
        &mut self.transform
    }

    /// Unwrap.
    pub fn into_inner(self) -> T {
        self.transform
    }

    /// Process one host buffer in place.
    pub fn process_buffer(&mut self, buffer: &mut AudioBuffer) -> Result<()> {
        self.transform.process_buffer(buffer)?;
        Ok(())
    }

    /// Process `signal` block by block and return the output.
    pub fn run(&mut self, signal: &[f32]) -> Result<Vec<f32>> {
        self.run_with_progress(signal, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_block` with each block's length
    /// after it is processed.
    pub fn run_with_progress<F>(&mut self, signal: &[f32], mut on_block: F) -> Result<Vec<f32>>
    where
        F: FnMut(usize),
    {
        let mut output = Vec::with_capacity(signal.len());

        for chunk in signal.chunks(self.block_size) {
            let mut buffer = AudioBuffer::from_vec(chunk.to_vec());
            self.process_buffer(&mut buffer)?;
            output.extend(buffer.into_inner());
            on_block(chunk.len());
        }

        tracing::debug!(samples = output.len(), "stream processed");
        Ok(output)
    }

    /// Clear the transform's signal state.
    pub fn reset(&mut self) {
        self.transform.reset();
    }
}
