//! Core Transform trait and stream format types.
//!
//! The [`Transform`] trait is the seam between an in-place audio processor
//! and whatever host drives it. A host negotiates a [`StreamFormat`], calls
//! [`configure`](Transform::configure) once, then calls
//! [`process`](Transform::process) (or
//! [`process_buffer`](Transform::process_buffer)) once per block, serially,
//! from one processing thread.
//!
//! ## Design Decisions
//!
//! - **Mono only**: the stream contract is one channel of interleaved `f32`
//!   on both sides. Anything else is a configuration error.
//!
//! - **In place**: output overwrites input. The slice is borrowed for the
//!   duration of the call and never retained.
//!
//! - **Object-safe**: `dyn Transform` works for hosts that pick the effect
//!   at runtime.

use core::fmt;

use crate::buffer::{AudioBuffer, BufferError};

/// Negotiated stream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    /// Sample rate in Hz. Must be positive.
    pub sample_rate: u32,
    /// Interleaved channel count. Must be 1.
    pub channels: u16,
}

impl StreamFormat {
    /// Single-channel format at `sample_rate`.
    pub const fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
        }
    }

    /// Check the mono, positive-rate contract.
    pub fn require_mono(&self) -> Result<(), TransformError> {
        if self.channels != 1 {
            return Err(TransformError::UnsupportedChannels(self.channels));
        }
        if self.sample_rate == 0 {
            return Err(TransformError::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }
}

/// Errors reported by a [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// `process` was called before a successful `configure`.
    NotConfigured,
    /// The stream has a channel count other than 1.
    UnsupportedChannels(u16),
    /// The stream has a sample rate of zero.
    InvalidSampleRate(u32),
    /// The host buffer could not be mapped for writing.
    BufferAccess(BufferError),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "transform used before configure"),
            Self::UnsupportedChannels(n) => write!(f, "expected 1 channel, got {n}"),
            Self::InvalidSampleRate(rate) => write!(f, "invalid sample rate {rate}"),
            Self::BufferAccess(err) => write!(f, "buffer access failed: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BufferAccess(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BufferError> for TransformError {
    fn from(err: BufferError) -> Self {
        Self::BufferAccess(err)
    }
}

/// An in-place, single-channel stream transform.
///
/// # Example
///
/// ```rust
/// use polyshaper_core::{StreamFormat, Transform, TransformError};
///
/// struct Invert(bool);
///
/// impl Transform for Invert {
///     fn configure(&mut self, format: StreamFormat) -> Result<(), TransformError> {
///         format.require_mono()?;
///         self.0 = true;
///         Ok(())
///     }
///
///     fn process(&mut self, samples: &mut [f32]) -> Result<(), TransformError> {
///         if !self.0 {
///             return Err(TransformError::NotConfigured);
///         }
///         for s in samples.iter_mut() {
///             *s = -*s;
///         }
///         Ok(())
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut invert = Invert(false);
/// assert_eq!(invert.process(&mut [1.0]), Err(TransformError::NotConfigured));
/// assert!(invert.configure(StreamFormat { sample_rate: 44100, channels: 2 }).is_err());
/// ```
pub trait Transform {
    /// Record the negotiated stream format.
    ///
    /// Must succeed before [`process`](Self::process). A failed call leaves
    /// any previous configuration in place.
    fn configure(&mut self, format: StreamFormat) -> Result<(), TransformError>;

    /// Transform `samples` in place, in index order.
    fn process(&mut self, samples: &mut [f32]) -> Result<(), TransformError>;

    /// Map a host buffer for writing and process it.
    ///
    /// If mapping fails the call returns [`TransformError::BufferAccess`]
    /// before any transform state is touched.
    fn process_buffer(&mut self, buffer: &mut AudioBuffer) -> Result<(), TransformError> {
        let mut view = buffer.map_writable()?;
        self.process(&mut view)
    }

    /// Clear internal signal state (history, filters). Parameters and the
    /// configured format are kept.
    fn reset(&mut self);
}

impl<T: Transform + ?Sized> Transform for &mut T {
    fn configure(&mut self, format: StreamFormat) -> Result<(), TransformError> {
        (**self).configure(format)
    }

    fn process(&mut self, samples: &mut [f32]) -> Result<(), TransformError> {
        (**self).process(samples)
    }

    fn process_buffer(&mut self, buffer: &mut AudioBuffer) -> Result<(), TransformError> {
        (**self).process_buffer(buffer)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
