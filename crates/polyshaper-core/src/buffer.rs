//! Host-owned sample buffers and scoped writable mapping.
//!
//! A host hands the transform an [`AudioBuffer`]. Before processing, the
//! transform maps it for writing with [`AudioBuffer::map_writable`], which
//! either yields a [`MappedBuffer`] view or fails without touching anything.
//! The view borrows the buffer exclusively and is released when it goes out
//! of scope, on the success path and on every early return alike.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use core::ops::{Deref, DerefMut};

/// Reasons a buffer cannot be mapped for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// The buffer is shared with another reader and may not be modified.
    ReadOnly,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "unable to map buffer for read & write"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BufferError {}

/// A block of mono `f32` samples owned by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    writable: bool,
}

impl AudioBuffer {
    /// Wrap samples in a writable buffer.
    pub fn from_vec(samples: Vec<f32>) -> Self {
        Self {
            samples,
            writable: true,
        }
    }

    /// Wrap samples in a buffer that refuses write mapping.
    pub fn read_only(samples: Vec<f32>) -> Self {
        Self {
            samples,
            writable: false,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether [`map_writable`](Self::map_writable) will succeed.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Read access, always available.
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Give the samples back to the host.
    pub fn into_inner(self) -> Vec<f32> {
        self.samples
    }

    /// Acquire an exclusive writable view.
    pub fn map_writable(&mut self) -> Result<MappedBuffer<'_>, BufferError> {
        if !self.writable {
            return Err(BufferError::ReadOnly);
        }
        Ok(MappedBuffer {
            samples: &mut self.samples,
        })
    }
}

impl From<Vec<f32>> for AudioBuffer {
    fn from(samples: Vec<f32>) -> Self {
        Self::from_vec(samples)
    }
}

/// Exclusive writable view of an [`AudioBuffer`].
///
/// Dereferences to `[f32]`. Dropping the view releases the mapping.
#[derive(Debug)]
pub struct MappedBuffer<'a> {
    samples: &'a mut [f32],
}

impl Deref for MappedBuffer<'_> {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        self.samples
    }
}

impl DerefMut for MappedBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [f32] {
        self.samples
    }
}
