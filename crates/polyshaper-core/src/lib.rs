//! Polyshaper Core - transform, parameter and buffer primitives
//!
//! This crate holds the host-facing building blocks the waveshaper engine is
//! assembled from. Nothing here knows about a particular effect.
//!
//! # Core Abstractions
//!
//! ## Transform System
//!
//! - [`Transform`] - `configure` + in-place `process` interface for a stream transform
//! - [`StreamFormat`] - negotiated sample rate and channel count
//! - [`AudioBuffer`] / [`MappedBuffer`] - host buffer with scoped writable mapping
//!
//! ## Parameter Binding
//!
//! - [`ParamStore`] - fixed table binding parameter names to typed atomic storage
//! - [`ParamDescriptor`] - declared schema entry (kind, range, default)
//! - [`ParamValue`] / [`ParamKind`] - tagged parameter values
//!
//! ## Signal State & Diagnostics
//!
//! - [`HistoryBuffer`] - sliding window of the last `order + 1` samples
//! - [`ThroughputMonitor`] - periodic samples/second reporting
//! - [`Monitored`] - wraps a [`Transform`] with wall-clock throughput timing (std only)
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! polyshaper-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use polyshaper_core::{AudioBuffer, StreamFormat, Transform, TransformError};
//!
//! struct Halve {
//!     configured: bool,
//! }
//!
//! impl Transform for Halve {
//!     fn configure(&mut self, format: StreamFormat) -> Result<(), TransformError> {
//!         format.require_mono()?;
//!         self.configured = true;
//!         Ok(())
//!     }
//!
//!     fn process(&mut self, samples: &mut [f32]) -> Result<(), TransformError> {
//!         if !self.configured {
//!             return Err(TransformError::NotConfigured);
//!         }
//!         samples.iter_mut().for_each(|s| *s *= 0.5);
//!         Ok(())
//!     }
//!
//!     fn reset(&mut self) {}
//! }
//!
//! let mut halve = Halve { configured: false };
//! halve.configure(StreamFormat::mono(48000)).unwrap();
//!
//! let mut buffer = AudioBuffer::from_vec(vec![1.0, -1.0]);
//! halve.process_buffer(&mut buffer).unwrap();
//! assert_eq!(buffer.as_slice(), &[0.5, -0.5]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod atomic;
pub mod buffer;
pub mod history;
pub mod param_info;
pub mod param_store;
pub mod param_value;
pub mod throughput;
pub mod transform;

// Re-export main types at crate root
pub use atomic::{AtomicF32, AtomicF64};
pub use buffer::{AudioBuffer, BufferError, MappedBuffer};
pub use history::{HISTORY_LEN, HistoryBuffer, MAX_ORDER};
pub use param_info::ParamDescriptor;
pub use param_store::{Accessor, ParamBinding, ParamError, ParamRef, ParamStore};
pub use param_value::{EnumIndex, ParamKind, ParamType, ParamValue};
#[cfg(feature = "std")]
pub use throughput::Monitored;
pub use throughput::{ThroughputMonitor, ThroughputReport};
pub use transform::{StreamFormat, Transform, TransformError};
