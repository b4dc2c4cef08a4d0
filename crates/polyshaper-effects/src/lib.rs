//! Polyshaper Effects - polynomial waveshaping distortion
//!
//! This crate provides the waveshaper engine built on polyshaper-core:
//!
//! - [`Waveshaper`] - sums powers of recent samples, weighted by a
//!   power-law harmonic series, then normalizes by the order
//! - [`WAVESHAPER_PARAMS`] - the declared parameter schema (`index`, `order`,
//!   `scalepowbase`, `scalepowexpoffset`, `scaleoffset`, `gain`)
//! - [`ShapeSettings`] - one block's snapshot of the parameters
//!
//! ## Example
//!
//! ```rust
//! use polyshaper_core::{StreamFormat, Transform};
//! use polyshaper_effects::Waveshaper;
//!
//! let mut shaper = Waveshaper::new();
//! shaper.configure(StreamFormat::mono(48000)).unwrap();
//! shaper.params().set_as("order", 3u32).unwrap();
//!
//! let mut block = vec![0.25f32; 64];
//! shaper.process(&mut block).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod params;
pub mod waveshaper;

// Re-export main types at crate root
pub use params::{ShapeSettings, WAVESHAPER_PARAMS, WaveshaperParams};
pub use waveshaper::Waveshaper;
