//! Waveshaper parameter schema and storage.

use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use libm::powf;
use polyshaper_core::{AtomicF32, HISTORY_LEN, MAX_ORDER, ParamDescriptor};

/// Declared parameter schema, in host display order.
pub static WAVESHAPER_PARAMS: [ParamDescriptor; 6] = [
    ParamDescriptor::float("index", "Index", f32::MIN_POSITIVE, 10.0, 1.0)
        .with_blurb("Amplitude scale applied before exponentiation"),
    ParamDescriptor::uint("order", "Order", 0, MAX_ORDER as u32, 1)
        .with_blurb("Highest harmonic and history depth"),
    ParamDescriptor::int("scalepowbase", "Sc. Pow Base", -10, 10, -1)
        .with_blurb("Scale Power Base"),
    ParamDescriptor::int("scalepowexpoffset", "Sc. Pow Exp Off", -5, 5, -1)
        .with_blurb("Scale Power Exponent Offset"),
    ParamDescriptor::int("scaleoffset", "Sc. Offset", -10, 10, 1).with_blurb("Scale Offset"),
    ParamDescriptor::float("gain", "Gain", 0.0, 1.0, 1.0).with_blurb("Output gain"),
];

/// Live parameter storage, shared between control and audio threads.
///
/// Written only through the engine's
/// [`ParamStore`](polyshaper_core::ParamStore); read once per block via
/// [`snapshot`](Self::snapshot).
#[derive(Debug)]
pub struct WaveshaperParams {
    pub(crate) index: AtomicF32,
    pub(crate) order: AtomicU32,
    pub(crate) scalepowbase: AtomicI32,
    pub(crate) scalepowexpoffset: AtomicI32,
    pub(crate) scaleoffset: AtomicI32,
    pub(crate) gain: AtomicF32,
}

impl WaveshaperParams {
    /// Read all fields once.
    ///
    /// Each field is read atomically; the set as a whole is not, so a
    /// concurrent update may be half-visible for one block.
    pub fn snapshot(&self) -> ShapeSettings {
        ShapeSettings {
            index: self.index.load(),
            order: (self.order.load(Ordering::Acquire) as usize).min(MAX_ORDER),
            scalepowbase: self.scalepowbase.load(Ordering::Acquire),
            scalepowexpoffset: self.scalepowexpoffset.load(Ordering::Acquire),
            scaleoffset: self.scaleoffset.load(Ordering::Acquire),
            gain: self.gain.load(),
        }
    }
}

impl Default for WaveshaperParams {
    fn default() -> Self {
        let d = ShapeSettings::default();
        Self {
            index: AtomicF32::new(d.index),
            order: AtomicU32::new(d.order as u32),
            scalepowbase: AtomicI32::new(d.scalepowbase),
            scalepowexpoffset: AtomicI32::new(d.scalepowexpoffset),
            scaleoffset: AtomicI32::new(d.scaleoffset),
            gain: AtomicF32::new(d.gain),
        }
    }
}

/// Plain copy of the parameters used for one `process` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSettings {
    /// Amplitude scale before exponentiation.
    pub index: f32,
    /// Harmonic order, already limited to [`MAX_ORDER`].
    pub order: usize,
    /// Power-law base.
    pub scalepowbase: i32,
    /// Power-law exponent offset.
    pub scalepowexpoffset: i32,
    /// Additive scale offset.
    pub scaleoffset: i32,
    /// Output gain.
    pub gain: f32,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            index: 1.0,
            order: 1,
            scalepowbase: -1,
            scalepowexpoffset: -1,
            scaleoffset: 1,
            gain: 1.0,
        }
    }
}

impl ShapeSettings {
    /// Weight of harmonic `j`:
    /// `scaleoffset + scalepowbase ^ (j + scalepowexpoffset)`.
    ///
    /// Computed with `f32` `powf`. A zero base with a negative exponent gives
    /// `+inf`, which then flows through the signal unchanged. The exponent
    /// saturates at the `i32` bounds for offsets no host range would allow.
    #[inline]
    pub fn harmonic_scale(&self, j: usize) -> f32 {
        let exponent = (j as i32).saturating_add(self.scalepowexpoffset);
        self.scaleoffset as f32 + powf(self.scalepowbase as f32, exponent as f32)
    }

    /// Harmonic weights for `j` in `1..=order`; entry 0 is unused.
    pub fn harmonic_scales(&self) -> [f32; HISTORY_LEN] {
        let mut scales = [0.0; HISTORY_LEN];
        for j in 1..=self.order {
            scales[j] = self.harmonic_scale(j);
        }
        scales
    }

    /// `order + 1`, the divisor applied at both normalization stages.
    #[inline]
    pub fn normalization(&self) -> f32 {
        (self.order + 1) as f32
    }

    /// Final multiplier, `1 / (order + 1) * gain`.
    #[inline]
    pub fn output_gain(&self) -> f32 {
        1.0 / self.normalization() * self.gain
    }
}
