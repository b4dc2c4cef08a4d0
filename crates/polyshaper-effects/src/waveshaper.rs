//! Polynomial waveshaper over recent sample history.
//!
//! For every input sample `x` the engine shifts `x` into a
//! [`HistoryBuffer`] and evaluates
//!
//! ```text
//! y = ( Σ_{j=1..order, s_j ≠ 0} (index · h[j])^j · s_j ) / (order + 1) · gain / (order + 1)
//! s_j = scaleoffset + scalepowbase^(j + scalepowexpoffset)
//! ```
//!
//! where `h[order]` is the current sample and `h[j]` for smaller `j` are
//! progressively older ones. The result is normalized twice by
//! `order + 1`. Nothing is clamped: values outside `[-1, 1]`, infinities
//! and NaN pass straight through to the host.
//!
//! Parameters live in an [`Arc`]ed [`ParamStore`] so a control thread can
//! change them while the audio thread processes; see
//! [`Waveshaper::shared_params`].

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use libm::powf;
use polyshaper_core::{
    HISTORY_LEN, HistoryBuffer, ParamRef, ParamStore, StreamFormat, Transform, TransformError,
};

use crate::params::{ShapeSettings, WAVESHAPER_PARAMS, WaveshaperParams};

/// Polynomial waveshaping distortion.
///
/// # Example
///
/// ```rust
/// use polyshaper_core::{ParamValue, StreamFormat, Transform};
/// use polyshaper_effects::Waveshaper;
///
/// let mut shaper = Waveshaper::new();
/// shaper.configure(StreamFormat::mono(48000)).unwrap();
///
/// let params = shaper.params();
/// params.set("order", ParamValue::UInt(1)).unwrap();
/// params.set("scalepowbase", ParamValue::Int(1)).unwrap();
/// params.set("scalepowexpoffset", ParamValue::Int(0)).unwrap();
/// params.set("scaleoffset", ParamValue::Int(0)).unwrap();
///
/// let mut block = [1.0, 0.0, -1.0, 2.0];
/// shaper.process(&mut block).unwrap();
/// assert_eq!(block, [0.25, 0.0, -0.25, 0.5]);
/// ```
#[derive(Debug)]
pub struct Waveshaper {
    params: Arc<ParamStore<WaveshaperParams>>,
    history: HistoryBuffer,
    format: Option<StreamFormat>,
}

impl Waveshaper {
    /// Create an unconfigured waveshaper with default parameters and a
    /// zeroed history.
    pub fn new() -> Self {
        let mut store = ParamStore::new(WaveshaperParams::default(), &WAVESHAPER_PARAMS);
        store
            .register("index", |p| ParamRef::Float(&p.index))
            .register("order", |p| ParamRef::UInt(&p.order))
            .register("scalepowbase", |p| ParamRef::Int(&p.scalepowbase))
            .register("scalepowexpoffset", |p| ParamRef::Int(&p.scalepowexpoffset))
            .register("scaleoffset", |p| ParamRef::Int(&p.scaleoffset))
            .register("gain", |p| ParamRef::Float(&p.gain));

        Self {
            params: Arc::new(store),
            history: HistoryBuffer::new(),
            format: None,
        }
    }

    /// Parameter table for get/set by name.
    pub fn params(&self) -> &ParamStore<WaveshaperParams> {
        &self.params
    }

    /// Handle to the parameter table for another thread.
    ///
    /// The handle only reaches the parameters; the history and format stay
    /// with the engine.
    pub fn shared_params(&self) -> Arc<ParamStore<WaveshaperParams>> {
        Arc::clone(&self.params)
    }

    /// Format recorded by the last successful `configure`.
    pub fn format(&self) -> Option<StreamFormat> {
        self.format
    }

    /// Current sample history.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    #[inline]
    fn shape(&mut self, settings: &ShapeSettings, scales: &[f32; HISTORY_LEN], input: f32) -> f32 {
        let order = settings.order;
        self.history.push(order, input);

        let mut out = 0.0;
        for j in 1..=order {
            let scale = scales[j];
            if scale != 0.0 {
                out += powf(settings.index * self.history.tap(j), j as f32) * scale;
            }
        }

        out /= settings.normalization();
        out * settings.output_gain()
    }
}

impl Default for Waveshaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for Waveshaper {
    fn configure(&mut self, format: StreamFormat) -> Result<(), TransformError> {
        format.require_mono()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate = format.sample_rate, "waveshaper configured");

        self.format = Some(format);
        Ok(())
    }

    fn process(&mut self, samples: &mut [f32]) -> Result<(), TransformError> {
        if self.format.is_none() {
            return Err(TransformError::NotConfigured);
        }

        let settings = self.params.values().snapshot();
        let scales = settings.harmonic_scales();

        for sample in samples.iter_mut() {
            *sample = self.shape(&settings, &scales, *sample);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.history.clear();
    }
}
