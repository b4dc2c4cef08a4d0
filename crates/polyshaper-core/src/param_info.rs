//! Declared parameter schema.
//!
//! A [`ParamDescriptor`] is what a host sees of a parameter: its name, a short
//! display label, a one-line description, the storage kind, the valid range
//! and the default. Effects declare their schema as a `static` slice of
//! descriptors; [`ParamStore`](crate::ParamStore) refuses to bind any name
//! that is not declared there.
//!
//! Range enforcement is the host's job. Use [`ParamDescriptor::contains`]
//! before calling `set`.
//!
//! # Example
//!
//! ```rust
//! use polyshaper_core::{ParamDescriptor, ParamKind, ParamValue};
//!
//! static SCHEMA: [ParamDescriptor; 2] = [
//!     ParamDescriptor::float("drive", "Drive", 0.0, 10.0, 1.0),
//!     ParamDescriptor::uint("taps", "Taps", 0, 8, 2).with_blurb("Number of taps"),
//! ];
//!
//! let taps = &SCHEMA[1];
//! assert_eq!(taps.kind, ParamKind::UInt);
//! assert!(taps.contains(ParamValue::UInt(8)));
//! assert!(!taps.contains(ParamValue::UInt(9)));
//! assert_eq!(taps.parse_value("4"), Some(ParamValue::UInt(4)));
//! ```

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

use crate::param_value::{ParamKind, ParamValue};

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Canonical name used for lookup (e.g., `"scalepowbase"`).
    pub name: &'static str,

    /// Short label for displays (e.g., `"Sc. Pow Base"`).
    pub nick: &'static str,

    /// One-line description. Defaults to the nick.
    pub blurb: &'static str,

    /// Storage kind.
    pub kind: ParamKind,

    /// Minimum allowed value (inclusive), same kind as `kind`.
    pub min: ParamValue,

    /// Maximum allowed value (inclusive), same kind as `kind`.
    pub max: ParamValue,

    /// Value at construction and after a reset to defaults.
    pub default: ParamValue,
}

impl ParamDescriptor {
    /// Signed integer parameter.
    pub const fn int(name: &'static str, nick: &'static str, min: i32, max: i32, default: i32) -> Self {
        Self::new(
            name,
            nick,
            ParamKind::Int,
            ParamValue::Int(min),
            ParamValue::Int(max),
            ParamValue::Int(default),
        )
    }

    /// Unsigned integer parameter.
    pub const fn uint(name: &'static str, nick: &'static str, min: u32, max: u32, default: u32) -> Self {
        Self::new(
            name,
            nick,
            ParamKind::UInt,
            ParamValue::UInt(min),
            ParamValue::UInt(max),
            ParamValue::UInt(default),
        )
    }

    /// 32-bit float parameter.
    pub const fn float(name: &'static str, nick: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self::new(
            name,
            nick,
            ParamKind::Float,
            ParamValue::Float(min),
            ParamValue::Float(max),
            ParamValue::Float(default),
        )
    }

    /// 64-bit float parameter.
    pub const fn double(name: &'static str, nick: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self::new(
            name,
            nick,
            ParamKind::Double,
            ParamValue::Double(min),
            ParamValue::Double(max),
            ParamValue::Double(default),
        )
    }

    /// Enumeration parameter with `variants` entries (indices `0..variants`).
    pub const fn enumeration(name: &'static str, nick: &'static str, variants: u32, default: u32) -> Self {
        Self::new(
            name,
            nick,
            ParamKind::Enum,
            ParamValue::Enum(0),
            ParamValue::Enum(variants.saturating_sub(1)),
            ParamValue::Enum(default),
        )
    }

    const fn new(
        name: &'static str,
        nick: &'static str,
        kind: ParamKind,
        min: ParamValue,
        max: ParamValue,
        default: ParamValue,
    ) -> Self {
        Self {
            name,
            nick,
            blurb: nick,
            kind,
            min,
            max,
            default,
        }
    }

    /// Sets the one-line description.
    ///
    /// Builder-style override, chained after a constructor.
    pub const fn with_blurb(mut self, blurb: &'static str) -> Self {
        self.blurb = blurb;
        self
    }

    /// Returns `true` if `value` has this parameter's kind and lies within
    /// `[min, max]`.
    ///
    /// NaN is never contained.
    pub fn contains(&self, value: ParamValue) -> bool {
        match (self.min, value, self.max) {
            (ParamValue::Int(lo), ParamValue::Int(v), ParamValue::Int(hi)) => lo <= v && v <= hi,
            (ParamValue::UInt(lo), ParamValue::UInt(v), ParamValue::UInt(hi))
            | (ParamValue::Enum(lo), ParamValue::Enum(v), ParamValue::Enum(hi)) => lo <= v && v <= hi,
            (ParamValue::Float(lo), ParamValue::Float(v), ParamValue::Float(hi)) => lo <= v && v <= hi,
            (ParamValue::Double(lo), ParamValue::Double(v), ParamValue::Double(hi)) => {
                lo <= v && v <= hi
            }
            _ => false,
        }
    }

    /// Parses display text into a value of this parameter's kind.
    ///
    /// Surrounding whitespace is ignored. Returns `None` if the text is not a
    /// valid literal for the kind. The range is not checked.
    pub fn parse_value(&self, text: &str) -> Option<ParamValue> {
        let text = text.trim();
        match self.kind {
            ParamKind::Int => text.parse().ok().map(ParamValue::Int),
            ParamKind::UInt => text.parse().ok().map(ParamValue::UInt),
            ParamKind::Float => text.parse().ok().map(ParamValue::Float),
            ParamKind::Double => text.parse().ok().map(ParamValue::Double),
            ParamKind::Enum => text.parse().ok().map(ParamValue::Enum),
        }
    }

    /// Formats a value as display text.
    pub fn format_value(&self, value: ParamValue) -> String {
        value.to_string()
    }

    /// Human-readable range, e.g. `"[-10, 10]"`.
    pub fn range_text(&self) -> String {
        let mut text = String::from("[");
        text.push_str(&self.min.to_string());
        text.push_str(", ");
        text.push_str(&self.max.to_string());
        text.push(']');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_respects_bounds() {
        let desc = ParamDescriptor::int("offset", "Offset", -10, 10, 1);
        assert!(desc.contains(ParamValue::Int(-10)));
        assert!(desc.contains(ParamValue::Int(10)));
        assert!(!desc.contains(ParamValue::Int(11)));
    }

    #[test]
    fn test_contains_rejects_other_kinds() {
        let desc = ParamDescriptor::uint("order", "Order", 0, 10, 1);
        assert!(!desc.contains(ParamValue::Int(1)));
        assert!(!desc.contains(ParamValue::Enum(1)));
    }

    #[test]
    fn test_contains_rejects_nan() {
        let desc = ParamDescriptor::float("gain", "Gain", 0.0, 1.0, 1.0);
        assert!(!desc.contains(ParamValue::Float(f32::NAN)));
    }

    #[test]
    fn test_float_lower_bound_is_inclusive() {
        let desc = ParamDescriptor::float("index", "Index", f32::MIN_POSITIVE, 10.0, 1.0);
        assert!(desc.contains(ParamValue::Float(f32::MIN_POSITIVE)));
        assert!(!desc.contains(ParamValue::Float(0.0)));
    }

    #[test]
    fn test_parse_value_per_kind() {
        let int = ParamDescriptor::int("a", "A", -5, 5, 0);
        assert_eq!(int.parse_value(" -3 "), Some(ParamValue::Int(-3)));
        assert_eq!(int.parse_value("1.5"), None);

        let uint = ParamDescriptor::uint("b", "B", 0, 5, 0);
        assert_eq!(uint.parse_value("-1"), None);

        let double = ParamDescriptor::double("c", "C", 0.0, 1.0, 0.5);
        assert_eq!(double.parse_value("0.125"), Some(ParamValue::Double(0.125)));

        let choice = ParamDescriptor::enumeration("d", "D", 3, 0);
        assert_eq!(choice.parse_value("2"), Some(ParamValue::Enum(2)));
        assert_eq!(choice.max, ParamValue::Enum(2));
    }

    #[test]
    fn test_blurb_defaults_to_nick() {
        let desc = ParamDescriptor::float("gain", "Gain", 0.0, 1.0, 1.0);
        assert_eq!(desc.blurb, "Gain");
        assert_eq!(desc.with_blurb("Output gain").blurb, "Output gain");
    }

    #[test]
    fn test_range_text() {
        let desc = ParamDescriptor::int("offset", "Offset", -5, 5, -1);
        assert_eq!(desc.range_text(), "[-5, 5]");
    }
}
