//! Tagged parameter values.
//!
//! Every parameter has one of five storage kinds. [`ParamValue`] carries a
//! value together with its kind so that get/set can be dispatched through a
//! single `match` instead of per-parameter code.

use core::fmt;

/// Storage kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    UInt,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Enumeration, stored as the variant index.
    Enum,
}

impl ParamKind {
    /// Short lowercase name used in listings and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::UInt => "uint",
            ParamKind::Float => "float",
            ParamKind::Double => "double",
            ParamKind::Enum => "enum",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parameter value tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Signed 32-bit integer.
    Int(i32),
    /// Unsigned 32-bit integer.
    UInt(u32),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Enumeration variant index.
    Enum(u32),
}

impl ParamValue {
    /// The kind tag of this value.
    pub const fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::UInt(_) => ParamKind::UInt,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Double(_) => ParamKind::Double,
            ParamValue::Enum(_) => ParamKind::Enum,
        }
    }

    /// Converts to the typed representation `T`.
    ///
    /// Returns `None` if the kinds differ. No numeric conversion is attempted.
    pub fn to<T: ParamType>(self) -> Option<T> {
        T::from_value(self)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::UInt(v) | ParamValue::Enum(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Double(v) => write!(f, "{v}"),
        }
    }
}

/// Index of an enumeration variant.
///
/// Distinguishes enum parameters from plain `u32` ones in typed access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EnumIndex(pub u32);

/// Rust types that map one-to-one onto a [`ParamKind`].
///
/// # Example
///
/// ```rust
/// use polyshaper_core::{ParamKind, ParamType, ParamValue};
///
/// assert_eq!(<f32 as ParamType>::KIND, ParamKind::Float);
/// assert_eq!(3u32.into_value(), ParamValue::UInt(3));
/// assert_eq!(i32::from_value(ParamValue::UInt(3)), None);
/// ```
pub trait ParamType: Copy {
    /// Kind this type is stored as.
    const KIND: ParamKind;

    /// Wraps the value in its tagged form.
    fn into_value(self) -> ParamValue;

    /// Unwraps a tagged value, or `None` on a kind mismatch.
    fn from_value(value: ParamValue) -> Option<Self>;
}

impl ParamType for i32 {
    const KIND: ParamKind = ParamKind::Int;

    fn into_value(self) -> ParamValue {
        ParamValue::Int(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl ParamType for u32 {
    const KIND: ParamKind = ParamKind::UInt;

    fn into_value(self) -> ParamValue {
        ParamValue::UInt(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::UInt(v) => Some(v),
            _ => None,
        }
    }
}

impl ParamType for f32 {
    const KIND: ParamKind = ParamKind::Float;

    fn into_value(self) -> ParamValue {
        ParamValue::Float(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl ParamType for f64 {
    const KIND: ParamKind = ParamKind::Double;

    fn into_value(self) -> ParamValue {
        ParamValue::Double(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl ParamType for EnumIndex {
    const KIND: ParamKind = ParamKind::Enum;

    fn into_value(self) -> ParamValue {
        ParamValue::Enum(self.0)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Enum(v) => Some(EnumIndex(v)),
            _ => None,
        }
    }
}
