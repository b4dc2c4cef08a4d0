//! Name-keyed parameter binding table.
//!
//! A [`ParamStore`] owns a parameter struct `P` whose fields are atomic
//! cells, plus one [`ParamBinding`] per declared parameter. A binding is a
//! name and an [`Accessor`]: a plain function that projects `&P` onto a
//! tagged reference ([`ParamRef`]) to one field. Reads and writes go through
//! a single `match` on that tag, so adding a parameter is one `register`
//! call and no new get/set code.
//!
//! Both [`get`](ParamStore::get) and [`set`](ParamStore::set) locate the
//! binding by name equality.
//!
//! # Thread Safety
//!
//! `get` and `set` take `&self`. Every field is an atomic, so a control
//! thread can call `set` while the audio thread reads the same struct. A
//! single scalar never tears; consistency across several fields is not
//! guaranteed.
//!
//! # Example
//!
//! ```rust
//! use core::sync::atomic::AtomicI32;
//! use polyshaper_core::{AtomicF32, ParamDescriptor, ParamRef, ParamStore, ParamValue};
//!
//! #[derive(Default)]
//! struct Params {
//!     depth: AtomicF32,
//!     steps: AtomicI32,
//! }
//!
//! static SCHEMA: [ParamDescriptor; 2] = [
//!     ParamDescriptor::float("depth", "Depth", 0.0, 1.0, 0.5),
//!     ParamDescriptor::int("steps", "Steps", -4, 4, 0),
//! ];
//!
//! let mut store = ParamStore::new(Params::default(), &SCHEMA);
//! store
//!     .register("depth", |p| ParamRef::Float(&p.depth))
//!     .register("steps", |p| ParamRef::Int(&p.steps));
//! store.reset_to_defaults();
//!
//! store.set("steps", ParamValue::Int(-2)).unwrap();
//! assert_eq!(store.get_as::<i32>("steps").unwrap(), -2);
//! assert_eq!(store.get("depth").unwrap(), ParamValue::Float(0.5));
//! assert!(store.set("steps", ParamValue::Float(1.0)).is_err());
//! ```

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use core::fmt;
use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use crate::atomic::{AtomicF32, AtomicF64};
use crate::param_info::ParamDescriptor;
use crate::param_value::{ParamKind, ParamType, ParamValue};

/// Tagged reference to one field of a parameter struct.
#[derive(Debug, Clone, Copy)]
pub enum ParamRef<'a> {
    /// Signed integer storage.
    Int(&'a AtomicI32),
    /// Unsigned integer storage.
    UInt(&'a AtomicU32),
    /// 32-bit float storage.
    Float(&'a AtomicF32),
    /// 64-bit float storage.
    Double(&'a AtomicF64),
    /// Enumeration storage (variant index).
    Enum(&'a AtomicU32),
}

impl ParamRef<'_> {
    /// Kind of the referenced storage.
    pub const fn kind(&self) -> ParamKind {
        match self {
            ParamRef::Int(_) => ParamKind::Int,
            ParamRef::UInt(_) => ParamKind::UInt,
            ParamRef::Float(_) => ParamKind::Float,
            ParamRef::Double(_) => ParamKind::Double,
            ParamRef::Enum(_) => ParamKind::Enum,
        }
    }

    /// Reads the referenced storage.
    #[inline]
    pub fn load(&self) -> ParamValue {
        match self {
            ParamRef::Int(cell) => ParamValue::Int(cell.load(Ordering::Acquire)),
            ParamRef::UInt(cell) => ParamValue::UInt(cell.load(Ordering::Acquire)),
            ParamRef::Float(cell) => ParamValue::Float(cell.load()),
            ParamRef::Double(cell) => ParamValue::Double(cell.load()),
            ParamRef::Enum(cell) => ParamValue::Enum(cell.load(Ordering::Acquire)),
        }
    }

    /// Writes `value` into the referenced storage.
    ///
    /// Returns `false` and leaves the storage untouched if the kinds differ.
    #[inline]
    pub fn store(&self, value: ParamValue) -> bool {
        match (self, value) {
            (ParamRef::Int(cell), ParamValue::Int(v)) => cell.store(v, Ordering::Release),
            (ParamRef::UInt(cell), ParamValue::UInt(v))
            | (ParamRef::Enum(cell), ParamValue::Enum(v)) => cell.store(v, Ordering::Release),
            (ParamRef::Float(cell), ParamValue::Float(v)) => cell.store(v),
            (ParamRef::Double(cell), ParamValue::Double(v)) => cell.store(v),
            _ => return false,
        }
        true
    }
}

/// Projects a parameter struct onto one of its fields.
pub type Accessor<P> = for<'a> fn(&'a P) -> ParamRef<'a>;

/// One entry of the binding table.
pub struct ParamBinding<P> {
    descriptor: &'static ParamDescriptor,
    access: Accessor<P>,
}

impl<P> ParamBinding<P> {
    /// The declared schema entry this binding was registered against.
    pub fn descriptor(&self) -> &'static ParamDescriptor {
        self.descriptor
    }

    /// Bound parameter name.
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Storage kind.
    pub fn kind(&self) -> ParamKind {
        self.descriptor.kind
    }
}

impl<P> fmt::Debug for ParamBinding<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamBinding")
            .field("name", &self.descriptor.name)
            .field("kind", &self.descriptor.kind)
            .finish_non_exhaustive()
    }
}

/// Errors from binding, reading or writing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// No binding with this name exists.
    NotFound(String),
    /// The value's kind does not match the binding's kind.
    TypeMismatch {
        /// Parameter name.
        name: &'static str,
        /// Kind of the binding.
        expected: ParamKind,
        /// Kind that was supplied or requested.
        found: ParamKind,
    },
    /// Registration of a name that is not in the declared schema.
    Undeclared(String),
    /// Registration of a name that is already bound.
    AlreadyBound(&'static str),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "unknown parameter '{name}'"),
            Self::TypeMismatch {
                name,
                expected,
                found,
            } => write!(f, "parameter '{name}' is {expected}, got {found}"),
            Self::Undeclared(name) => write!(f, "parameter '{name}' is not declared in the schema"),
            Self::AlreadyBound(name) => write!(f, "parameter '{name}' is already bound"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

/// Fixed table binding declared parameter names to typed storage in `P`.
///
/// Bindings are added with [`register`](Self::register) while the store is
/// still uniquely owned (normally inside the effect constructor). Once the
/// store is shared, the table can no longer change; capacity is the schema
/// length.
pub struct ParamStore<P> {
    values: P,
    schema: &'static [ParamDescriptor],
    bindings: Vec<ParamBinding<P>>,
}

impl<P> ParamStore<P> {
    /// Create an empty table over `values`, accepting names from `schema`.
    pub fn new(values: P, schema: &'static [ParamDescriptor]) -> Self {
        Self {
            values,
            schema,
            bindings: Vec::with_capacity(schema.len()),
        }
    }

    /// Bind `name` to the field selected by `access`.
    ///
    /// Fails if `name` is not declared, is already bound, or if the field's
    /// kind differs from the declared kind.
    pub fn try_register(&mut self, name: &str, access: Accessor<P>) -> Result<(), ParamError> {
        let descriptor = self
            .schema
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ParamError::Undeclared(name.into()))?;

        if self.bindings.iter().any(|b| b.name() == name) {
            return Err(ParamError::AlreadyBound(descriptor.name));
        }

        let found = access(&self.values).kind();
        if found != descriptor.kind {
            return Err(ParamError::TypeMismatch {
                name: descriptor.name,
                expected: descriptor.kind,
                found,
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("param_bind: {} ({})", descriptor.name, descriptor.kind);

        self.bindings.push(ParamBinding { descriptor, access });
        Ok(())
    }

    /// Bind `name` to the field selected by `access`.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions [`try_register`](Self::try_register)
    /// returns an error. The schema is static, so a failure here is a bug in
    /// the effect, not a runtime condition.
    pub fn register(&mut self, name: &str, access: Accessor<P>) -> &mut Self {
        if let Err(err) = self.try_register(name, access) {
            panic!("parameter binding failed: {err}");
        }
        self
    }

    /// The parameter struct itself, for bulk reads on the audio thread.
    #[inline]
    pub fn values(&self) -> &P {
        &self.values
    }

    /// The declared schema.
    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        self.schema
    }

    /// Schema entry for `name`, if declared.
    pub fn descriptor(&self, name: &str) -> Option<&'static ParamDescriptor> {
        self.schema.iter().find(|d| d.name == name)
    }

    /// Registered bindings in registration order.
    pub fn bindings(&self) -> &[ParamBinding<P>] {
        &self.bindings
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn binding(&self, name: &str) -> Result<&ParamBinding<P>, ParamError> {
        self.bindings
            .iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| ParamError::NotFound(name.into()))
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Result<ParamValue, ParamError> {
        let binding = self.binding(name)?;
        Ok((binding.access)(&self.values).load())
    }

    /// Current value of `name` as `T`.
    ///
    /// Returns [`ParamError::TypeMismatch`] if `T` is not the bound kind.
    pub fn get_as<T: ParamType>(&self, name: &str) -> Result<T, ParamError> {
        let binding = self.binding(name)?;
        let value = (binding.access)(&self.values).load();
        T::from_value(value).ok_or(ParamError::TypeMismatch {
            name: binding.name(),
            expected: binding.kind(),
            found: T::KIND,
        })
    }

    /// Write `value` to `name`.
    ///
    /// On error nothing is written.
    pub fn set(&self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        let binding = self.binding(name)?;
        let target = (binding.access)(&self.values);
        if !target.store(value) {
            return Err(ParamError::TypeMismatch {
                name: binding.name(),
                expected: binding.kind(),
                found: value.kind(),
            });
        }
        #[cfg(feature = "tracing")]
        tracing::trace!("param_set: {} = {}", binding.name(), value);
        Ok(())
    }

    /// Write a typed value to `name`.
    pub fn set_as<T: ParamType>(&self, name: &str, value: T) -> Result<(), ParamError> {
        self.set(name, value.into_value())
    }

    /// Iterate `(descriptor, current value)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static ParamDescriptor, ParamValue)> + '_ {
        self.bindings
            .iter()
            .map(|b| (b.descriptor, (b.access)(&self.values).load()))
    }

    /// Write every bound parameter's declared default.
    pub fn reset_to_defaults(&self) {
        for binding in &self.bindings {
            (binding.access)(&self.values).store(binding.descriptor.default);
        }
    }
}

impl<P> fmt::Debug for ParamStore<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(d, v)| (d.name, v)))
            .finish()
    }
}
