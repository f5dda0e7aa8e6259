//! # Typed argument cells carried by a diagnostic.
//!
//! [`Argument`] is a closed sum type holding exactly one value, selected at
//! construction and immutable thereafter. Accessors are partial: asking for
//! a variant other than the active one yields `None`, never a coercion.
//!
//! Cells are plain values, cheap to move and relocatable, so a record can
//! store its argument list contiguously.
//!
//! ## Example
//! ```
//! use diagvisor::Argument;
//!
//! let cell = Argument::from(10.5f32);
//! assert_eq!(cell.as_float(), Some(10.5));
//! assert_eq!(cell.as_signed(), None); // no cross-variant coercion
//! ```

use std::fmt;
use std::sync::Arc;

/// Discriminant of an [`Argument`] cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// A signed 32-bit integer.
    SignedInteger,
    /// An unsigned 32-bit integer.
    UnsignedInteger,
    /// A single-precision float.
    Float,
    /// A double-precision float.
    Double,
    /// An extended-precision float (f64-backed).
    ExtendedFloat,
    /// A shared string.
    String,
}

/// One typed argument of a diagnostic.
///
/// The string variant holds an `Arc<str>`: the cell shares ownership of the
/// text instead of borrowing it, so records stay free of lifetimes.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    /// Signed 32-bit integer value.
    SignedInteger(i32),
    /// Unsigned 32-bit integer value.
    UnsignedInteger(u32),
    /// Single-precision float value.
    Float(f32),
    /// Double-precision float value.
    Double(f64),
    /// Extended-precision float value.
    ///
    /// Stored as `f64`; a separate variant so producers can mark a value as
    /// extended-precision even though the storage width matches
    /// [`Argument::Double`]. Only reachable through [`Argument::extended`].
    ExtendedFloat(f64),
    /// Shared string value.
    String(Arc<str>),
}

impl Argument {
    /// Creates an extended-precision float cell.
    ///
    /// `f64` converts to [`Argument::Double`] via `From`; this is the only
    /// way to select the extended variant.
    pub fn extended(value: f64) -> Self {
        Argument::ExtendedFloat(value)
    }

    /// Returns the discriminant of the active variant.
    pub fn kind(&self) -> ArgumentKind {
        match self {
            Argument::SignedInteger(_) => ArgumentKind::SignedInteger,
            Argument::UnsignedInteger(_) => ArgumentKind::UnsignedInteger,
            Argument::Float(_) => ArgumentKind::Float,
            Argument::Double(_) => ArgumentKind::Double,
            Argument::ExtendedFloat(_) => ArgumentKind::ExtendedFloat,
            Argument::String(_) => ArgumentKind::String,
        }
    }

    /// The signed integer value, if that is the active variant.
    pub fn as_signed(&self) -> Option<i32> {
        match self {
            Argument::SignedInteger(value) => Some(*value),
            _ => None,
        }
    }

    /// The unsigned integer value, if that is the active variant.
    pub fn as_unsigned(&self) -> Option<u32> {
        match self {
            Argument::UnsignedInteger(value) => Some(*value),
            _ => None,
        }
    }

    /// The float value, if that is the active variant.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Argument::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The double value, if that is the active variant.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Argument::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// The extended-precision value, if that is the active variant.
    pub fn as_extended(&self) -> Option<f64> {
        match self {
            Argument::ExtendedFloat(value) => Some(*value),
            _ => None,
        }
    }

    /// The string value, if that is the active variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::String(value) => Some(value.as_ref()),
            _ => None,
        }
    }
}

impl From<i32> for Argument {
    fn from(value: i32) -> Self {
        Argument::SignedInteger(value)
    }
}

impl From<u32> for Argument {
    fn from(value: u32) -> Self {
        Argument::UnsignedInteger(value)
    }
}

impl From<f32> for Argument {
    fn from(value: f32) -> Self {
        Argument::Float(value)
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Double(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::String(Arc::from(value))
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::String(Arc::from(value))
    }
}

impl From<Arc<str>> for Argument {
    fn from(value: Arc<str>) -> Self {
        Argument::String(value)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::SignedInteger(value) => write!(f, "{value}"),
            Argument::UnsignedInteger(value) => write!(f, "{value}"),
            Argument::Float(value) => write!(f, "{value}"),
            Argument::Double(value) => write!(f, "{value}"),
            Argument::ExtendedFloat(value) => write!(f, "{value}"),
            Argument::String(value) => write!(f, "{value:?}"),
        }
    }
}
