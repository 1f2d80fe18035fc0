/*! Host-facing value representation.

The map engine is driven with [`Value`], a dynamic rendition of the scalar
values found in the host environment the maps are exposed to. A [`Value`]
carries its own type, queryable as a [`Type`], which is what the adapters
check before an operation is allowed to touch a map.
*/

use std::fmt::{Debug, Display, Formatter};

use bstr::BString;
use serde::{Deserialize, Serialize};

pub use adapter::MapKey;
pub use adapter::MapType;
pub use adapter::MapValue;

mod adapter;

/// The type of a host [`Value`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// The host's "no value".
    Null,
    /// A boolean.
    Bool,
    /// An integral number.
    Integer,
    /// A floating-point number.
    Float,
    /// A string.
    String,
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Debug for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A value exchanged with the host environment.
///
/// Strings are owned byte sequences, UTF-8 by convention. Numbers keep the
/// host's distinction between integral and floating-point values; the
/// adapters decide which of them qualify for a given map type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The host's "no value".
    Null,
    /// A boolean.
    Bool(bool),
    /// An integral number.
    Integer(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(BString),
}

impl Value {
    /// Returns the type of the value.
    pub fn ty(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Bool(_) => Type::Bool,
            Self::Integer(_) => Type::Integer,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::String,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(BString::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::String(BString::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(BString::from(value))
    }
}

impl From<BString> for Value {
    fn from(value: BString) -> Self {
        Self::String(value)
    }
}
