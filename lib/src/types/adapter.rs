/*! Per-type adapters between host values and native map types.

Every type usable in a map provides three pure functions: a predicate that
decides whether a host [`Value`] is an instance of the type, a decoder from
host value to native representation, and an encoder back into a fresh host
value. The map container and its iterator are generic over these adapters;
the concrete implementations below cover the two supported types, `i32`
(registered as `int32`) and [`BString`] (registered as `string`).
*/

use std::hash::Hash;

use bstr::BString;

use crate::types::Value;

/// A native type that can be stored in a map.
///
/// Adapters have no state; behavior is constant for the whole process.
pub trait MapType: Sized {
    /// Name under which the type is registered, also used in error messages.
    const NAME: &'static str;

    /// Returns true if `value` can be decoded into this type.
    fn is_instance(value: &Value) -> bool;

    /// Decodes a host value into its native representation.
    ///
    /// # Panics
    ///
    /// If `value` does not satisfy [`MapType::is_instance`]. Callers are
    /// expected to check first.
    fn decode(value: &Value) -> Self;

    /// Encodes the native value as a new host value.
    ///
    /// The result never aliases storage owned by a map; strings are copied
    /// out by value.
    fn encode(&self) -> Value;
}

/// A [`MapType`] usable as a map key.
pub trait MapKey: MapType + Eq + Hash + Clone {}

impl<T: MapType + Eq + Hash + Clone> MapKey for T {}

/// A [`MapType`] usable as a map value.
pub trait MapValue: MapType + Clone {}

impl<T: MapType + Clone> MapValue for T {}

impl MapType for i32 {
    const NAME: &'static str = "int32";

    fn is_instance(value: &Value) -> bool {
        match value {
            Value::Integer(n) => i32::try_from(*n).is_ok(),
            // The host's int32 check is value-based: a float qualifies when
            // its value is exactly representable. -0.0 is not; it doesn't
            // survive a round-trip through an integer.
            Value::Float(f) => {
                f.is_finite()
                    && f.fract() == 0.0
                    && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(f)
                    && !(*f == 0.0 && f.is_sign_negative())
            }
            _ => false,
        }
    }

    fn decode(value: &Value) -> Self {
        match value {
            Value::Integer(n) => *n as i32,
            Value::Float(f) => *f as i32,
            _ => panic!(
                "called `decode` for `int32` on a value that is not an int32, it is: {value:?}"
            ),
        }
    }

    fn encode(&self) -> Value {
        Value::Integer(i64::from(*self))
    }
}

impl MapType for BString {
    const NAME: &'static str = "string";

    fn is_instance(value: &Value) -> bool {
        matches!(value, Value::String(_))
    }

    fn decode(value: &Value) -> Self {
        match value {
            Value::String(s) => s.clone(),
            _ => panic!(
                "called `decode` for `string` on a value that is not a string, it is: {value:?}"
            ),
        }
    }

    fn encode(&self) -> Value {
        Value::String(self.clone())
    }
}
