/*! A typed key-value map engine with dynamically type-checked host values.

This crate implements a mutable hash map parameterized over a small closed
set of key and value types: 32-bit signed integers and UTF-8 strings. The
four (key, value) combinations are registered in a two-level [`Registry`]
keyed by type name, and every instance is handed to the host environment as
an opaque handle implementing the [`Map`] trait.

Operations are driven with [`Value`], a dynamic rendition of the host
environment's scalar values. Each operation validates its arguments against
the per-type adapters before touching the store, so a type error can never
corrupt a map.

# Example

```rust
use hashmap_x::{Map, Registry, Value};

// Build the registry holding the four constructible map types.
let registry = Registry::new();

// Construct a map with int32 keys and string values.
let mut map = registry.new_map("int32", "string").unwrap();

map.put(&Value::Integer(1), &Value::from("fee")).unwrap();

assert_eq!(map.get(&Value::Integer(1)).unwrap(), Some(Value::from("fee")));
assert_eq!(map.get(&Value::Integer(2)).unwrap(), None);

// Type checks happen on every operation.
assert!(map.put(&Value::from("1"), &Value::from("fi")).is_err());
```
*/

#![deny(missing_docs)]

pub use map::Map;
pub use map::MapError;
pub use map::MapIter;
pub use map::TypedMap;
pub use map::TypedMapIter;

pub use registry::Int32Int32Map;
pub use registry::Int32StringMap;
pub use registry::MapConstructor;
pub use registry::Namespace;
pub use registry::Registry;
pub use registry::StringInt32Map;
pub use registry::StringStringMap;

pub use types::MapKey;
pub use types::MapType;
pub use types::MapValue;
pub use types::Type;
pub use types::Value;

mod map;
mod registry;
mod types;

#[cfg(test)]
mod tests;
