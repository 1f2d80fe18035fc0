/*! The map type registry.

The host environment constructs maps by type name: a first-level namespace
selected by key type, and inside it one constructor per value type. The
four supported combinations are `{"int32","string"} × {"int32","string"}`.

The registry is an explicit, process-local value built once by
[`Registry::new`], typically at host-binding-layer initialization, and
constructors are plain function pointers. There is no global registration
state.
*/

use bstr::BString;
use log::debug;
use rustc_hash::FxHashMap;

use crate::map::Map;
use crate::types::{MapKey, MapValue};
use crate::TypedMap;

/// Constructs an empty map of one concrete (key, value) instantiation.
pub type MapConstructor = fn() -> Box<dyn Map>;

/// A map with int32 keys and int32 values.
pub type Int32Int32Map = TypedMap<i32, i32>;

/// A map with int32 keys and string values.
pub type Int32StringMap = TypedMap<i32, BString>;

/// A map with string keys and int32 values.
pub type StringInt32Map = TypedMap<BString, i32>;

/// A map with string keys and string values.
pub type StringStringMap = TypedMap<BString, BString>;

/// The constructors registered under one key-type name.
pub struct Namespace {
    key_type: &'static str,
    constructors: FxHashMap<&'static str, MapConstructor>,
}

impl Namespace {
    fn new<K: MapKey + 'static>() -> Self {
        Self { key_type: K::NAME, constructors: FxHashMap::default() }
    }

    fn register<K, V>(&mut self)
    where
        K: MapKey + 'static,
        V: MapValue + 'static,
    {
        debug!("registering map type `{}` -> `{}`", K::NAME, V::NAME);
        self.constructors.insert(V::NAME, || Box::new(TypedMap::<K, V>::new()));
    }

    /// Name of the key type this namespace was registered under.
    pub fn key_type(&self) -> &'static str {
        self.key_type
    }

    /// Returns the constructor registered under `value_type`, if any.
    pub fn constructor(&self, value_type: &str) -> Option<MapConstructor> {
        self.constructors.get(value_type).copied()
    }

    /// Names of the value types registered in this namespace.
    pub fn value_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }
}

/// The two-level table of constructible map types.
///
/// ```rust
/// # use hashmap_x::{Map, Registry};
/// let registry = Registry::new();
/// let map = registry.new_map("string", "int32").unwrap();
///
/// assert_eq!(map.key_type(), "string");
/// assert_eq!(map.value_type(), "int32");
/// assert!(map.is_empty());
/// ```
pub struct Registry {
    namespaces: FxHashMap<&'static str, Namespace>,
}

impl Registry {
    /// Creates a registry holding the four supported (key, value)
    /// combinations.
    pub fn new() -> Self {
        let mut namespaces = FxHashMap::default();

        let mut ints = Namespace::new::<i32>();
        ints.register::<i32, i32>();
        ints.register::<i32, BString>();
        namespaces.insert(ints.key_type(), ints);

        let mut strings = Namespace::new::<BString>();
        strings.register::<BString, i32>();
        strings.register::<BString, BString>();
        namespaces.insert(strings.key_type(), strings);

        Self { namespaces }
    }

    /// Returns the namespace registered under `key_type`, if any.
    pub fn namespace(&self, key_type: &str) -> Option<&Namespace> {
        self.namespaces.get(key_type)
    }

    /// Constructs an empty map with the given key and value type names.
    ///
    /// Returns `None` when the combination is not one of the four
    /// registered instantiations.
    pub fn new_map(
        &self,
        key_type: &str,
        value_type: &str,
    ) -> Option<Box<dyn Map>> {
        let constructor = self.namespace(key_type)?.constructor(value_type)?;
        Some(constructor())
    }

    /// Names of the key types that have a namespace.
    pub fn key_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.namespaces.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
