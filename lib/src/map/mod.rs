/*! The map engine.

[`TypedMap`] is a mutable key-value container generic over two
[`MapType`](crate::MapType) adapters, one for keys and one for values. Every
operation takes host [`Value`]s and validates them against the adapters
before touching the store; validation always precedes mutation, so a failed
operation leaves the map exactly as it was.

The store sits behind `Rc<RefCell<...>>` so that iterators can hold a
[`Weak`](std::rc::Weak) back-reference to it together with a generation
stamp (see [`TypedMapIter`]). The `Rc` never leaves the map; ownership of
the entries stays with the map alone.
*/

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::types::{MapKey, MapValue, Type, Value};

pub use iter::MapIter;
pub use iter::TypedMapIter;

mod iter;


/// Error returned by map and iterator operations.
#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapError {
    /// An argument failed the type check for its position.
    ///
    /// The container state is untouched; the operation can be retried with
    /// a well-typed argument.
    #[error("invalid type for argument {index}, expecting `{expected}`, got `{actual}`")]
    InvalidArgumentType {
        /// Position of the offending argument (0 = key, 1 = value).
        index: usize,
        /// Name of the expected type.
        expected: &'static str,
        /// Type of the value actually received.
        actual: Type,
    },

    /// `next` was called on an iterator with no elements remaining.
    #[error("iterator is exhausted")]
    IteratorExhausted,

    /// The iterator's backing map was mutated, or dropped, after the
    /// iterator was created.
    #[error("iterator was invalidated by a mutation of the underlying map")]
    IteratorInvalidated,
}

/// Type-erased handle to one of the registered map types.
///
/// [`TypedMap`] implements this trait for every (key, value) combination in
/// the [`Registry`](crate::Registry), which hands maps out as
/// `Box<dyn Map>` so the host binding layer can treat all of them
/// uniformly.
pub trait Map {
    /// Name of the key type.
    fn key_type(&self) -> &'static str;

    /// Name of the value type.
    fn value_type(&self) -> &'static str;

    /// Returns true if the map contains `key`.
    fn contains(&self, key: &Value) -> Result<bool, MapError>;

    /// Returns the value mapped to `key`, or `None` if the key is absent.
    fn get(&self, key: &Value) -> Result<Option<Value>, MapError>;

    /// Inserts the (`key`, `value`) pair if `key` is absent.
    fn put(&mut self, key: &Value, value: &Value) -> Result<(), MapError>;

    /// Removes the mapping for `key`, if any.
    fn remove(&mut self, key: &Value) -> Result<(), MapError>;

    /// Removes all entries.
    fn clear(&mut self);

    /// Returns true if the map has no entries.
    fn is_empty(&self) -> bool;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns a new iterator over the map's entries.
    fn iter(&self) -> Box<dyn MapIter>;
}

/// The entries of a [`TypedMap`], plus the generation stamp its iterators
/// are validated against. The stamp moves on every structural change.
pub(crate) struct Store<K, V> {
    pub(crate) entries: IndexMap<K, V>,
    pub(crate) generation: u64,
}

/// A mutable key-value map over native types `K` and `V`, driven with host
/// [`Value`]s.
///
/// Keys are unique. The underlying structure is hash-based and makes no
/// ordering guarantee across iteration; callers must not depend on entry
/// order. An [`IndexMap`] is used instead of a `HashMap` because it also
/// allows getting an item by index, which is what the iterator's cursor
/// needs.
pub struct TypedMap<K: MapKey, V: MapValue> {
    store: Rc<RefCell<Store<K, V>>>,
}

impl<K: MapKey, V: MapValue> TypedMap<K, V> {
    /// Creates a new, empty map.
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(Store {
                entries: IndexMap::new(),
                generation: 0,
            })),
        }
    }

    /// Name of the key type.
    pub fn key_type(&self) -> &'static str {
        K::NAME
    }

    /// Name of the value type.
    pub fn value_type(&self) -> &'static str {
        V::NAME
    }

    /// Checks `key` against the key adapter and decodes it.
    fn decode_key(key: &Value) -> Result<K, MapError> {
        if !K::is_instance(key) {
            return Err(MapError::InvalidArgumentType {
                index: 0,
                expected: K::NAME,
                actual: key.ty(),
            });
        }
        Ok(K::decode(key))
    }

    /// Returns true if the map contains `key`.
    ///
    /// Fails with [`MapError::InvalidArgumentType`] if `key` is not an
    /// instance of the map's key type. No side effects.
    pub fn contains(&self, key: &Value) -> Result<bool, MapError> {
        let key = Self::decode_key(key)?;
        Ok(self.store.borrow().entries.contains_key(&key))
    }

    /// Returns the value mapped to `key`, encoded as a fresh host value,
    /// or `None` if the key is absent.
    ///
    /// `None` is distinguishable from every valid encoded value, including
    /// integer `0` and the empty string.
    pub fn get(&self, key: &Value) -> Result<Option<Value>, MapError> {
        let key = Self::decode_key(key)?;
        Ok(self.store.borrow().entries.get(&key).map(V::encode))
    }

    /// Inserts the (`key`, `value`) pair if `key` is absent.
    ///
    /// A put on a present key is a no-op that leaves the existing value in
    /// place. Both arguments are validated before the store is touched;
    /// the key is reported as argument 0 and the value as argument 1.
    pub fn put(&mut self, key: &Value, value: &Value) -> Result<(), MapError> {
        let key = Self::decode_key(key)?;
        if !V::is_instance(value) {
            return Err(MapError::InvalidArgumentType {
                index: 1,
                expected: V::NAME,
                actual: value.ty(),
            });
        }
        let mut store = self.store.borrow_mut();
        if !store.entries.contains_key(&key) {
            store.entries.insert(key, V::decode(value));
            store.generation += 1;
        }
        Ok(())
    }

    /// Removes the mapping for `key`, if any.
    ///
    /// Removing an absent key succeeds silently.
    pub fn remove(&mut self, key: &Value) -> Result<(), MapError> {
        let key = Self::decode_key(key)?;
        let mut store = self.store.borrow_mut();
        // Entry order is unspecified, so the cheaper swap variant will do.
        if store.entries.swap_remove(&key).is_some() {
            store.generation += 1;
        }
        Ok(())
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        let mut store = self.store.borrow_mut();
        if !store.entries.is_empty() {
            store.entries.clear();
            store.generation += 1;
        }
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.store.borrow().entries.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.store.borrow().entries.len()
    }

    /// Returns a new iterator over the map's entries.
    ///
    /// Every call produces an independent iterator; simultaneous iterators
    /// over the same map don't interfere with each other.
    pub fn iter(&self) -> TypedMapIter<K, V> {
        TypedMapIter::new(&self.store)
    }
}

impl<K: MapKey, V: MapValue> Default for TypedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Map for TypedMap<K, V>
where
    K: MapKey + 'static,
    V: MapValue + 'static,
{
    fn key_type(&self) -> &'static str {
        TypedMap::key_type(self)
    }

    fn value_type(&self) -> &'static str {
        TypedMap::value_type(self)
    }

    fn contains(&self, key: &Value) -> Result<bool, MapError> {
        TypedMap::contains(self, key)
    }

    fn get(&self, key: &Value) -> Result<Option<Value>, MapError> {
        TypedMap::get(self, key)
    }

    fn put(&mut self, key: &Value, value: &Value) -> Result<(), MapError> {
        TypedMap::put(self, key, value)
    }

    fn remove(&mut self, key: &Value) -> Result<(), MapError> {
        TypedMap::remove(self, key)
    }

    fn clear(&mut self) {
        TypedMap::clear(self)
    }

    fn is_empty(&self) -> bool {
        TypedMap::is_empty(self)
    }

    fn len(&self) -> usize {
        TypedMap::len(self)
    }

    fn iter(&self) -> Box<dyn MapIter> {
        Box::new(TypedMap::iter(self))
    }
}
