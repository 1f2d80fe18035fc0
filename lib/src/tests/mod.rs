/*! End-to-end tests.

The same suite runs for each of the four registered map types, driving them
the way a host binding layer would: constructed by name through the
registry and used through their type-erased handles.
*/

use pretty_assertions::assert_eq;

use crate::types::Value;
use crate::{Map, MapError, MapIter, Registry};

/// Two distinct sample values for a registered type name.
fn samples(type_name: &str) -> [Value; 2] {
    match type_name {
        "int32" => [Value::Integer(0), Value::Integer(1)],
        "string" => [Value::from("fee"), Value::from("fi")],
        _ => panic!("no samples for type `{type_name}`"),
    }
}

/// A value that is an instance of neither registered type.
fn mistyped() -> Value {
    Value::Float(0.5)
}

macro_rules! instantiation_tests {
    ($name:ident, $key_type:literal, $value_type:literal) => {
        mod $name {
            use pretty_assertions::assert_eq;

            use super::{mistyped, samples};
            use crate::{Map, MapError, MapIter, Registry};

            fn new_map() -> Box<dyn Map> {
                Registry::new().new_map($key_type, $value_type).unwrap()
            }

            #[test]
            fn reports_its_types() {
                let map = new_map();
                assert_eq!(map.key_type(), $key_type);
                assert_eq!(map.value_type(), $value_type);
            }

            #[test]
            fn put_get_contains() {
                let [key, missing] = samples($key_type);
                let [value, _] = samples($value_type);
                let mut map = new_map();

                map.put(&key, &value).unwrap();

                assert_eq!(map.get(&key).unwrap(), Some(value));
                assert!(map.contains(&key).unwrap());
                assert!(!map.contains(&missing).unwrap());
                assert_eq!(map.get(&missing).unwrap(), None);
            }

            #[test]
            fn put_keeps_the_first_value() {
                let [key, _] = samples($key_type);
                let [v1, v2] = samples($value_type);
                let mut map = new_map();

                map.put(&key, &v1).unwrap();
                map.put(&key, &v2).unwrap();

                assert_eq!(map.get(&key).unwrap(), Some(v1));
            }

            #[test]
            fn remove() {
                let [key, _] = samples($key_type);
                let [value, _] = samples($value_type);
                let mut map = new_map();

                map.put(&key, &value).unwrap();
                assert!(map.contains(&key).unwrap());

                map.remove(&key).unwrap();
                assert!(!map.contains(&key).unwrap());
            }

            #[test]
            fn size() {
                let [key1, key2] = samples($key_type);
                let [value1, value2] = samples($value_type);
                let mut map = new_map();

                assert_eq!(map.len(), 0);

                map.put(&key1, &value1).unwrap();
                assert_eq!(map.len(), 1);

                map.put(&key2, &value2).unwrap();
                assert_eq!(map.len(), 2);
            }

            #[test]
            fn clear() {
                let [key, _] = samples($key_type);
                let [value, _] = samples($value_type);
                let mut map = new_map();

                assert_eq!(map.len(), 0);

                map.put(&key, &value).unwrap();
                assert_eq!(map.len(), 1);

                map.clear();
                assert_eq!(map.len(), 0);
            }

            #[test]
            fn empty() {
                let [key, _] = samples($key_type);
                let [value, _] = samples($value_type);
                let mut map = new_map();

                assert!(map.is_empty());

                map.put(&key, &value).unwrap();
                assert!(!map.is_empty());
            }

            #[test]
            fn iterator_visits_every_entry_once() {
                let keys = samples($key_type);
                let values = samples($value_type);
                let mut map = new_map();

                map.put(&keys[0], &values[0]).unwrap();
                map.put(&keys[1], &values[1]).unwrap();

                let mut it = map.iter();
                let mut pairs = Vec::new();
                while it.has_next().unwrap() {
                    pairs.push(it.next().unwrap());
                }

                assert_eq!(pairs.len(), 2);
                assert!(pairs.contains(&(keys[0].clone(), values[0].clone())));
                assert!(pairs.contains(&(keys[1].clone(), values[1].clone())));

                assert_eq!(it.has_next(), Ok(false));
                assert_eq!(it.next(), Err(MapError::IteratorExhausted));
            }

            #[test]
            fn mistyped_arguments_are_rejected() {
                let [key, _] = samples($key_type);
                let [value, _] = samples($value_type);
                let mut map = new_map();

                assert!(map.put(&mistyped(), &value).is_err());
                assert!(map.put(&key, &mistyped()).is_err());
                assert!(map.contains(&mistyped()).is_err());
                assert!(map.get(&mistyped()).is_err());
                assert!(map.remove(&mistyped()).is_err());
                assert!(map.is_empty());
            }
        }
    };
}

instantiation_tests!(int32_int32, "int32", "int32");
instantiation_tests!(int32_string, "int32", "string");
instantiation_tests!(string_int32, "string", "int32");
instantiation_tests!(string_string, "string", "string");

#[test]
fn iterator_pairs_match_inserted_entries() {
    let mut map = Registry::new().new_map("int32", "string").unwrap();

    map.put(&Value::Integer(1), &Value::from("a")).unwrap();
    map.put(&Value::Integer(2), &Value::from("b")).unwrap();

    let mut it = map.iter();
    let mut pairs = Vec::new();
    while it.has_next().unwrap() {
        pairs.push(it.next().unwrap());
    }

    assert_eq!(pairs.len(), 2);
    assert!(pairs.contains(&(Value::Integer(1), Value::from("a"))));
    assert!(pairs.contains(&(Value::Integer(2), Value::from("b"))));
    assert_eq!(it.has_next(), Ok(false));
    assert_eq!(it.next(), Err(MapError::IteratorExhausted));
}

#[test]
fn mutation_during_iteration_is_detected_across_handles() {
    let mut map = Registry::new().new_map("string", "string").unwrap();

    map.put(&Value::from("fee"), &Value::from("fi")).unwrap();
    map.put(&Value::from("fo"), &Value::from("fum")).unwrap();

    let mut it = map.iter();
    it.next().unwrap();

    map.remove(&Value::from("fee")).unwrap();

    assert_eq!(it.next(), Err(MapError::IteratorInvalidated));
    assert_eq!(it.has_next(), Err(MapError::IteratorInvalidated));

    // The map itself is unaffected and can produce fresh iterators.
    let mut fresh = map.iter();
    assert_eq!(fresh.has_next(), Ok(true));
    fresh.next().unwrap();
    assert_eq!(fresh.has_next(), Ok(false));
}

#[test]
fn dropping_a_handle_invalidates_its_iterators() {
    let mut map = Registry::new().new_map("int32", "int32").unwrap();

    map.put(&Value::Integer(1), &Value::Integer(10)).unwrap();

    let mut it = map.iter();
    drop(map);

    assert_eq!(it.next(), Err(MapError::IteratorInvalidated));
}
