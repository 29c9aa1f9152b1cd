//! Ordered map type for document objects.
//!
//! This module provides [`DottedMap`], a wrapper around [`IndexMap`] that keeps
//! insertion order for object fields. Order matters here: flattening walks keys
//! in document order, so a document read from JSON produces its lines in the
//! order the fields were written, and unflattening rebuilds siblings in the
//! order their lines appear.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotted::{DottedMap, DottedValue};
//!
//! let mut map = DottedMap::new();
//! map.insert("name".to_string(), DottedValue::from("Alice"));
//! map.insert("age".to_string(), DottedValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::DottedValue;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered map of string segments to document values.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{DottedMap, DottedValue};
///
/// let mut map = DottedMap::new();
/// map.insert("first".to_string(), DottedValue::from(1));
/// map.insert("second".to_string(), DottedValue::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DottedMap(IndexMap<String, DottedValue>);

impl DottedMap {
    /// Creates an empty `DottedMap`.
    #[must_use]
    pub fn new() -> Self {
        DottedMap(IndexMap::new())
    }

    /// Creates an empty `DottedMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DottedMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the key keeps its position and
    /// the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{DottedMap, DottedValue};
    ///
    /// let mut map = DottedMap::new();
    /// assert!(map.insert("key".to_string(), DottedValue::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), DottedValue::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: DottedValue) -> Option<DottedValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DottedValue> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DottedValue> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map holds `key` at this level.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key` and returns its value, keeping the order of the remaining entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{DottedMap, DottedValue};
    ///
    /// let mut map: DottedMap = [("a", 1), ("b", 2), ("c", 3)]
    ///     .into_iter()
    ///     .map(|(k, v)| (k.to_string(), DottedValue::from(v)))
    ///     .collect();
    /// map.remove("b");
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec!["a", "c"]);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<DottedValue> {
        self.0.shift_remove(key)
    }

    /// Gets the entry for `key` for in-place manipulation.
    pub fn entry(&mut self, key: String) -> indexmap::map::Entry<'_, String, DottedValue> {
        self.0.entry(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, DottedValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, DottedValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, DottedValue> {
        self.0.iter()
    }
}

impl Default for DottedMap {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for DottedMap {
    type Item = (String, DottedValue);
    type IntoIter = indexmap::map::IntoIter<String, DottedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DottedMap {
    type Item = (&'a String, &'a DottedValue);
    type IntoIter = indexmap::map::Iter<'a, String, DottedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, DottedValue)> for DottedMap {
    fn from_iter<T: IntoIterator<Item = (String, DottedValue)>>(iter: T) -> Self {
        DottedMap(IndexMap::from_iter(iter))
    }
}

impl Serialize for DottedMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DottedMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct DottedMapVisitor;

        impl<'de> Visitor<'de> for DottedMapVisitor {
            type Value = DottedMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with string keys")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = DottedMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, DottedValue>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(DottedMapVisitor)
    }
}
