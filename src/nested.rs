//! A map addressed by dotted paths.
//!
//! [`NestedMap`] stores an ordinary tree of [`DottedMap`] branches but accepts a
//! single string key whose segments are joined by a separator. `a.b.c` walks
//! (or creates) the branches `a` and `b` and addresses the entry `c` inside
//! them.
//!
//! ```rust
//! use serde_dotted::{dotted, NestedMap};
//!
//! let mut map = NestedMap::new();
//! map.set("a.b.c", 1);
//! assert!(map.contains("a.b"));
//! assert_eq!(map.get("a.b.c").unwrap(), &dotted!(1));
//! assert_eq!(map.get("a.b").unwrap(), &dotted!({ "c": 1 }));
//! ```
//!
//! Assignments overwrite whatever node type they meet: setting a leaf where a
//! branch was drops the branch, and setting below a leaf replaces the leaf
//! with a fresh branch. Deleting never prunes emptied ancestors.

use crate::error::STRING_KEY;
use crate::flatten::{flatten, Flatten};
use crate::options::DEFAULT_SEPARATOR;
use crate::{DottedMap, DottedValue, Error, Number, Result};
use serde::de::Unexpected;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered map whose keys are dotted paths.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedMap {
    root: DottedMap,
    separator: String,
}

impl NestedMap {
    /// Creates an empty map using the `.` separator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Creates an empty map splitting keys on `separator`.
    ///
    /// An empty separator disables splitting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::NestedMap;
    ///
    /// let mut map = NestedMap::with_separator("/");
    /// map.set("a/b", "x");
    /// assert!(map.contains("a"));
    /// assert!(!map.contains("a.b"));
    /// ```
    #[must_use]
    pub fn with_separator(separator: impl Into<String>) -> Self {
        NestedMap {
            root: DottedMap::new(),
            separator: separator.into(),
        }
    }

    /// Builds a map from a dynamic source, see [`NestedMap::update`].
    ///
    /// # Errors
    ///
    /// Fails on the first entry whose key is not a string, on a malformed pair,
    /// or when `source` is neither null, an object, nor an array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{dotted, NestedMap};
    ///
    /// let map = NestedMap::from_value(dotted!({ "a.b.c": 1, "x.y.z": 2 })).unwrap();
    /// assert_eq!(map.into_value(), dotted!({
    ///     "a": { "b": { "c": 1 } },
    ///     "x": { "y": { "z": 2 } }
    /// }));
    ///
    /// assert!(NestedMap::from_value(dotted!([[7, 1], ["b", 2]])).is_err());
    /// ```
    pub fn from_value(source: DottedValue) -> Result<Self> {
        let mut map = NestedMap::new();
        map.update(source, std::iter::empty::<(String, DottedValue)>())?;
        Ok(map)
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    fn segments<'k>(&self, key: &'k str) -> Vec<&'k str> {
        if self.separator.is_empty() {
            vec![key]
        } else {
            key.split(self.separator.as_str()).collect()
        }
    }

    fn find(&self, key: &str) -> Option<&DottedValue> {
        let segments = self.segments(key);
        let (last, parents) = segments.split_last()?;
        let mut current = &self.root;
        for segment in parents {
            current = current.get(segment)?.as_object()?;
        }
        current.get(last)
    }

    fn parent_mut<'k>(&mut self, key: &'k str) -> Option<(&mut DottedMap, &'k str)> {
        let segments = self.segments(key);
        let (last, parents) = segments.split_last()?;
        let mut current = &mut self.root;
        for segment in parents {
            current = current.get_mut(segment)?.as_object_mut()?;
        }
        Some((current, *last))
    }

    /// Returns `true` if every segment of `key` exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{dotted, NestedMap};
    ///
    /// let map = NestedMap::from_value(dotted!({ "a": { "b": 1 } })).unwrap();
    /// assert!(map.contains("a"));
    /// assert!(map.contains("a.b"));
    /// assert!(!map.contains("a.z"));
    /// assert!(!map.contains("a.b.c"));
    /// ```
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Returns the value at `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if a segment is missing at any depth, or an
    /// intermediate segment holds a leaf.
    pub fn get(&self, key: &str) -> Result<&DottedValue> {
        self.find(key).ok_or_else(|| Error::key_not_found(key))
    }

    /// Returns a mutable reference to the value at `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] under the same conditions as [`NestedMap::get`].
    pub fn get_mut(&mut self, key: &str) -> Result<&mut DottedValue> {
        match self.parent_mut(key) {
            Some((parent, last)) => parent
                .get_mut(last)
                .ok_or_else(|| Error::key_not_found(key)),
            None => Err(Error::key_not_found(key)),
        }
    }

    /// Returns the value at `key`, or `default` when the path is missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{dotted, DottedValue, NestedMap};
    ///
    /// let map = NestedMap::from_value(dotted!({ "a": { "b": 1 } })).unwrap();
    /// let fallback = DottedValue::from(20);
    /// assert_eq!(map.get_or("z", &fallback), &fallback);
    /// assert_eq!(map.get_or("a.b", &fallback), &DottedValue::from(1));
    /// ```
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a DottedValue) -> &'a DottedValue {
        self.find(key).unwrap_or(default)
    }

    /// Assigns `value` at `key`, creating branches as needed, and returns the
    /// value previously stored at the final segment.
    ///
    /// An intermediate segment holding a leaf is replaced by an empty branch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{dotted, NestedMap};
    ///
    /// let mut map = NestedMap::new();
    /// map.set("a", 1);
    /// map.set("a.b", 2);
    /// assert_eq!(map.into_value(), dotted!({ "a": { "b": 2 } }));
    /// ```
    pub fn set(&mut self, key: &str, value: impl Into<DottedValue>) -> Option<DottedValue> {
        let segments = self.segments(key);
        let (last, parents) = segments.split_last()?;
        let mut current = &mut self.root;
        for segment in parents {
            current = descend(current, segment);
        }
        current.insert((*last).to_string(), value.into())
    }

    /// Removes the node at `key` and returns it. Ancestors are left in place,
    /// even when they become empty.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the path does not exist.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::NestedMap;
    ///
    /// let mut map = NestedMap::new();
    /// map.set("a.b.c", 1);
    /// map.delete("a.b.c").unwrap();
    /// assert!(map.contains("a.b"));
    /// assert!(!map.contains("a.b.c"));
    /// ```
    pub fn delete(&mut self, key: &str) -> Result<DottedValue> {
        match self.parent_mut(key) {
            Some((parent, last)) => parent.remove(last).ok_or_else(|| Error::key_not_found(key)),
            None => Err(Error::key_not_found(key)),
        }
    }

    /// Removes and returns the node at `key`, or returns `default` when the
    /// path is missing.
    pub fn pop(&mut self, key: &str, default: DottedValue) -> DottedValue {
        self.delete(key).unwrap_or(default)
    }

    /// Removes the node at `key` and returns it together with the key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the path does not exist.
    pub fn pop_item(&mut self, key: &str) -> Result<(String, DottedValue)> {
        let value = self.delete(key)?;
        Ok((key.to_string(), value))
    }

    /// Merges entries into the map with [`NestedMap::set`] semantics, so dotted
    /// keys are expanded.
    ///
    /// `source` is applied first: `Null` contributes nothing, an `Object`
    /// contributes its entries, and an `Array` must hold `[key, value]` pairs.
    /// `extra` pairs are applied afterwards. Entries are checked one at a time;
    /// those applied before a failing entry stay applied.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKey`] for a pair whose key is not a string
    /// - [`Error::InvalidEntry`] for an array element that is not a pair
    /// - [`Error::InvalidSource`] for any other kind of `source`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::{dotted, NestedMap};
    ///
    /// let mut map = NestedMap::from_value(dotted!({ "a": 1, "b": 2 })).unwrap();
    /// map.update(dotted!([["c.d", 3]]), [("w", 10), ("x", 11)]).unwrap();
    /// assert_eq!(map.len(), 5);
    /// assert_eq!(map.get("c.d").unwrap(), &dotted!(3));
    /// assert_eq!(map.get("x").unwrap(), &dotted!(11));
    /// ```
    pub fn update<I, K, V>(&mut self, source: DottedValue, extra: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DottedValue>,
    {
        match source {
            DottedValue::Null => {}
            DottedValue::Object(map) => self.insert_pairs(map.into_iter().map(Ok))?,
            DottedValue::Array(items) => self.insert_pairs(items.into_iter().map(into_pair))?,
            other => return Err(Error::invalid_source(other)),
        }
        self.insert_pairs(extra.into_iter().map(|(k, v)| Ok((k.into(), v.into()))))
    }

    fn insert_pairs<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<(String, DottedValue)>>,
    {
        for pair in pairs {
            let (key, value) = pair?;
            self.set(&key, value);
        }
        Ok(())
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Iterates over the top-level entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, DottedValue> {
        self.root.iter()
    }

    #[must_use]
    pub fn as_map(&self) -> &DottedMap {
        &self.root
    }

    #[must_use]
    pub fn into_map(self) -> DottedMap {
        self.root
    }

    #[must_use]
    pub fn into_value(self) -> DottedValue {
        DottedValue::Object(self.root)
    }

    /// Flattens the map into `path="value"` lines using its own separator.
    pub fn flatten(&self) -> Flatten<'_> {
        flatten(&self.root, &self.separator)
    }
}

/// Returns the branch stored under `segment`, replacing a missing or leaf node
/// with an empty branch.
fn descend<'m>(map: &'m mut DottedMap, segment: &str) -> &'m mut DottedMap {
    let slot = map
        .entry(segment.to_string())
        .or_insert_with(|| DottedValue::Object(DottedMap::new()));
    if slot.is_leaf() {
        tracing::trace!(segment, replaced = slot.kind(), "replacing leaf with a branch");
        *slot = DottedValue::Object(DottedMap::new());
    }
    match slot {
        DottedValue::Object(branch) => branch,
        _ => unreachable!("slot holds a branch after replacement"),
    }
}

fn unexpected(value: &DottedValue) -> Unexpected<'_> {
    match value {
        DottedValue::Null => Unexpected::Unit,
        DottedValue::Bool(b) => Unexpected::Bool(*b),
        DottedValue::Number(Number::Integer(i)) => Unexpected::Signed(*i),
        DottedValue::Number(Number::Unsigned(u)) => Unexpected::Unsigned(*u),
        DottedValue::Number(Number::Float(f)) => Unexpected::Float(*f),
        DottedValue::Number(Number::Big(_)) => Unexpected::Other("wide integer"),
        DottedValue::String(s) => Unexpected::Str(s),
        DottedValue::Array(_) => Unexpected::Seq,
        DottedValue::Object(_) => Unexpected::Map,
    }
}

fn into_pair(item: DottedValue) -> Result<(String, DottedValue)> {
    match item {
        DottedValue::Array(pair) if pair.len() == 2 => {
            let mut pair = pair.into_iter();
            match (pair.next(), pair.next()) {
                (Some(DottedValue::String(key)), Some(value)) => Ok((key, value)),
                (Some(key), _) => Err(Error::invalid_key(key)),
                _ => Err(Error::invalid_entry("[]")),
            }
        }
        other => Err(Error::invalid_entry(other)),
    }
}

impl Default for NestedMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<DottedMap> for NestedMap {
    fn from(map: DottedMap) -> Self {
        let mut nested = NestedMap::new();
        nested.extend(map);
        nested
    }
}

impl TryFrom<DottedValue> for NestedMap {
    type Error = Error;

    fn try_from(value: DottedValue) -> Result<Self> {
        NestedMap::from_value(value)
    }
}

impl From<NestedMap> for DottedValue {
    fn from(map: NestedMap) -> Self {
        map.into_value()
    }
}

impl<K, V> Extend<(K, V)> for NestedMap
where
    K: Into<String>,
    V: Into<DottedValue>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            let key: String = key.into();
            self.set(&key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for NestedMap
where
    K: Into<String>,
    V: Into<DottedValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = NestedMap::new();
        map.extend(iter);
        map
    }
}

impl Serialize for NestedMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NestedMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct NestedMapVisitor;

        impl<'de> Visitor<'de> for NestedMapVisitor {
            type Value = NestedMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with string keys")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = NestedMap::new();
                while let Some((key, value)) = access.next_entry::<DottedValue, DottedValue>()? {
                    match key {
                        DottedValue::String(key) => {
                            map.set(&key, value);
                        }
                        other => {
                            return Err(de::Error::invalid_type(unexpected(&other), &STRING_KEY))
                        }
                    }
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(NestedMapVisitor)
    }
}
