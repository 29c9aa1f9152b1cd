//! Dynamic value representation for documents.
//!
//! This module provides the [`DottedValue`] enum, the node type of every tree
//! handled by this crate. [`DottedValue::Object`] is a *branch*; every other
//! variant is a *leaf*.
//!
//! Leaves read back from dotted text are always [`DottedValue::String`]: the
//! line format carries no type information, so `a="1"` yields the string `"1"`
//! even when the document that produced it held the integer `1`. Typed
//! deserialization ([`crate::from_value`], [`crate::from_str`]) parses such
//! strings on demand.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_dotted::{dotted, DottedValue};
//!
//! let null = DottedValue::Null;
//! let number = DottedValue::from(42);
//! let text = DottedValue::from("hello");
//!
//! let obj = dotted!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ## Rendering Leaves
//!
//! The [`Display`](std::fmt::Display) implementation is the leaf rendering used
//! on every flattened line:
//!
//! ```rust
//! use serde_dotted::{dotted, DottedValue};
//!
//! assert_eq!(DottedValue::from("plain").to_string(), "plain");
//! assert_eq!(DottedValue::from(2.0).to_string(), "2.0");
//! assert_eq!(DottedValue::Null.to_string(), "null");
//! assert_eq!(dotted!([1, "x", true]).to_string(), r#"[1,"x",true]"#);
//! ```

use crate::DottedMap;
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Map key serde_json uses to hand over the exact text of a number.
const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// A dynamically-typed document node.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::{DottedValue, Number};
///
/// let null = DottedValue::Null;
/// let num = DottedValue::Number(Number::Integer(42));
/// let text = DottedValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_leaf());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum DottedValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<DottedValue>),
    Object(DottedMap),
}

/// A numeric leaf.
///
/// Integers keep every digit: values that fit in `i64` are [`Number::Integer`],
/// larger positive values up to `u64::MAX` are [`Number::Unsigned`], and
/// anything wider is [`Number::Big`].
///
/// # Examples
///
/// ```rust
/// use serde_dotted::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// assert_eq!(Number::from(u64::MAX).to_string(), "18446744073709551615");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Big(BigInt),
    Float(f64),
}

impl Number {
    /// Returns `true` for any integer variant.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        !matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if possible.
    ///
    /// Returns `Some(i64)` for integers in range and for floats with no
    /// fractional part that fit in i64 range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// assert_eq!(Number::from(u64::MAX).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Unsigned(u) => i64::try_from(*u).ok(),
            Number::Big(big) => i64::try_from(big).ok(),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`, rounding wide integers.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Unsigned(u) => *u as f64,
            Number::Big(big) => big.to_string().parse().unwrap_or(f64::NAN),
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Big(big) => write!(f, "{}", big),
            // Whole floats keep a fractional digit so they stay distinguishable from integers.
            Number::Float(fl) if fl.is_finite() && fl.fract() == 0.0 && fl.abs() < 1e16 => {
                write!(f, "{:.1}", fl)
            }
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// Parses number text, keeping every digit of an integer.
///
/// # Examples
///
/// ```rust
/// use serde_dotted::Number;
///
/// let n: Number = "123456789012345678901234567890".parse().unwrap();
/// assert_eq!(n.to_string(), "123456789012345678901234567890");
/// assert_eq!("2.5".parse::<Number>().unwrap(), Number::Float(2.5));
/// assert!("12abc".parse::<Number>().is_err());
/// ```
impl FromStr for Number {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let mismatch = || crate::Error::type_mismatch("number", s);
        if s.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
            return s.parse().map(Number::Float).map_err(|_| mismatch());
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Number::Integer(i));
        }
        if let Ok(u) = s.parse::<u64>() {
            return Ok(Number::Unsigned(u));
        }
        s.parse::<BigInt>().map(Number::Big).map_err(|_| mismatch())
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::Unsigned(value),
        }
    }
}

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        if let Ok(i) = i64::try_from(value) {
            Number::Integer(i)
        } else if let Ok(u) = u64::try_from(value) {
            Number::Unsigned(u)
        } else {
            Number::Big(BigInt::from(value))
        }
    }
}

impl From<u128> for Number {
    fn from(value: u128) -> Self {
        match u64::try_from(value) {
            Ok(u) => Number::from(u),
            Err(_) => Number::Big(BigInt::from(value)),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Integer(i) => serializer.serialize_i64(*i),
            Number::Unsigned(u) => serializer.serialize_u64(*u),
            Number::Big(big) => {
                if let Ok(i) = i128::try_from(big) {
                    serializer.serialize_i128(i)
                } else if let Ok(u) = u128::try_from(big) {
                    serializer.serialize_u128(u)
                } else {
                    serializer.serialize_str(&big.to_string())
                }
            }
            Number::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl DottedValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, DottedValue::Null)
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, DottedValue::Number(_))
    }

    /// Returns `true` if the value is an object (a branch).
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, DottedValue::Object(_))
    }

    /// Returns `true` if the value is a leaf, i.e. anything but an object.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !self.is_object()
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotted::DottedValue;
    ///
    /// assert_eq!(DottedValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(DottedValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DottedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an i64 integer or a whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DottedValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<DottedValue>> {
        match self {
            DottedValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&DottedMap> {
        match self {
            DottedValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// If the value is an object, returns a mutable reference to it.
    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut DottedMap> {
        match self {
            DottedValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            DottedValue::Null => "null",
            DottedValue::Bool(_) => "bool",
            DottedValue::Number(_) => "number",
            DottedValue::String(_) => "string",
            DottedValue::Array(_) => "array",
            DottedValue::Object(_) => "object",
        }
    }
}

impl fmt::Display for DottedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DottedValue::Null => write!(f, "null"),
            DottedValue::Bool(b) => write!(f, "{}", b),
            DottedValue::Number(n) => write!(f, "{}", n),
            DottedValue::String(s) => write!(f, "{}", s),
            DottedValue::Array(_) | DottedValue::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl Serialize for DottedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DottedValue::Null => serializer.serialize_unit(),
            DottedValue::Bool(b) => serializer.serialize_bool(*b),
            DottedValue::Number(n) => n.serialize(serializer),
            DottedValue::String(s) => serializer.serialize_str(s),
            DottedValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            DottedValue::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for DottedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DottedValueVisitor;

        impl<'de> Visitor<'de> for DottedValueVisitor {
            type Value = DottedValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid document value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(DottedValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(DottedValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(DottedValue::Number(Number::from(value)))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(DottedValue::Number(Number::from(value)))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(DottedValue::Number(Number::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(DottedValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(DottedValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(DottedValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(DottedValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(DottedValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(DottedValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = DottedMap::new();
                if let Some(key) = map.next_key::<String>()? {
                    if key == JSON_NUMBER_TOKEN {
                        let text: String = map.next_value()?;
                        return text
                            .parse()
                            .map(DottedValue::Number)
                            .map_err(de::Error::custom);
                    }
                    values.insert(key, map.next_value()?);
                }
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(DottedValue::Object(values))
            }
        }

        deserializer.deserialize_any(DottedValueVisitor)
    }
}

impl TryFrom<DottedValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: DottedValue) -> crate::Result<Self> {
        match value {
            DottedValue::Number(n) => n
                .as_i64()
                .ok_or_else(|| crate::Error::type_mismatch("i64", &n.to_string())),
            DottedValue::String(s) => s
                .trim()
                .parse()
                .map_err(|_| crate::Error::type_mismatch("i64", &s)),
            other => Err(crate::Error::type_mismatch("i64", other.kind())),
        }
    }
}

impl TryFrom<DottedValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: DottedValue) -> crate::Result<Self> {
        match value {
            DottedValue::Number(n) => Ok(n.as_f64()),
            DottedValue::String(s) => s
                .trim()
                .parse()
                .map_err(|_| crate::Error::type_mismatch("f64", &s)),
            other => Err(crate::Error::type_mismatch("f64", other.kind())),
        }
    }
}

impl TryFrom<DottedValue> for bool {
    type Error = crate::Error;

    fn try_from(value: DottedValue) -> crate::Result<Self> {
        match value {
            DottedValue::Bool(b) => Ok(b),
            DottedValue::String(s) => match s.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(crate::Error::type_mismatch("bool", &s)),
            },
            other => Err(crate::Error::type_mismatch("bool", other.kind())),
        }
    }
}

impl TryFrom<DottedValue> for String {
    type Error = crate::Error;

    fn try_from(value: DottedValue) -> crate::Result<Self> {
        match value {
            DottedValue::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.kind())),
        }
    }
}

impl From<bool> for DottedValue {
    fn from(value: bool) -> Self {
        DottedValue::Bool(value)
    }
}

impl From<i32> for DottedValue {
    fn from(value: i32) -> Self {
        DottedValue::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for DottedValue {
    fn from(value: i64) -> Self {
        DottedValue::Number(Number::Integer(value))
    }
}

impl From<u32> for DottedValue {
    fn from(value: u32) -> Self {
        DottedValue::Number(Number::Integer(value as i64))
    }
}

impl From<u64> for DottedValue {
    fn from(value: u64) -> Self {
        DottedValue::Number(Number::from(value))
    }
}

impl From<f64> for DottedValue {
    fn from(value: f64) -> Self {
        DottedValue::Number(Number::Float(value))
    }
}

impl From<Number> for DottedValue {
    fn from(value: Number) -> Self {
        DottedValue::Number(value)
    }
}

impl From<String> for DottedValue {
    fn from(value: String) -> Self {
        DottedValue::String(value)
    }
}

impl From<&str> for DottedValue {
    fn from(value: &str) -> Self {
        DottedValue::String(value.to_string())
    }
}

impl From<Vec<DottedValue>> for DottedValue {
    fn from(value: Vec<DottedValue>) -> Self {
        DottedValue::Array(value)
    }
}

impl From<DottedMap> for DottedValue {
    fn from(value: DottedMap) -> Self {
        DottedValue::Object(value)
    }
}
