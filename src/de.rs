//! Deserialization out of a document tree.
//!
//! [`ValueDeserializer`] drives any `T: Deserialize` from a [`DottedValue`].
//! Trees read from dotted text hold nothing but string leaves, so when a
//! visitor asks for a specific type the leaf text is parsed on demand:
//!
//! - `bool`, integers, floats and `char` parse the (trimmed) text
//! - `Option<T>` treats `null` text as `None`
//! - `()` and unit structs accept `null` text
//! - sequences and maps stored as a leaf are parsed as JSON, which is how
//!   arrays are rendered when flattened
//!
//! ```rust
//! use serde_dotted::{dotted, from_value};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { port: u16, tls: bool, tags: Vec<String> }
//!
//! let tree = dotted!({ "port": "8080", "tls": "false", "tags": "[\"a\",\"b\"]" });
//! let server: Server = from_value(tree).unwrap();
//! assert_eq!(server, Server { port: 8080, tls: false, tags: vec!["a".into(), "b".into()] });
//! ```

use crate::{DottedMap, DottedValue, Error, Number, Result};
use serde::de::{self, Deserializer as _, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializer reading from an owned [`DottedValue`].
pub struct ValueDeserializer {
    value: DottedValue,
}

impl ValueDeserializer {
    pub fn new(value: DottedValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> IntoDeserializer<'de, Error> for DottedValue {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

/// Generates `deserialize_*` methods that parse string leaves into `$ty`.
macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.value {
                    DottedValue::String(s) => {
                        let parsed = s
                            .trim()
                            .parse::<$ty>()
                            .map_err(|_| Error::type_mismatch(stringify!($ty), &s))?;
                        visitor.$visit(parsed)
                    }
                    other => ValueDeserializer::new(other).deserialize_any(visitor),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            DottedValue::Null => visitor.visit_unit(),
            DottedValue::Bool(b) => visitor.visit_bool(b),
            DottedValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            DottedValue::Number(Number::Unsigned(u)) => visitor.visit_u64(u),
            DottedValue::Number(Number::Big(big)) => {
                if let Ok(i) = i128::try_from(&big) {
                    visitor.visit_i128(i)
                } else if let Ok(u) = u128::try_from(&big) {
                    visitor.visit_u128(u)
                } else {
                    visitor.visit_string(big.to_string())
                }
            }
            DottedValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            DottedValue::String(s) => visitor.visit_string(s),
            DottedValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            DottedValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            DottedValue::String(s) => match s.trim() {
                "true" => visitor.visit_bool(true),
                "false" => visitor.visit_bool(false),
                _ => Err(Error::type_mismatch("bool", &s)),
            },
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            DottedValue::Null => visitor.visit_none(),
            DottedValue::String(s) if s == "null" => visitor.visit_none(),
            other => visitor.visit_some(ValueDeserializer::new(other)),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            DottedValue::Null => visitor.visit_unit(),
            DottedValue::String(s) if s == "null" => visitor.visit_unit(),
            other => Err(Error::type_mismatch("unit", other.kind())),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match embedded_json(self.value, "sequence")? {
            DottedValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => Err(Error::type_mismatch("sequence", other.kind())),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match embedded_json(self.value, "map")? {
            DottedValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            other => Err(Error::type_mismatch("map", other.kind())),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            DottedValue::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            DottedValue::Object(obj) if obj.len() == 1 => {
                let mut entries = obj.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    None => Err(Error::custom("Expected a single-entry enum object")),
                }
            }
            other => Err(Error::type_mismatch("enum", other.kind())),
        }
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf identifier ignored_any
    }
}

/// Parses a string leaf holding JSON; other values pass through unchanged.
fn embedded_json(value: DottedValue, expected: &str) -> Result<DottedValue> {
    match value {
        DottedValue::String(s) => {
            serde_json::from_str(&s).map_err(|_| Error::type_mismatch(expected, &s))
        }
        other => Ok(other),
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<DottedValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<DottedValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, DottedValue>,
    value: Option<DottedValue>,
}

impl MapDeserializer {
    fn new(map: DottedMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(DottedValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<DottedValue>,
}

impl EnumDeserializer {
    fn new(variant: String, value: DottedValue) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant =
            seed.deserialize(ValueDeserializer::new(DottedValue::String(self.variant)))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<DottedValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(DottedValue::Null) | None => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_seq(ValueDeserializer::new(value), visitor),
            None => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_map(ValueDeserializer::new(value), visitor),
            None => Err(Error::custom("Expected struct variant")),
        }
    }
}
