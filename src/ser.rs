//! Serialization into a document tree.
//!
//! [`ValueSerializer`] converts any `T: Serialize` into a [`DottedValue`]. The
//! crate-root functions ([`crate::to_value`], [`crate::to_string`]) use it to
//! build the tree that is then flattened.
//!
//! ```rust
//! use serde_dotted::{dotted, to_value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16 }
//!
//! let value = to_value(&Server { host: "localhost".into(), port: 80 }).unwrap();
//! assert_eq!(value, dotted!({ "host": "localhost", "port": 80 }));
//! ```
//!
//! Enum variants carrying data are represented externally tagged, as a
//! single-entry object keyed by the variant name. Map keys must serialize to
//! strings; anything else is rejected with [`Error::InvalidKey`].

use crate::{DottedMap, DottedValue, Error, Number, Result};
use serde::{ser, Serialize};

/// Serializer producing a [`DottedValue`] tree.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<DottedValue>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: DottedMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = DottedValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<DottedValue> {
        Ok(DottedValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::from(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::from(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<DottedValue> {
        Ok(DottedValue::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<DottedValue> {
        Ok(DottedValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<DottedValue> {
        Ok(DottedValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<DottedValue> {
        let vec = v
            .iter()
            .map(|&b| DottedValue::Number(Number::Integer(b as i64)))
            .collect();
        Ok(DottedValue::Array(vec))
    }

    fn serialize_none(self) -> Result<DottedValue> {
        Ok(DottedValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<DottedValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<DottedValue> {
        Ok(DottedValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<DottedValue> {
        Ok(DottedValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<DottedValue> {
        Ok(DottedValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<DottedValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<DottedValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_dotted_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_dotted_value(value)?);
        Ok(())
    }

    fn finish(self) -> DottedValue {
        let array = DottedValue::Array(self.vec);
        match self.variant {
            Some(variant) => tagged(variant, array),
            None => array,
        }
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: DottedMap::new(),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> DottedValue {
        let object = DottedValue::Object(self.map);
        match self.variant {
            Some(variant) => tagged(variant, object),
            None => object,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = DottedValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<DottedValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = DottedValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<DottedValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = DottedValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<DottedValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = DottedValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<DottedValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = DottedValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_dotted_value(key)? {
            DottedValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::invalid_key(other)),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_dotted_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<DottedValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = DottedValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_dotted_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<DottedValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = DottedValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_dotted_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<DottedValue> {
        Ok(self.finish())
    }
}

fn to_dotted_value<T: Serialize + ?Sized>(value: &T) -> Result<DottedValue> {
    value.serialize(ValueSerializer)
}

fn tagged(variant: &str, value: DottedValue) -> DottedValue {
    let mut object = DottedMap::with_capacity(1);
    object.insert(variant.to_string(), value);
    DottedValue::Object(object)
}
