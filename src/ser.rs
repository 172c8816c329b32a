//! Serde integration.
//!
//! Two serializers bridge `T: Serialize` types to the row writer:
//!
//! - [`FieldValueSerializer`] turns one value into a [`FieldValue`]
//! - [`RowSerializer`] writes a whole record (struct, tuple, tuple struct or
//!   sequence) as one row, one column per member
//!
//! ## Usage
//!
//! Most users should use [`to_row`](crate::to_row) or
//! [`RowWriter::serialize_row`](crate::RowWriter::serialize_row):
//!
//! ```rust
//! use hive_text::to_row;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Visit {
//!     user: String,
//!     pages: u32,
//!     tags: Vec<String>,
//!     referrer: Option<String>,
//! }
//!
//! let visit = Visit {
//!     user: "alice".to_string(),
//!     pages: 3,
//!     tags: vec!["new".to_string(), "mobile".to_string()],
//!     referrer: None,
//! };
//! let row = to_row(&visit).unwrap();
//! assert_eq!(row, b"alice\x013\x01new\x02mobile\x01\x01\n");
//! ```
//!
//! ## Type Mapping
//!
//! | Rust / serde                  | Field                    |
//! |-------------------------------|--------------------------|
//! | `bool`                        | `TRUE` / `FALSE`         |
//! | signed integers               | int                      |
//! | unsigned integers             | uint                     |
//! | `f32`, `f64`                  | float, six fraction digits |
//! | `char`, `&str`, `String`      | string                   |
//! | unit enum variant             | string (variant name)    |
//! | `None`, `()`, unit struct     | NULL                     |
//! | sequence of strings           | array of strings         |
//! | sequence of integers          | array of ints            |
//! | map of string to integer      | map                      |
//!
//! Anything else (nested structs, maps of other shapes, byte buffers, data
//! carrying enum variants) fails with [`Error::UnsupportedType`]. Timestamps
//! have no serde path here; write them through [`FieldValue::Timestamp`] or
//! [`RowWriter::write_timestamp`](crate::RowWriter::write_timestamp) to get
//! Hive's timestamp layout.

use crate::{Error, FieldValue, Result, RowWriter};
use indexmap::IndexMap;
use serde::ser::{self, Impossible};
use serde::Serialize;

/// Converts a single `Serialize` value into a [`FieldValue`].
pub struct FieldValueSerializer;

pub struct SerializeVec {
    vec: Vec<FieldValue>,
}

pub struct SerializeMap {
    entries: Vec<(String, FieldValue)>,
    current_key: Option<String>,
}

impl ser::Serializer for FieldValueSerializer {
    type Ok = FieldValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = Impossible<FieldValue, Error>;
    type SerializeTupleVariant = Impossible<FieldValue, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = Impossible<FieldValue, Error>;
    type SerializeStructVariant = Impossible<FieldValue, Error>;

    fn serialize_bool(self, v: bool) -> Result<FieldValue> {
        Ok(FieldValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<FieldValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<FieldValue> {
        Ok(FieldValue::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<FieldValue> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<FieldValue> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<FieldValue> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<FieldValue> {
        Ok(FieldValue::Uint(v))
    }

    fn serialize_f32(self, v: f32) -> Result<FieldValue> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<FieldValue> {
        Ok(FieldValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<FieldValue> {
        Ok(FieldValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<FieldValue> {
        Ok(FieldValue::String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<FieldValue> {
        Err(Error::unsupported_type("bytes"))
    }

    fn serialize_none(self) -> Result<FieldValue> {
        Ok(FieldValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<FieldValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<FieldValue> {
        Ok(FieldValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<FieldValue> {
        Ok(FieldValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<FieldValue> {
        Ok(FieldValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<FieldValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<FieldValue>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type(&format!("enum variant {}::{}", name, variant)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type(&format!("tuple struct {}", name)))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!("enum variant {}::{}", name, variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::unsupported_type(&format!("struct {}", name)))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type(&format!("enum variant {}::{}", name, variant)))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(FieldValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FieldValue> {
        array_value(self.vec)
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<FieldValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(FieldValueSerializer)? {
            FieldValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::unsupported_type(&format!(
                "map key of type {}",
                other.type_name()
            ))),
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
        self.entries.push((key, value.serialize(FieldValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<FieldValue> {
        map_value(self.entries)
    }
}

/// Arrays hold either strings or integers. Unsigned elements are accepted
/// while they fit an `i64`.
fn array_value(elements: Vec<FieldValue>) -> Result<FieldValue> {
    if elements.iter().all(|v| matches!(v, FieldValue::String(_))) {
        let strings = elements
            .into_iter()
            .filter_map(|v| match v {
                FieldValue::String(s) => Some(s),
                _ => None,
            })
            .collect();
        return Ok(FieldValue::StrArray(strings));
    }
    let mut ints = Vec::with_capacity(elements.len());
    for element in elements {
        match as_i64(&element) {
            Some(n) => ints.push(n),
            None => {
                return Err(Error::unsupported_type(&format!(
                    "array element of type {}",
                    element.type_name()
                )))
            }
        }
    }
    Ok(FieldValue::IntArray(ints))
}

/// Maps whose values are all unsigned become uint maps, anything else that
/// fits an `i64` becomes an int map.
fn map_value(entries: Vec<(String, FieldValue)>) -> Result<FieldValue> {
    let all_unsigned = !entries.is_empty()
        && entries
            .iter()
            .all(|(_, v)| matches!(v, FieldValue::Uint(_)));
    if all_unsigned {
        let map: IndexMap<String, u64> = entries
            .into_iter()
            .filter_map(|(k, v)| match v {
                FieldValue::Uint(n) => Some((k, n)),
                _ => None,
            })
            .collect();
        return Ok(FieldValue::StrUintMap(map));
    }
    let mut map = IndexMap::with_capacity(entries.len());
    for (key, value) in entries {
        match as_i64(&value) {
            Some(n) => {
                map.insert(key, n);
            }
            None => {
                return Err(Error::unsupported_type(&format!(
                    "map value of type {}",
                    value.type_name()
                )))
            }
        }
    }
    Ok(FieldValue::StrIntMap(map))
}

fn as_i64(value: &FieldValue) -> Option<i64> {
    match *value {
        FieldValue::Int(n) => Some(n),
        FieldValue::Uint(n) => i64::try_from(n).ok(),
        _ => None,
    }
}

/// Writes one record as one row.
///
/// Structs, tuples, tuple structs and sequences contribute one column per
/// member, in declaration order. Any other value is written as a single
/// column. The row is not finished; see
/// [`RowWriter::serialize_row`](crate::RowWriter::serialize_row).
pub struct RowSerializer<'w> {
    writer: &'w mut RowWriter,
}

impl<'w> RowSerializer<'w> {
    pub fn new(writer: &'w mut RowWriter) -> Self {
        RowSerializer { writer }
    }

    fn write_column<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let field = value.serialize(FieldValueSerializer)?;
        self.writer.write_field(field)
    }
}

impl<'a, 'w> ser::Serializer for &'a mut RowSerializer<'w> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.write_column(&v)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_column(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Error::unsupported_type("bytes"))
    }

    fn serialize_none(self) -> Result<()> {
        self.writer.write_null();
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.writer.write_null();
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.writer.write_string(variant);
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type(&format!("enum variant {}::{}", name, variant)))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!("enum variant {}::{}", name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type("map as a row"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type(&format!("enum variant {}::{}", name, variant)))
    }
}

impl<'a, 'w> ser::SerializeSeq for &'a mut RowSerializer<'w> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.write_column(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, 'w> ser::SerializeTuple for &'a mut RowSerializer<'w> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.write_column(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, 'w> ser::SerializeTupleStruct for &'a mut RowSerializer<'w> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.write_column(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, 'w> ser::SerializeStruct for &'a mut RowSerializer<'w> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.write_column(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
