//! # hive_text
//!
//! A writer for the delimited text rows of Hadoop/Hive text tables.
//!
//! ## Format
//!
//! A row is a sequence of fields, each followed by a one-byte field
//! delimiter, and ends with a line terminator. Arrays join their elements
//! with an item delimiter; maps join `key`, a map-key delimiter and `value`
//! per entry, and join entries with the item delimiter. Hive's defaults are
//! `\x01`, `\x02`, `\x03` and `\n`.
//!
//! Inside any string content, the escape character `\` and every active
//! delimiter are replaced by their escaped form (see [`escape_rune`]), so a
//! reader can always split rows and fields on the raw delimiter bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use hive_text::RowWriter;
//! use std::collections::BTreeMap;
//!
//! let mut writer = RowWriter::new();
//! writer.write_string("AA");
//! writer.write_int(99);
//! writer.write_str_int_map(&BTreeMap::from([("B1", 4i64), ("B2", 5)]));
//! writer.write_int_array([66i64, 77]);
//! writer.write_str_array(["CC", "DD"]);
//!
//! let row = writer.finish_row();
//! assert_eq!(row, b"AA\x0199\x01B1\x034\x02B2\x035\x0166\x0277\x01CC\x02DD\x01\n");
//! ```
//!
//! ### Serializing Records
//!
//! ```rust
//! use hive_text::to_row;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Event {
//!     id: u64,
//!     name: String,
//!     ok: bool,
//! }
//!
//! let row = to_row(&Event { id: 7, name: "login".to_string(), ok: true }).unwrap();
//! assert_eq!(row, b"7\x01login\x01TRUE\x01\n");
//! ```
//!
//! ### Custom Delimiters
//!
//! ```rust
//! use hive_text::{Delimiters, RowWriter};
//!
//! let mut writer = RowWriter::with_delimiters(
//!     Delimiters::new().with_field(b',').with_item(b';').with_map_key(b':'),
//! )
//! .unwrap();
//! writer.write_string("x,y");
//! assert_eq!(writer.finish_row(), b"x\\,y,\n");
//! ```
//!
//! ## Scope
//!
//! The crate only produces bytes. Where rows go (files, sockets, HDFS) is up
//! to the caller, and nothing here parses rows back.
//!
//! A [`RowWriter`] is plain mutable state: use one per thread or per
//! concurrent row builder.

pub mod error;
pub mod escape;
pub mod macros;
pub mod options;
pub mod ser;
pub mod value;
pub mod writer;

pub use error::{Error, Result};
pub use escape::{escape_rune, is_print};
pub use options::{
    Delimiters, DEFAULT_FIELD_DELIMITER, DEFAULT_ITEM_DELIMITER, DEFAULT_LINE_ENDING,
    DEFAULT_MAP_KEY_DELIMITER, TIMESTAMP_FORMAT,
};
pub use ser::{FieldValueSerializer, RowSerializer};
pub use value::FieldValue;
pub use writer::RowWriter;

use serde::Serialize;

/// Serialize a record into one finished row with the default delimiters.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if a member has no field representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_row<T>(record: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    RowWriter::new().serialize_row(record)
}

/// Serialize a record into one finished row with custom delimiters.
///
/// # Errors
///
/// Returns a delimiter validation error or [`Error::UnsupportedType`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_row_with_delimiters<T>(record: &T, delimiters: Delimiters) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    RowWriter::with_delimiters(delimiters)?.serialize_row(record)
}

/// Convert any `T: Serialize` into a single [`FieldValue`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for shapes a field cannot hold.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_field_value<T>(value: &T) -> Result<FieldValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(FieldValueSerializer)
}
