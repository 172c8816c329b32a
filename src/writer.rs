//! Row writer.
//!
//! [`RowWriter`] turns typed values into one Hive text row at a time. Each
//! write appends an escaped field followed by the field delimiter;
//! [`RowWriter::finish_row`] appends the line terminator and hands back the
//! finished bytes. The writer never performs I/O.
//!
//! ## Usage
//!
//! ```rust
//! use hive_text::RowWriter;
//!
//! let mut writer = RowWriter::new();
//! writer.write_string("AA");
//! writer.write_int(99);
//! writer.write_str_array(["CC", "DD"]);
//! assert_eq!(writer.finish_row(), b"AA\x0199\x01CC\x02DD\x01\n");
//! ```
//!
//! ## Escaping
//!
//! Every occurrence of `\` or of an active delimiter inside string content is
//! replaced by its [`escape_rune`](crate::escape_rune) form. With
//! CSV-style delimiters a comma inside a value becomes `\,`:
//!
//! ```rust
//! use hive_text::RowWriter;
//!
//! let mut writer = RowWriter::new();
//! writer.set_delimiters(b',', b';', b':', b'\n').unwrap();
//! writer.write_string("a,b");
//! assert_eq!(writer.finish_row(), b"a\\,b,\n");
//! ```

use crate::escape::{Substitutions, ESCAPE};
use crate::ser::{FieldValueSerializer, RowSerializer};
use crate::{Delimiters, Error, FieldValue, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use std::borrow::Borrow;

/// Writes Hive text rows into an internal buffer.
///
/// A writer is reusable indefinitely: after [`finish_row`](Self::finish_row)
/// or [`reset`](Self::reset) the buffer is empty and delimiters may be
/// changed again.
#[derive(Clone, Debug)]
pub struct RowWriter {
    buf: Vec<u8>,
    delimiters: Delimiters,
    table: Substitutions,
    // Active delimiters, for the no-escape fast path.
    delims: [u8; 4],
}

impl Default for RowWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RowWriter {
    /// Creates a writer with the Hive default delimiters.
    ///
    /// # Panics
    ///
    /// Only if the built-in defaults fail validation, which is a bug in this
    /// crate.
    #[must_use]
    pub fn new() -> Self {
        match Self::with_delimiters(Delimiters::default()) {
            Ok(writer) => writer,
            Err(e) => panic!("default delimiters are invalid: {}", e),
        }
    }

    /// Creates a writer with the given delimiters.
    ///
    /// # Errors
    ///
    /// Returns the validation error of [`Delimiters::validate`].
    pub fn with_delimiters(delimiters: Delimiters) -> Result<Self> {
        delimiters.validate()?;
        let delims = delimiters.as_bytes();
        Ok(RowWriter {
            buf: Vec::with_capacity(256),
            delimiters,
            table: Substitutions::new(&delims),
            delims,
        })
    }

    /// Sets the delimiters for following rows.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyWriting`] if the current row already holds bytes
    /// - [`Error::DuplicateDelimiter`] if two roles share a byte
    /// - [`Error::InvalidDelimiter`] if a byte has the high bit set, is a
    ///   lowercase ASCII letter, a digit, `U` or `\`
    ///
    /// On error the previous delimiters stay active.
    pub fn set_delimiters(&mut self, field: u8, item: u8, key: u8, line: u8) -> Result<()> {
        self.set_delimiter_set(Delimiters {
            field,
            item,
            map_key: key,
            line,
        })
    }

    /// Same as [`set_delimiters`](Self::set_delimiters) taking a [`Delimiters`].
    ///
    /// # Errors
    ///
    /// See [`set_delimiters`](Self::set_delimiters).
    pub fn set_delimiter_set(&mut self, delimiters: Delimiters) -> Result<()> {
        if !self.buf.is_empty() {
            log::debug!("rejected delimiter change with {} bytes pending", self.buf.len());
            return Err(Error::AlreadyWriting);
        }
        if let Err(e) = delimiters.validate() {
            log::debug!("rejected delimiters: {}", e);
            return Err(e);
        }
        let delims = delimiters.as_bytes();
        self.table = Substitutions::new(&delims);
        self.delimiters = delimiters;
        self.delims = delims;
        log::debug!("delimiters set to {:?}", delims);
        Ok(())
    }

    /// Returns the active delimiters.
    #[must_use]
    pub const fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Number of bytes in the row under construction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true when no field has been written since the last row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The row under construction, without line terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Writes a field from a loosely typed value.
    ///
    /// Floats render with six fraction digits, so `5.5` becomes `5.500000`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] for [`FieldValue::Unsupported`]; nothing is
    /// written in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hive_text::RowWriter;
    ///
    /// let mut writer = RowWriter::new();
    /// writer.write_field(5.5).unwrap();
    /// writer.write_field(None::<i32>).unwrap();
    /// assert_eq!(writer.finish_row(), b"5.500000\x01\x01\n");
    /// ```
    pub fn write_field<V: Into<FieldValue>>(&mut self, value: V) -> Result<()> {
        match value.into() {
            FieldValue::Null => self.write_null(),
            FieldValue::String(s) => self.write_string(&s),
            FieldValue::Int(n) => self.write_int(n),
            FieldValue::Uint(n) => self.write_uint(n),
            FieldValue::Float(f) => self.write_float(f),
            FieldValue::Bool(b) => self.write_bool(b),
            FieldValue::Timestamp(ts) => self.write_timestamp(&ts),
            FieldValue::StrArray(v) => self.write_str_array(&v),
            FieldValue::IntArray(v) => self.write_int_array(&v),
            FieldValue::StrIntMap(m) => self.write_str_int_map(&m),
            FieldValue::StrUintMap(m) => self.write_str_uint_map(&m),
            FieldValue::Unsupported(name) => {
                log::trace!("refusing to write unsupported field of type {}", name);
                return Err(Error::UnsupportedType(name));
            }
        }
        Ok(())
    }

    /// Writes one field from any `Serialize` value. See [`crate::ser`] for the
    /// type mapping.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] when the value has no field representation.
    /// Nothing is written in that case.
    pub fn write_serialize<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let field = value.serialize(FieldValueSerializer)?;
        self.write_field(field)
    }

    /// Writes a record as one row and finishes it.
    ///
    /// Fields already written to the current row stay in front of the
    /// record's columns.
    ///
    /// # Errors
    ///
    /// Fails on the first member without a field representation. The buffer
    /// is then rolled back to its length before the call.
    pub fn serialize_row<T>(&mut self, record: &T) -> Result<Vec<u8>>
    where
        T: ?Sized + Serialize,
    {
        let start = self.buf.len();
        let result = record.serialize(&mut RowSerializer::new(self));
        match result {
            Ok(()) => Ok(self.finish_row()),
            Err(e) => {
                self.buf.truncate(start);
                Err(e)
            }
        }
    }

    /// Writes a `TRUE` or `FALSE` field.
    pub fn write_bool(&mut self, v: bool) {
        self.buf
            .extend_from_slice(if v { b"TRUE" as &[u8] } else { b"FALSE" });
        self.end_field();
    }

    /// Writes a signed integer field.
    pub fn write_int(&mut self, v: i64) {
        self.push_display(v);
        self.end_field();
    }

    /// Writes an unsigned integer field.
    pub fn write_uint(&mut self, v: u64) {
        self.push_display(v);
        self.end_field();
    }

    /// Writes a float field with six fraction digits.
    pub fn write_float(&mut self, v: f64) {
        self.push_escaped(&format_float(v));
        self.end_field();
    }

    /// Writes an escaped string field.
    pub fn write_string(&mut self, v: &str) {
        self.push_escaped(v);
        self.end_field();
    }

    /// Writes an escaped field from raw bytes, which need not be UTF-8.
    pub fn write_bytes(&mut self, v: &[u8]) {
        self.push_escaped_bytes(v);
        self.end_field();
    }

    /// Writes a timestamp as `YYYY-MM-DD HH:MM:SS[.fffffffff]`.
    ///
    /// Trailing zeros of the fraction are dropped, and so is the dot when the
    /// fraction is zero.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use hive_text::RowWriter;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2014, 1, 2)
    ///     .unwrap()
    ///     .and_hms_milli_opt(3, 4, 5, 250)
    ///     .unwrap();
    /// let mut writer = RowWriter::new();
    /// writer.write_timestamp(&ts);
    /// assert_eq!(writer.finish_row(), b"2014-01-02 03:04:05.25\x01\n");
    /// ```
    pub fn write_timestamp(&mut self, v: &NaiveDateTime) {
        self.push_escaped(&format_timestamp(v));
        self.end_field();
    }

    /// Writes an empty field, which Hive reads as NULL.
    pub fn write_null(&mut self) {
        self.end_field();
    }

    /// Writes an array of strings separated by the item delimiter.
    pub fn write_str_array<I>(&mut self, array: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for (i, item) in array.into_iter().enumerate() {
            if i > 0 {
                self.buf.push(self.delimiters.item);
            }
            self.push_escaped(item.as_ref());
        }
        self.end_field();
    }

    /// Writes an array of integers separated by the item delimiter.
    pub fn write_int_array<I>(&mut self, array: I)
    where
        I: IntoIterator,
        I::Item: Borrow<i64>,
    {
        for (i, item) in array.into_iter().enumerate() {
            if i > 0 {
                self.buf.push(self.delimiters.item);
            }
            self.push_display(*item.borrow());
        }
        self.end_field();
    }

    /// Writes a string to signed integer map.
    ///
    /// Entries come out in the iteration order of `map`. For a `HashMap` that
    /// order is unspecified; the format does not encode it.
    ///
    /// ```rust
    /// use hive_text::RowWriter;
    /// use std::collections::BTreeMap;
    ///
    /// let map = BTreeMap::from([("a".to_string(), 1i64), ("b".to_string(), -2)]);
    /// let mut writer = RowWriter::new();
    /// writer.write_str_int_map(&map);
    /// assert_eq!(writer.finish_row(), b"a\x031\x02b\x03-2\x01\n");
    /// ```
    pub fn write_str_int_map<I, K, V>(&mut self, map: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Borrow<i64>,
    {
        for (i, (k, v)) in map.into_iter().enumerate() {
            self.push_entry(i, k.as_ref());
            self.push_display(*v.borrow());
        }
        self.end_field();
    }

    /// Writes a string to unsigned integer map. Ordering as in
    /// [`write_str_int_map`](Self::write_str_int_map).
    pub fn write_str_uint_map<I, K, V>(&mut self, map: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Borrow<u64>,
    {
        for (i, (k, v)) in map.into_iter().enumerate() {
            self.push_entry(i, k.as_ref());
            self.push_display(*v.borrow());
        }
        self.end_field();
    }

    /// Appends the line terminator and returns the finished row.
    ///
    /// The returned bytes are an independent copy. The buffer is cleared but
    /// keeps its allocation for the next row.
    pub fn finish_row(&mut self) -> Vec<u8> {
        self.buf.push(self.delimiters.line);
        let row = self.buf.clone();
        self.buf.clear();
        row
    }

    /// Drops the row under construction. Delimiters are kept.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    #[inline]
    fn end_field(&mut self) {
        self.buf.push(self.delimiters.field);
    }

    fn push_entry(&mut self, index: usize, key: &str) {
        if index > 0 {
            self.buf.push(self.delimiters.item);
        }
        self.push_escaped(key);
        self.buf.push(self.delimiters.map_key);
    }

    // Numbers go through the table too: `-`, `+` and `.` are legal delimiters.
    fn push_display<T: std::fmt::Display>(&mut self, v: T) {
        self.push_escaped(&v.to_string());
    }

    #[inline]
    fn push_escaped(&mut self, v: &str) {
        self.push_escaped_bytes(v.as_bytes());
    }

    fn push_escaped_bytes(&mut self, v: &[u8]) {
        if self.needs_escape(v) {
            self.table.escape_into(v, &mut self.buf);
        } else {
            self.buf.extend_from_slice(v);
        }
    }

    fn needs_escape(&self, v: &[u8]) -> bool {
        v.iter().any(|b| *b == ESCAPE || self.delims.contains(b))
    }
}

/// Formats a float the way C's `%f` does: six fraction digits.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{:.6}", v)
    }
}

fn format_timestamp(v: &NaiveDateTime) -> String {
    // `%Y` would sign years past 9999.
    let year = v.year();
    let mut out = if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    };
    out.push_str(&v.format("-%m-%d %H:%M:%S").to_string());
    // chrono folds a leap second into the nanosecond field.
    let nanos = v.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}
