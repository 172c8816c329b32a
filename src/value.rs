//! Loosely typed field values.
//!
//! [`FieldValue`] is the closed set of shapes a Hive text field can hold. It
//! feeds [`RowWriter::write_field`](crate::RowWriter::write_field), which
//! matches on the variant once and delegates to the typed writers. Callers
//! with statically known types can skip it and call the typed writers
//! directly.
//!
//! ## Creating Values
//!
//! ```rust
//! use hive_text::FieldValue;
//!
//! let text = FieldValue::from("hello");
//! let count = FieldValue::from(42u16);
//! let missing = FieldValue::from(None::<i32>);
//!
//! assert_eq!(text.type_name(), "string");
//! assert_eq!(count, FieldValue::Uint(42));
//! assert!(missing.is_null());
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A value for a single field of a row.
///
/// Maps keep whatever order they were built in; the text format does not
/// encode entry order and readers must not rely on it.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    StrArray(Vec<String>),
    IntArray(Vec<i64>),
    StrIntMap(IndexMap<String, i64>),
    StrUintMap(IndexMap<String, u64>),
    /// A shape with no text representation, named for error reporting.
    Unsupported(String),
}

impl FieldValue {
    /// Returns a short name for the variant, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            FieldValue::Null => "null",
            FieldValue::String(_) => "string",
            FieldValue::Int(_) => "int",
            FieldValue::Uint(_) => "uint",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::StrArray(_) => "array<string>",
            FieldValue::IntArray(_) => "array<int>",
            FieldValue::StrIntMap(_) => "map<string,int>",
            FieldValue::StrUintMap(_) => "map<string,uint>",
            FieldValue::Unsupported(name) => name,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, FieldValue::Unsupported(_))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::String(c.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(n: $t) -> Self {
                    FieldValue::Int(n as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(n: $t) -> Self {
                    FieldValue::Uint(n as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(ts: NaiveDateTime) -> Self {
        FieldValue::Timestamp(ts)
    }
}

/// Uses the wall-clock time in the value's own time zone.
impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue {
    fn from(ts: DateTime<Tz>) -> Self {
        FieldValue::Timestamp(ts.naive_local())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::StrArray(v)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(v: Vec<&str>) -> Self {
        FieldValue::StrArray(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for FieldValue {
    fn from(v: &[String]) -> Self {
        FieldValue::StrArray(v.to_vec())
    }
}

impl From<&[&str]> for FieldValue {
    fn from(v: &[&str]) -> Self {
        FieldValue::StrArray(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<i64>> for FieldValue {
    fn from(v: Vec<i64>) -> Self {
        FieldValue::IntArray(v)
    }
}

impl From<Vec<i32>> for FieldValue {
    fn from(v: Vec<i32>) -> Self {
        FieldValue::IntArray(v.into_iter().map(i64::from).collect())
    }
}

impl From<&[i64]> for FieldValue {
    fn from(v: &[i64]) -> Self {
        FieldValue::IntArray(v.to_vec())
    }
}

impl From<IndexMap<String, i64>> for FieldValue {
    fn from(m: IndexMap<String, i64>) -> Self {
        FieldValue::StrIntMap(m)
    }
}

impl From<IndexMap<String, u64>> for FieldValue {
    fn from(m: IndexMap<String, u64>) -> Self {
        FieldValue::StrUintMap(m)
    }
}

impl<S: BuildHasher> From<HashMap<String, i64, S>> for FieldValue {
    fn from(m: HashMap<String, i64, S>) -> Self {
        FieldValue::StrIntMap(m.into_iter().collect())
    }
}

impl<S: BuildHasher> From<HashMap<String, u64, S>> for FieldValue {
    fn from(m: HashMap<String, u64, S>) -> Self {
        FieldValue::StrUintMap(m.into_iter().collect())
    }
}

impl From<BTreeMap<String, i64>> for FieldValue {
    fn from(m: BTreeMap<String, i64>) -> Self {
        FieldValue::StrIntMap(m.into_iter().collect())
    }
}

impl From<BTreeMap<String, u64>> for FieldValue {
    fn from(m: BTreeMap<String, u64>) -> Self {
        FieldValue::StrUintMap(m.into_iter().collect())
    }
}

impl From<()> for FieldValue {
    fn from(_: ()) -> Self {
        FieldValue::Null
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(FieldValue::Null, Into::into)
    }
}
