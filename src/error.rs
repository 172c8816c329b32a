//! Error types for row writing.
//!
//! Only two operations can fail: configuring delimiters and the generic,
//! loosely typed field writes. Every typed write is total.
//!
//! ## Error Categories
//!
//! - **Configuration errors**: delimiters changed mid-row, duplicated, or unsafe
//! - **Unsupported values**: a generic write received a shape the format cannot hold
//!
//! ## Examples
//!
//! ```rust
//! use hive_text::{Error, RowWriter};
//!
//! let mut writer = RowWriter::new();
//! let err = writer.set_delimiters(b',', b',', b':', b'\n').unwrap_err();
//! assert!(matches!(err, Error::DuplicateDelimiter { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while configuring or writing rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Delimiters were changed after the current row received bytes
    #[error("cannot set delimiters after starting to write a row")]
    AlreadyWriting,

    /// Two or more delimiter roles share the same byte
    #[error("cannot have duplicate delimiters: field={field} item={item} key={key} line={line}")]
    DuplicateDelimiter {
        field: String,
        item: String,
        key: String,
        line: String,
    },

    /// A delimiter byte would make escape sequences ambiguous
    #[error("{escaped} is not a valid {role} delimiter")]
    InvalidDelimiter { role: &'static str, escaped: String },

    /// Value shape has no representation in a text row
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error raised through serde
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a duplicate-delimiter error naming all four candidate bytes.
    ///
    /// Each byte is rendered through [`escape_rune`](crate::escape_rune) so
    /// control characters stay readable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hive_text::Error;
    ///
    /// let err = Error::duplicate_delimiter([b',', b',', b':', b'\n']);
    /// assert!(err.to_string().contains(r"line=\n"));
    /// ```
    pub fn duplicate_delimiter(candidates: [u8; 4]) -> Self {
        let [field, item, key, line] = candidates.map(|b| crate::escape_rune(i32::from(b)));
        Error::DuplicateDelimiter {
            field,
            item,
            key,
            line,
        }
    }

    /// Creates an invalid-delimiter error for the given role.
    pub fn invalid_delimiter(role: &'static str, byte: u8) -> Self {
        Error::InvalidDelimiter {
            role,
            escaped: crate::escape_rune(i32::from(byte)),
        }
    }

    /// Creates an unsupported type error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hive_text::Error;
    ///
    /// let err = Error::unsupported_type("nested struct");
    /// assert_eq!(err.to_string(), "unsupported type: nested struct");
    /// ```
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_delimiter_message() {
        let err = Error::invalid_delimiter("field", b'a');
        assert_eq!(err.to_string(), r"\a is not a valid field delimiter");

        let err = Error::invalid_delimiter("item", 0x01);
        assert_eq!(err.to_string(), r"\x01 is not a valid item delimiter");
    }

    #[test]
    fn test_duplicate_delimiter_names_all_roles() {
        let err = Error::duplicate_delimiter([0x01, 0x02, 0x02, b'\n']);
        assert_eq!(
            err.to_string(),
            r"cannot have duplicate delimiters: field=\x01 item=\x02 key=\x02 line=\n"
        );
    }
}
