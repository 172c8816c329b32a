//! Delimiter configuration.
//!
//! A Hive text row uses four single-byte delimiters:
//!
//! - **field**: ends every field
//! - **item**: separates array elements and map entries
//! - **map key**: separates a map key from its value
//! - **line**: ends the row
//!
//! Hive's defaults are `\x01`, `\x02`, `\x03` and `\n`.
//!
//! ## Examples
//!
//! ```rust
//! use hive_text::{Delimiters, RowWriter};
//!
//! let delimiters = Delimiters::new()
//!     .with_field(b',')
//!     .with_item(b';')
//!     .with_map_key(b':');
//! assert!(delimiters.validate().is_ok());
//!
//! let mut writer = RowWriter::with_delimiters(delimiters).unwrap();
//! writer.write_int_array(&[1i64, 2, 3]);
//! assert_eq!(writer.finish_row(), b"1;2;3,\n");
//! ```

use crate::escape::ESCAPE;
use crate::{Error, Result};

pub const DEFAULT_FIELD_DELIMITER: u8 = 0x01;
pub const DEFAULT_ITEM_DELIMITER: u8 = 0x02;
pub const DEFAULT_MAP_KEY_DELIMITER: u8 = 0x03;
pub const DEFAULT_LINE_ENDING: u8 = b'\n';

/// Layout of timestamp fields, in Go reference-time notation as Hive
/// documents it. The fractional part drops trailing zeros.
pub const TIMESTAMP_FORMAT: &str = "2006-01-02 15:04:05.999999999";

const ROLES: [&str; 4] = ["field", "item", "key", "line"];

/// The four delimiter bytes of a row.
///
/// # Examples
///
/// ```rust
/// use hive_text::Delimiters;
///
/// let defaults = Delimiters::default();
/// assert_eq!(defaults.as_bytes(), [0x01, 0x02, 0x03, b'\n']);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Delimiters {
    pub field: u8,
    pub item: u8,
    pub map_key: u8,
    pub line: u8,
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters {
            field: DEFAULT_FIELD_DELIMITER,
            item: DEFAULT_ITEM_DELIMITER,
            map_key: DEFAULT_MAP_KEY_DELIMITER,
            line: DEFAULT_LINE_ENDING,
        }
    }
}

impl Delimiters {
    /// Creates the Hive default delimiters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_field(mut self, field: u8) -> Self {
        self.field = field;
        self
    }

    /// Sets the item delimiter used inside arrays and maps.
    #[must_use]
    pub fn with_item(mut self, item: u8) -> Self {
        self.item = item;
        self
    }

    /// Sets the delimiter between a map key and its value.
    #[must_use]
    pub fn with_map_key(mut self, map_key: u8) -> Self {
        self.map_key = map_key;
        self
    }

    /// Sets the line terminator.
    #[must_use]
    pub fn with_line(mut self, line: u8) -> Self {
        self.line = line;
        self
    }

    /// Returns the delimiters in `[field, item, map_key, line]` order.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 4] {
        [self.field, self.item, self.map_key, self.line]
    }

    /// Checks that the set can be escaped unambiguously.
    ///
    /// Delimiters must be pairwise distinct and must not have the high bit
    /// set, be a lowercase ASCII letter, an ASCII digit, `U`, or the escape
    /// character. Those bytes would collide with escape sequences such as
    /// `\n`, `\x01` or `\U0001f600`.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateDelimiter`] is checked first, then
    /// [`Error::InvalidDelimiter`] for the first offending role.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hive_text::{Delimiters, Error};
    ///
    /// let err = Delimiters::new().with_field(b'n').validate().unwrap_err();
    /// assert_eq!(err, Error::invalid_delimiter("field", b'n'));
    /// ```
    pub fn validate(&self) -> Result<()> {
        let bytes = self.as_bytes();
        for (i, a) in bytes.iter().enumerate() {
            if bytes[i + 1..].contains(a) {
                return Err(Error::duplicate_delimiter(bytes));
            }
        }
        for (role, b) in ROLES.into_iter().zip(bytes) {
            if !is_safe_delimiter(b) {
                return Err(Error::invalid_delimiter(role, b));
            }
        }
        Ok(())
    }
}

/// Reports whether a byte may be used as a delimiter.
#[must_use]
pub const fn is_safe_delimiter(b: u8) -> bool {
    !(b > 127 || b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'U' || b == ESCAPE)
}
