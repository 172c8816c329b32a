//! Escaping of reserved runes.
//!
//! [`escape_rune`] renders a single code point as the text that stands in for
//! it inside a row. The writer uses it twice: to build the byte substitution
//! table for the active delimiters, and to print rejected delimiter bytes in
//! error messages.
//!
//! ## Rendering Rules
//!
//! | Input                          | Output                     |
//! |--------------------------------|----------------------------|
//! | `U+FFFD`                       | `\uFFFD`                   |
//! | printable rune `c`             | `\c`                       |
//! | bell, backspace, form feed ... | `\a`, `\b`, `\f` ...       |
//! | other rune below `0x20`        | `\x` + 2 hex digits        |
//! | negative or above `0x10FFFF`   | `U+FFFD`                   |
//! | other rune below `0x10000`     | `\u` + 4 hex digits        |
//! | anything else                  | `\U` + 8 hex digits        |
//!
//! Hex digits are always lowercase.
//!
//! ```rust
//! use hive_text::escape_rune;
//!
//! assert_eq!(escape_rune('\n' as i32), r"\n");
//! assert_eq!(escape_rune(',' as i32), r"\,");
//! assert_eq!(escape_rune(0x01), r"\x01");
//! ```

use unicode_general_category::{get_general_category, GeneralCategory};

/// The escape character. Always reserved, whatever the delimiters are.
pub const ESCAPE: u8 = b'\\';

const LOWER_HEX: &[u8; 16] = b"0123456789abcdef";
const RUNE_ERROR: i32 = 0xFFFD;
const MAX_RUNE: i32 = 0x10FFFF;

/// Returns the escaped text form of a code point.
///
/// Total over every `i32`: values that are not Unicode scalar values never
/// panic and fall through to the hex or replacement-character forms.
///
/// Escaping a letter that doubles as a control-code mnemonic (`n` becomes
/// `\n`) is ambiguous, which is why such bytes are never accepted as
/// delimiters.
#[must_use]
pub fn escape_rune(r: i32) -> String {
    if r == RUNE_ERROR {
        return r"\uFFFD".to_string();
    }
    if let Some(c) = u32::try_from(r).ok().and_then(char::from_u32) {
        if is_print(c) {
            let mut out = String::with_capacity(1 + c.len_utf8());
            out.push('\\');
            out.push(c);
            return out;
        }
    }
    match r {
        0x07 => r"\a".to_string(),
        0x08 => r"\b".to_string(),
        0x0C => r"\f".to_string(),
        0x0A => r"\n".to_string(),
        0x0D => r"\r".to_string(),
        0x09 => r"\t".to_string(),
        0x0B => r"\v".to_string(),
        r if !(0..=MAX_RUNE).contains(&r) => char::REPLACEMENT_CHARACTER.to_string(),
        r if r < 0x20 => hex_escape(r"\x", r as u32, 2),
        r if r < 0x10000 => hex_escape(r"\u", r as u32, 4),
        r => hex_escape(r"\U", r as u32, 8),
    }
}

fn hex_escape(prefix: &str, r: u32, digits: u32) -> String {
    let mut out = String::with_capacity(prefix.len() + digits as usize);
    out.push_str(prefix);
    for shift in (0..digits).rev() {
        out.push(LOWER_HEX[((r >> (shift * 4)) & 0xF) as usize] as char);
    }
    out
}

/// Reports whether a character is printable: letters, marks, numbers,
/// punctuation, symbols and the ASCII space.
///
/// Control, format, private-use, surrogate, separator (other than `' '`)
/// and unassigned code points are not printable.
#[must_use]
pub fn is_print(c: char) -> bool {
    use GeneralCategory::*;
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        Control
            | Format
            | PrivateUse
            | Surrogate
            | Unassigned
            | SpaceSeparator
            | LineSeparator
            | ParagraphSeparator
    )
}

/// Byte substitution table for the reserved bytes of one delimiter set.
///
/// Built once per successful delimiter configuration and never modified
/// afterwards; reconfiguring replaces the whole table.
#[derive(Clone, Debug)]
pub(crate) struct Substitutions {
    entries: [Option<Box<str>>; 128],
}

impl Substitutions {
    /// Builds the table for the escape character plus `reserved`.
    ///
    /// Bytes outside ASCII are ignored; delimiter validation rejects them
    /// before a table is ever built.
    pub(crate) fn new(reserved: &[u8]) -> Self {
        let mut entries: [Option<Box<str>>; 128] = std::array::from_fn(|_| None);
        entries[ESCAPE as usize] = Some(escape_rune(i32::from(ESCAPE)).into_boxed_str());
        for &b in reserved {
            if let Some(slot) = entries.get_mut(b as usize) {
                *slot = Some(escape_rune(i32::from(b)).into_boxed_str());
            }
        }
        Substitutions { entries }
    }

    #[inline]
    pub(crate) fn get(&self, b: u8) -> Option<&str> {
        self.entries.get(b as usize)?.as_deref()
    }

    /// Appends `input` to `out`, replacing each reserved byte with its
    /// escaped text in one left-to-right pass. Replacements are not rescanned.
    pub(crate) fn escape_into(&self, input: &[u8], out: &mut Vec<u8>) {
        let mut start = 0;
        for (i, &b) in input.iter().enumerate() {
            if let Some(rep) = self.get(b) {
                out.extend_from_slice(&input[start..i]);
                out.extend_from_slice(rep.as_bytes());
                start = i + 1;
            }
        }
        out.extend_from_slice(&input[start..]);
    }
}
