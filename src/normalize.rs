//! Line normalization for raw manuscript text.
//!
//! Every input line goes through [`normalize_line`] before the section builder sees
//! it. Normalization trims leading and trailing whitespace (including the
//! full-width space U+3000 common in CJK manuscripts) and then drops every
//! character that is not printable. An empty result means the line is blank.
//!
//! Only ASCII whitespace (tab, line feed, form feed, carriage return, space) and
//! U+3000 count as trimmable. Other Unicode spaces such as U+00A0 stop the trim and
//! are removed later by the printable filter, so ASCII spaces next to them survive.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_general_category::{GeneralCategory, get_general_category};

lazy_static! {
    /// Maximal run of ASCII whitespace or U+3000 at the start of a line.
    pub static ref LEADING_WHITESPACE_REGEX: Regex =
        Regex::new(r"^[\t\n\x0C\r \x{3000}]+").unwrap();
    /// Maximal run of ASCII whitespace or U+3000 at the end of a line.
    pub static ref TRAILING_WHITESPACE_REGEX: Regex =
        Regex::new(r"[\t\n\x0C\r \x{3000}]+$").unwrap();
}

/// Normalizes a single raw line.
///
/// Steps, in order:
/// 1. strip leading whitespace,
/// 2. strip trailing whitespace,
/// 3. remove non-printable characters (see [`is_printable`]).
///
/// # Examples
///
/// ```
/// use mustepub::normalize::normalize_line;
///
/// assert_eq!(normalize_line("\u{3000}\u{3000}第一章  "), "第一章");
/// assert_eq!(normalize_line("  \t "), "");
/// ```
pub fn normalize_line(line: &str) -> String {
    let line = LEADING_WHITESPACE_REGEX.replace(line, "");
    let line = TRAILING_WHITESPACE_REGEX.replace(&line, "");
    remove_non_printable(&line)
}

/// Decodes raw line bytes as UTF-8, substituting U+FFFD for every invalid byte.
///
/// Unlike [`String::from_utf8_lossy`], a truncated multi-byte sequence yields one
/// replacement character per byte, not one per sequence.
///
/// # Examples
///
/// ```
/// use mustepub::normalize::decode_line;
///
/// assert_eq!(decode_line(b"\xE4\xB8x"), "\u{FFFD}\u{FFFD}x");
/// ```
pub fn decode_line(mut bytes: &[u8]) -> String {
    let mut decoded = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                decoded.push_str(valid);
                return decoded;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                // valid_up_to guarantees this prefix is well-formed
                decoded.push_str(std::str::from_utf8(valid).unwrap_or_default());
                decoded.push(char::REPLACEMENT_CHARACTER);
                bytes = &rest[1..];
            }
        }
    }
}

/// Removes every character for which [`is_printable`] is false.
///
/// Surviving characters keep their relative order.
pub fn remove_non_printable(text: &str) -> String {
    text.chars().filter(|&c| is_printable(c)).collect()
}

/// Returns true if the character is printable.
///
/// Letters, marks, numbers, punctuation and symbols are printable, as is the ASCII
/// space. Control, format, private-use, surrogate and unassigned codepoints are
/// not, and neither are the other space separators (e.g. U+00A0, U+3000) or the
/// line/paragraph separators.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}
