//! Sequential tag-length-value codec for QRIS payload text.
//!
//! A payload is a run of `tag ++ length ++ value` triples with no delimiters.
//! Tags and lengths are two ASCII digits each; lengths count characters of
//! the value. Fields are kept in payload order since position is significant.
//!
//! The checksum runs over UTF-16 code units while lengths count characters.
//! The two agree only inside the Basic Multilingual Plane, so characters above
//! U+FFFF are rejected on parse and on field construction.

use crate::domain::checksum::{CHECKSUM_WIDTH, compute_checksum};
use crate::error::{QrisError, Result};
use std::fmt;
use std::iter;

pub const TAG_POINT_OF_INITIATION: &str = "01";
pub const TAG_AMOUNT: &str = "54";
pub const TAG_COUNTRY_CODE: &str = "58";

/// Tag and length of the checksum field, the last thing the checksum covers.
pub const CHECKSUM_HEADER: &str = "6304";

/// Largest value length representable by the two-digit length field.
pub const MAX_VALUE_LEN: usize = 99;

const HEADER_LEN: usize = 4;

/// A single TLV element. The length is derived from the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    tag: String,
    value: String,
}

impl Field {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        let value = value.into();

        if !is_two_digits(&tag) {
            return Err(QrisError::FormatError(format!(
                "tag must be two decimal digits, got {tag:?}"
            )));
        }
        reject_supplementary(&value)?;
        let len = value.chars().count();
        if len > MAX_VALUE_LEN {
            return Err(QrisError::ValueError(format!(
                "value of tag {tag} is {len} characters, the length field holds at most {MAX_VALUE_LEN}"
            )));
        }

        Ok(Self { tag, value })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Character count of the value, as written in the length field.
    pub fn value_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is(&self, tag: &str, value: &str) -> bool {
        self.tag == tag && self.value == value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{}", self.tag, self.value_len(), self.value)
    }
}

/// An ordered list of top-level fields, without the trailing checksum field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payload {
    fields: Vec<Field>,
}

impl Payload {
    /// Parses a checksum-free body into its top-level fields.
    ///
    /// Nested templates (merchant account information, additional data) are
    /// kept as opaque values.
    pub fn parse(text: &str) -> Result<Self> {
        reject_supplementary(text)?;

        let mut fields = Vec::new();
        let mut rest = text;
        let mut offset = 0;

        while !rest.is_empty() {
            let (header, tail) = split_chars(rest, HEADER_LEN).ok_or_else(|| {
                QrisError::FormatError(format!("truncated field header at offset {offset}"))
            })?;
            if !header.is_ascii() {
                return Err(QrisError::FormatError(format!(
                    "malformed field header {header:?} at offset {offset}"
                )));
            }
            let (tag, len_text) = header.split_at(2);
            if !is_two_digits(tag) || !is_two_digits(len_text) {
                return Err(QrisError::FormatError(format!(
                    "malformed field header {header:?} at offset {offset}"
                )));
            }
            let len: usize = len_text.parse().map_err(|_| {
                QrisError::FormatError(format!("malformed length {len_text:?} at offset {offset}"))
            })?;
            let (value, tail) = split_chars(tail, len).ok_or_else(|| {
                QrisError::FormatError(format!(
                    "field {tag} at offset {offset} declares {len} characters past the end of the payload"
                ))
            })?;

            fields.push(Field {
                tag: tag.to_string(),
                value: value.to_string(),
            });
            offset += HEADER_LEN + len;
            rest = tail;
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn find(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    pub fn position(&self, tag: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.tag == tag)
    }

    pub fn count(&self, tag: &str) -> usize {
        self.fields.iter().filter(|f| f.tag == tag).count()
    }

    /// Splits into the fields before `index` and the fields from `index` on.
    pub fn split_at(&self, index: usize) -> (&[Field], &[Field]) {
        self.fields.split_at(index.min(self.fields.len()))
    }

    pub fn insert(&mut self, index: usize, field: Field) {
        let index = index.min(self.fields.len());
        self.fields.insert(index, field);
    }

    /// Replaces the value of the first field with `tag`.
    ///
    /// Returns `Ok(false)` when no such field exists.
    pub fn set_value(&mut self, tag: &str, value: impl Into<String>) -> Result<bool> {
        match self.fields.iter_mut().find(|f| f.tag == tag) {
            Some(field) => {
                *field = Field::new(tag, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn serialize(&self) -> String {
        self.fields.iter().map(Field::to_string).collect()
    }

    /// Serialises the fields and appends a freshly computed checksum field.
    pub fn seal(&self) -> String {
        let mut body = self.serialize();
        body.push_str(CHECKSUM_HEADER);
        let checksum = compute_checksum(&body);
        body.push_str(&checksum);
        body
    }
}

/// Removes the trailing checksum field (`6304` + 4 characters) from a sealed
/// payload, returning the body that precedes it.
pub fn strip_checksum(payload: &str) -> Result<&str> {
    let total = payload.chars().count();
    if total < CHECKSUM_WIDTH {
        return Err(QrisError::FormatError("payload too short".to_string()));
    }

    let (unsealed, _) = split_chars(payload, total - CHECKSUM_WIDTH)
        .ok_or_else(|| QrisError::FormatError("payload too short".to_string()))?;

    unsealed.strip_suffix(CHECKSUM_HEADER).ok_or_else(|| {
        QrisError::FormatError("payload does not end with a 6304 checksum field".to_string())
    })
}

fn reject_supplementary(text: &str) -> Result<()> {
    match text.char_indices().find(|(_, c)| u32::from(*c) > 0xFFFF) {
        Some((idx, c)) => Err(QrisError::FormatError(format!(
            "character {c:?} at byte {idx} lies outside the Basic Multilingual Plane"
        ))),
        None => Ok(()),
    }
}

fn is_two_digits(text: &str) -> bool {
    text.len() == 2 && text.bytes().all(|b| b.is_ascii_digit())
}

/// Splits after `n` characters, or `None` when `text` is shorter than that.
fn split_chars(text: &str, n: usize) -> Option<(&str, &str)> {
    text.char_indices()
        .map(|(idx, _)| idx)
        .chain(iter::once(text.len()))
        .nth(n)
        .map(|idx| text.split_at(idx))
}
