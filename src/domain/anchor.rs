//! Locates the fields the dynamic transformation touches: the
//! point-of-initiation method and the `58` country code.

use crate::domain::tlv::{Field, Payload, TAG_COUNTRY_CODE, TAG_POINT_OF_INITIATION};
use crate::error::{QrisError, Result};

pub const INITIATION_STATIC: &str = "11";
pub const INITIATION_DYNAMIC: &str = "12";
pub const COUNTRY_INDONESIA: &str = "ID";

/// What happened to the point-of-initiation field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initiation {
    /// `010211` was rewritten to `010212`.
    Marked,
    /// Already `010212`; nothing to do.
    AlreadyDynamic,
    /// Field present with some other value, left untouched.
    Unexpected(String),
    /// No `01` field at all, left untouched.
    Missing,
}

/// Rewrites a static point-of-initiation field to dynamic.
///
/// Anything other than the exact static value is passed through unchanged.
pub fn mark_dynamic(payload: &mut Payload) -> Result<Initiation> {
    let current = match payload.find(TAG_POINT_OF_INITIATION) {
        Some(field) => field.value().to_string(),
        None => return Ok(Initiation::Missing),
    };

    match current.as_str() {
        INITIATION_STATIC => {
            payload.set_value(TAG_POINT_OF_INITIATION, INITIATION_DYNAMIC)?;
            Ok(Initiation::Marked)
        }
        INITIATION_DYNAMIC => Ok(Initiation::AlreadyDynamic),
        _ => Ok(Initiation::Unexpected(current)),
    }
}

/// The payload divided at the country-code anchor.
///
/// `suffix` starts with the anchor field itself.
#[derive(Debug, PartialEq, Eq)]
pub struct AnchorSplit<'a> {
    pub index: usize,
    pub prefix: &'a [Field],
    pub suffix: &'a [Field],
}

/// Finds the single `5802ID` field.
///
/// Zero or several occurrences mean the payload is not the expected schema.
pub fn locate_country_code(payload: &Payload) -> Result<AnchorSplit<'_>> {
    let mut anchors = payload
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is(TAG_COUNTRY_CODE, COUNTRY_INDONESIA))
        .map(|(idx, _)| idx);

    match (anchors.next(), anchors.next()) {
        (Some(index), None) => {
            let (prefix, suffix) = payload.split_at(index);
            Ok(AnchorSplit {
                index,
                prefix,
                suffix,
            })
        }
        _ => Err(QrisError::FormatError(
            "missing or ambiguous country-code anchor".to_string(),
        )),
    }
}
