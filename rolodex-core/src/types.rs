//! Identifier newtypes and index-argument parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BookError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Book-assigned contact identifier. Never reused within a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ContactId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl FromStr for ContactId {
    type Err = BookError;

    /// Parses raw user text. Non-integers are [`BookError::InvalidIndex`];
    /// integers no id can hold (negative, overflowing) are
    /// [`BookError::NotFound`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s.parse_index()?;
        parsed
            .value
            .map(Self)
            .ok_or(BookError::NotFound { id: parsed.text })
    }
}

// ---------------------------------------------------------------------------
// Index arguments
// ---------------------------------------------------------------------------

/// A syntactically valid integer index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIndex {
    /// `None` when the integer is negative or does not fit in `u64`; such an
    /// index addresses nothing.
    pub value: Option<u64>,
    /// Normalized text of the integer, used in error messages.
    pub text: String,
}

impl ParsedIndex {
    fn of(value: u64) -> Self {
        Self {
            value: Some(value),
            text: value.to_string(),
        }
    }

    fn signed(value: i64) -> Self {
        Self {
            value: u64::try_from(value).ok(),
            text: value.to_string(),
        }
    }
}

/// Anything the boundary may pass as a field index or contact id.
///
/// Native integers always parse. Text is trimmed and must be an optional
/// sign followed by ASCII digits, otherwise [`BookError::InvalidIndex`];
/// its magnitude is checked later, by whoever owns the bounds.
pub trait IndexArg {
    fn parse_index(&self) -> Result<ParsedIndex, BookError>;
}

impl IndexArg for i32 {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        Ok(ParsedIndex::signed(i64::from(*self)))
    }
}

impl IndexArg for i64 {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        Ok(ParsedIndex::signed(*self))
    }
}

impl IndexArg for u32 {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        Ok(ParsedIndex::of(u64::from(*self)))
    }
}

impl IndexArg for u64 {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        Ok(ParsedIndex::of(*self))
    }
}

impl IndexArg for usize {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        Ok(match u64::try_from(*self) {
            Ok(value) => ParsedIndex::of(value),
            Err(_) => ParsedIndex {
                value: None,
                text: self.to_string(),
            },
        })
    }
}

impl IndexArg for ContactId {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        self.0.parse_index()
    }
}

impl IndexArg for str {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        let trimmed = self.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BookError::InvalidIndex {
                input: self.to_owned(),
            });
        }

        let magnitude = digits.trim_start_matches('0');
        let magnitude = if magnitude.is_empty() { "0" } else { magnitude };
        let zero = magnitude == "0";
        let text = if negative && !zero {
            format!("-{magnitude}")
        } else {
            magnitude.to_owned()
        };
        let value = if negative && !zero {
            None
        } else {
            magnitude.parse::<u64>().ok()
        };
        Ok(ParsedIndex { value, text })
    }
}

impl IndexArg for String {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        self.as_str().parse_index()
    }
}

impl<T: IndexArg + ?Sized> IndexArg for &T {
    fn parse_index(&self) -> Result<ParsedIndex, BookError> {
        (**self).parse_index()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
