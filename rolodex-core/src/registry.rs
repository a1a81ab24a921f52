//! Field registry: the fixed table mapping kind names to validators.
//!
//! Registration order is part of the public contract; the boundary lists
//! kinds in this order when building creation and search forms.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::field::FieldKind;
use crate::phone::PhoneNumber;

/// Turns raw input into the canonical value for one kind.
pub type Validator = fn(&str) -> Result<String, ValidationError>;

/// One registry entry.
pub struct FieldSpec {
    pub kind: FieldKind,
    /// Display name, also the `field_name` used on the wire.
    pub name: &'static str,
    validator: Validator,
}

impl FieldSpec {
    /// Validates `raw` and returns the value to store.
    pub fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        (self.validator)(raw)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// All registered kinds, in registration order.
pub static REGISTERED_FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        kind: FieldKind::Name,
        name: "Name",
        validator: accept_any,
    },
    FieldSpec {
        kind: FieldKind::Phone,
        name: "Phone",
        validator: validate_phone,
    },
    FieldSpec {
        kind: FieldKind::Email,
        name: "Email",
        validator: validate_email,
    },
    FieldSpec {
        kind: FieldKind::Birthday,
        name: "Birthday",
        validator: validate_birthday,
    },
    FieldSpec {
        kind: FieldKind::Note,
        name: "Note",
        validator: accept_any,
    },
];

/// Looks up a kind by its exact (case-sensitive) display name.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    REGISTERED_FIELDS.iter().find(|spec| spec.name == name)
}

/// Registry entry for `kind`.
pub fn spec_for(kind: FieldKind) -> &'static FieldSpec {
    let idx = match kind {
        FieldKind::Name => 0,
        FieldKind::Phone => 1,
        FieldKind::Email => 2,
        FieldKind::Birthday => 3,
        FieldKind::Note => 4,
    };
    &REGISTERED_FIELDS[idx]
}

/// Kind names in registration order.
pub fn kind_names() -> impl Iterator<Item = &'static str> {
    REGISTERED_FIELDS.iter().map(|spec| spec.name)
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("valid email regex"));

static BIRTHDAY_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("valid birthday regex"));

const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

fn accept_any(raw: &str) -> Result<String, ValidationError> {
    Ok(raw.to_owned())
}

fn validate_phone(raw: &str) -> Result<String, ValidationError> {
    PhoneNumber::parse(raw).map(|phone| phone.canonical())
}

fn validate_email(raw: &str) -> Result<String, ValidationError> {
    if !EMAIL_RE.is_match(raw) {
        return Err(ValidationError::InvalidEmail {
            input: raw.to_owned(),
        });
    }
    Ok(raw.to_owned())
}

fn validate_birthday(raw: &str) -> Result<String, ValidationError> {
    // calendar years start at 0001
    let is_date = BIRTHDAY_SHAPE_RE.is_match(raw)
        && NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
            .map_or(false, |date| date.year() >= 1);
    if !is_date {
        return Err(ValidationError::InvalidBirthday {
            input: raw.to_owned(),
        });
    }
    Ok(raw.to_owned())
}
