//! Typed, validated contact fields.
//!
//! A [`Field`] can only be obtained through its kind's validator, so its
//! value always satisfies that kind's rule. Updates go through the same
//! validator and leave the field untouched on failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{BookError, BookResult, DecodeError, ValidationError};
use crate::phone::PhoneNumber;
use crate::registry::{self, FieldSpec};

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// The five field categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum FieldKind {
    Name,
    Phone,
    Email,
    Birthday,
    Note,
}

impl FieldKind {
    /// Every kind, in registration order.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Name,
        FieldKind::Phone,
        FieldKind::Email,
        FieldKind::Birthday,
        FieldKind::Note,
    ];

    /// Registry entry for this kind.
    pub fn spec(self) -> &'static FieldSpec {
        registry::spec_for(self)
    }

    /// Display name, as written in `field_name`.
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry::lookup(s)
            .map(|spec| spec.kind)
            .ok_or_else(|| BookError::UnknownKind { name: s.to_owned() })
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A single validated datum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    kind: FieldKind,
    value: String,
}

impl Field {
    /// Validates `raw` against `kind` and builds the field.
    pub fn new(kind: FieldKind, raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = kind.spec().validate(raw.as_ref())?;
        Ok(Self { kind, value })
    }

    /// Resolves `kind_name` through the registry, then validates `raw`.
    pub fn create(kind_name: &str, raw: impl AsRef<str>) -> BookResult<Self> {
        let kind = kind_name.parse::<FieldKind>()?;
        Ok(Self::new(kind, raw)?)
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Canonical value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Re-validates `raw` against this field's kind and stores it.
    ///
    /// The kind never changes; on error the old value is kept.
    pub fn update(&mut self, raw: impl AsRef<str>) -> Result<(), ValidationError> {
        self.value = self.kind.spec().validate(raw.as_ref())?;
        Ok(())
    }

    /// Literal, case-sensitive substring test on the value.
    pub fn contains(&self, needle: &str) -> bool {
        self.value.contains(needle)
    }

    /// Parsed parts of a Phone field; `None` for other kinds.
    pub fn phone_number(&self) -> Option<PhoneNumber> {
        match self.kind {
            FieldKind::Phone => PhoneNumber::parse(&self.value).ok(),
            _ => None,
        }
    }

    /// Rebuilds a field from its serialized object.
    ///
    /// The value is re-validated, so a failure here may be either a
    /// [`BookError::Decode`] or a [`BookError::Validation`].
    pub fn decode(entry: &Value) -> BookResult<Self> {
        let obj = entry.as_object().ok_or_else(|| DecodeError::Malformed {
            message: format!("field must be an object, got {entry}"),
        })?;

        let name = required_str(obj, "field_name")?;
        let kind = registry::lookup(name)
            .ok_or_else(|| DecodeError::UnknownKind {
                name: name.to_owned(),
            })?
            .kind;
        let raw = required_str(obj, "value")?;

        Ok(Self::new(kind, raw)?)
    }
}

fn required_str<'a>(
    obj: &'a serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, DecodeError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(DecodeError::MissingKey { key }),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(DecodeError::Malformed {
            message: format!("'{key}' must be a string, got {other}"),
        }),
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}

/// Wire shape of a field.
#[derive(Serialize)]
struct FieldRepr<'a> {
    value: &'a str,
    field_name: &'static str,
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FieldRepr {
            value: &self.value,
            field_name: self.kind.name(),
        }
        .serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
