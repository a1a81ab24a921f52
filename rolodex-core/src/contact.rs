//! Contact: an ordered, index-addressable sequence of fields.
//!
//! # Invariants
//! - Indices are positional. Deleting index `i` shifts every later field
//!   down by one; callers must not hold on to indices across deletes.
//! - Every stored field already passed its kind's validator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{BookError, BookResult, DecodeError};
use crate::field::{Field, FieldKind};
use crate::types::IndexArg;

/// Fallback rendered when a contact has no usable name.
pub const NO_NAME: &str = "No name";

/// Structured query: every kind must have a field containing its substring.
pub type SearchCriteria = BTreeMap<FieldKind, String>;

/// An ordered list of validated fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    fields: Vec<Field>,
}

impl Contact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a contact from already-validated fields, in order.
    pub fn with_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// `(position, field)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Field)> {
        self.fields.iter().enumerate()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Appends `field` and returns its position.
    pub fn add(&mut self, field: Field) -> usize {
        self.fields.push(field);
        self.fields.len() - 1
    }

    /// Overwrites the field at `index`.
    pub fn replace<I: IndexArg>(&mut self, index: I, field: Field) -> BookResult<()> {
        let idx = self.resolve(index)?;
        self.fields[idx] = field;
        Ok(())
    }

    /// Removes the field at `index`, shifting later fields down.
    pub fn delete<I: IndexArg>(&mut self, index: I) -> BookResult<Field> {
        let idx = self.resolve(index)?;
        Ok(self.fields.remove(idx))
    }

    /// Re-validates `raw` against the kind already at `index` and stores it.
    pub fn update<I: IndexArg>(&mut self, index: I, raw: impl AsRef<str>) -> BookResult<()> {
        let idx = self.resolve(index)?;
        self.fields[idx].update(raw)?;
        Ok(())
    }

    fn resolve<I: IndexArg>(&self, index: I) -> BookResult<usize> {
        let parsed = index.parse_index()?;
        parsed
            .value
            .and_then(|value| usize::try_from(value).ok())
            .filter(|&idx| idx < self.fields.len())
            .ok_or(BookError::IndexOutOfRange {
                index: parsed.text,
                len: self.fields.len(),
            })
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// True iff some field of `kind` contains `needle`.
    pub fn field_search(&self, kind: FieldKind, needle: &str) -> bool {
        self.of_kind(kind).any(|field| field.contains(needle))
    }

    /// True iff every criterion matches; an empty query matches everything.
    ///
    /// A criterion whose kind has no field on this contact fails the query.
    pub fn multi_search(&self, criteria: &SearchCriteria) -> bool {
        criteria
            .iter()
            .all(|(kind, needle)| self.field_search(*kind, needle))
    }

    /// True iff any field's value contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.fields.iter().any(|field| field.contains(needle))
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Name values joined by a space, then spread one character per slot.
    ///
    /// `"Alice"` renders as `"A l i c e"`. Falls back to [`NO_NAME`] when
    /// there is no Name field or the result is blank.
    pub fn display_name(&self) -> String {
        let joined = self
            .of_kind(FieldKind::Name)
            .map(Field::value)
            .collect::<Vec<_>>()
            .join(" ");
        let spread = joined
            .chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ");
        if spread.trim().is_empty() {
            NO_NAME.to_owned()
        } else {
            spread
        }
    }

    /// Canonical phone numbers joined by `"; "`.
    pub fn phone_summary(&self) -> String {
        self.of_kind(FieldKind::Phone)
            .map(Field::value)
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn birthday(&self) -> &str {
        self.first_value(FieldKind::Birthday)
    }

    pub fn email(&self) -> &str {
        self.first_value(FieldKind::Email)
    }

    pub fn note(&self) -> &str {
        self.first_value(FieldKind::Note)
    }

    fn of_kind(&self, kind: FieldKind) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |field| field.kind() == kind)
    }

    fn first_value(&self, kind: FieldKind) -> &str {
        self.of_kind(kind).next().map_or("", Field::value)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Rebuilds a contact from `{"fields": [...]}`.
    ///
    /// `fields` may be absent or null. Stops at the first field that fails.
    pub fn decode(entry: &Value) -> BookResult<Self> {
        let obj = entry.as_object().ok_or_else(|| DecodeError::Malformed {
            message: format!("contact must be an object, got {entry}"),
        })?;

        let mut contact = Self::new();
        match obj.get("fields") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for item in items {
                    contact.add(Field::decode(item)?);
                }
            }
            Some(other) => {
                return Err(DecodeError::Malformed {
                    message: format!("'fields' must be an array, got {other}"),
                }
                .into())
            }
        }
        Ok(contact)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[derive(Serialize)]
struct ContactRepr<'a> {
    fields: &'a [Field],
}

impl Serialize for Contact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ContactRepr {
            fields: &self.fields,
        }
        .serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
