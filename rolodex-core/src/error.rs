//! Error types for rolodex-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::FieldKind;

/// Result alias used throughout the core.
pub type BookResult<T> = Result<T, BookError>;

/// All errors that can arise from field, contact, book, and store operations.
#[derive(Debug, Error)]
pub enum BookError {
    /// User input rejected by a field kind's validator.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A serialized field could not be reconstructed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// An index or id was supplied as text that is not an integer.
    #[error("index value is not integer: '{input}'")]
    InvalidIndex { input: String },

    /// A syntactically valid field index outside the contact's fields.
    #[error("field index {index} out of range (contact has {len} fields)")]
    IndexOutOfRange { index: String, len: usize },

    /// A syntactically valid contact id that is not in the book.
    #[error("contact {id} not found")]
    NotFound { id: String },

    /// A kind name that is not in the field registry.
    #[error("unknown field kind '{name}'; expected one of: Name, Phone, Email, Birthday, Note")]
    UnknownKind { name: String },

    /// The address book document is not valid JSON.
    #[error("invalid address book document: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure while reading or writing the book file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `dirs::home_dir()` returned `None`; no default book location.
    #[error("cannot determine home directory; set $HOME or pass --book")]
    HomeNotFound,
}

/// Per-kind validation failures. Messages name the rejected input verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no phone number found in '{input}'")]
    NoPhoneNumber { input: String },

    #[error("operator code not found in '{input}'")]
    MissingOperatorCode { input: String },

    #[error("'{input}' is not an email")]
    InvalidEmail { input: String },

    #[error("'{input}' is not a date dd.mm.yyyy")]
    InvalidBirthday { input: String },
}

impl ValidationError {
    /// The field kind whose rule produced this error.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::NoPhoneNumber { .. } | Self::MissingOperatorCode { .. } => FieldKind::Phone,
            Self::InvalidEmail { .. } => FieldKind::Email,
            Self::InvalidBirthday { .. } => FieldKind::Birthday,
        }
    }
}

/// Failures while decoding a serialized field or contact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// `field_name` or `value` absent from a field object.
    #[error("wrong message format: '{key}' missing ('field_name' and 'value' required)")]
    MissingKey { key: &'static str },

    /// `field_name` does not name a registered kind.
    #[error("unknown field_name '{name}'")]
    UnknownKind { name: String },

    /// Structurally wrong JSON (wrong types, non-object entries).
    #[error("malformed entry: {message}")]
    Malformed { message: String },
}

/// Convenience constructor for [`BookError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BookError {
    BookError::Io {
        path: path.into(),
        source,
    }
}
