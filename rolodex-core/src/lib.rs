//! Rolodex core library — fields, contacts, the address book, and its store.
//!
//! - [`field`] / [`registry`] — validated field kinds and their lookup table
//! - [`contact`] — index-addressable field lists with search and views
//! - [`book`] — [`AddressBook`] with id allocation, search, load/dump
//! - [`store`] — JSON file open/save
//! - [`error`] — [`BookError`]

pub mod book;
pub mod contact;
pub mod error;
pub mod field;
pub mod phone;
pub mod registry;
pub mod store;
pub mod types;

pub use book::{AddressBook, Matches};
pub use contact::{Contact, SearchCriteria, NO_NAME};
pub use error::{BookError, BookResult, DecodeError, ValidationError};
pub use field::{Field, FieldKind};
pub use phone::PhoneNumber;
pub use types::{ContactId, IndexArg, ParsedIndex};
