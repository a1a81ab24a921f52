//! AddressBook: contacts keyed by monotonically assigned ids.
//!
//! # Invariants
//! - Every key is `< next_id`.
//! - Ids are never reassigned within a session; only [`AddressBook::clear`]
//!   and [`AddressBook::load`] reset the counter to 0.
//! - [`AddressBook::restore`] keeps document keys as ids, so a persisted
//!   book reopens with the ids it was saved under.
//! - Iteration is in ascending id order.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::contact::{Contact, SearchCriteria};
use crate::error::{BookError, BookResult, DecodeError};
use crate::types::{ContactId, IndexArg};

/// Search results: matching contacts under their original ids.
pub type Matches<'a> = BTreeMap<ContactId, &'a Contact>;

/// The in-memory contact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    contacts: BTreeMap<ContactId, Contact>,
    next_id: u64,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// The id the next [`add`](Self::add) will assign.
    pub fn next_id(&self) -> ContactId {
        ContactId(self.next_id)
    }

    /// `(id, contact)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactId, &Contact)> {
        self.contacts.iter().map(|(id, contact)| (*id, contact))
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Stores `contact` under a fresh id and returns it.
    pub fn add(&mut self, contact: Contact) -> ContactId {
        let id = ContactId(self.next_id);
        self.contacts.insert(id, contact);
        self.next_id += 1;
        tracing::debug!(id = %id, "contact added");
        id
    }

    pub fn get(&self, id: ContactId) -> BookResult<&Contact> {
        self.contacts.get(&id).ok_or_else(|| not_found(id))
    }

    pub fn get_mut(&mut self, id: ContactId) -> BookResult<&mut Contact> {
        self.contacts.get_mut(&id).ok_or_else(|| not_found(id))
    }

    /// Swaps the contact stored under an existing id.
    pub fn replace(&mut self, id: ContactId, contact: Contact) -> BookResult<()> {
        let slot = self.get_mut(id)?;
        *slot = contact;
        Ok(())
    }

    /// Removes a contact. Accepts raw text ids from the boundary.
    pub fn delete<I: IndexArg>(&mut self, id: I) -> BookResult<Contact> {
        let parsed = id.parse_index()?;
        let removed = parsed
            .value
            .map(ContactId)
            .and_then(|id| self.contacts.remove(&id).map(|contact| (id, contact)));
        let (id, removed) = removed.ok_or(BookError::NotFound { id: parsed.text })?;
        tracing::debug!(id = %id, "contact deleted");
        Ok(removed)
    }

    /// Empties the book and resets id allocation.
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.next_id = 0;
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Contacts with any field containing `needle`.
    pub fn str_search(&self, needle: &str) -> Matches<'_> {
        self.filter(|contact| contact.contains(needle))
    }

    /// Contacts matching every criterion; all contacts for an empty query.
    pub fn multi_search(&self, criteria: &SearchCriteria) -> Matches<'_> {
        self.filter(|contact| contact.multi_search(criteria))
    }

    fn filter(&self, mut pred: impl FnMut(&Contact) -> bool) -> Matches<'_> {
        self.contacts
            .iter()
            .filter(|&(_, contact)| pred(contact))
            .map(|(id, contact)| (*id, contact))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Document
    // -----------------------------------------------------------------------

    /// Serializes the whole book as `{"<id>": {"fields": [...]}, ...}`.
    pub fn dump(&self) -> BookResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Destructive reload from a JSON document.
    ///
    /// The book is cleared first; contacts are then decoded in document
    /// order and added with fresh ids starting at 0. Document keys are
    /// ignored. The first failing contact aborts the load; contacts added
    /// before it stay in the book.
    pub fn load(&mut self, document: &str) -> BookResult<()> {
        self.clear();
        let entries: Map<String, Value> = serde_json::from_str(document)?;
        for (key, entry) in &entries {
            let contact = Contact::decode(entry).map_err(|err| {
                tracing::warn!(
                    key = %key,
                    loaded = self.contacts.len(),
                    error = %err,
                    "load aborted"
                );
                err
            })?;
            self.add(contact);
        }
        tracing::debug!(contacts = self.contacts.len(), "document loaded");
        Ok(())
    }

    /// Reload that keeps each document key as the contact's id.
    ///
    /// Used for the persisted store. Keys must be non-negative integers;
    /// `next_id` ends one past the largest key. Failure semantics match
    /// [`AddressBook::load`].
    pub fn restore(&mut self, document: &str) -> BookResult<()> {
        self.clear();
        let entries: Map<String, Value> = serde_json::from_str(document)?;
        for (key, entry) in &entries {
            let id = key
                .trim()
                .parse::<u64>()
                .map(ContactId)
                .map_err(|_| DecodeError::Malformed {
                    message: format!("contact key must be a non-negative integer, got '{key}'"),
                })?;
            let contact = Contact::decode(entry).map_err(|err| {
                tracing::warn!(
                    key = %key,
                    restored = self.contacts.len(),
                    error = %err,
                    "restore aborted"
                );
                err
            })?;
            self.contacts.insert(id, contact);
            self.next_id = self.next_id.max(id.0.saturating_add(1));
        }
        tracing::debug!(
            contacts = self.contacts.len(),
            next_id = self.next_id,
            "document restored"
        );
        Ok(())
    }
}

fn not_found(id: ContactId) -> BookError {
    BookError::NotFound { id: id.to_string() }
}

impl Serialize for AddressBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.contacts
                .iter()
                .map(|(id, contact)| (id.to_string(), contact)),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, FieldKind};

    fn named(name: &str) -> Contact {
        Contact::with_fields([Field::new(FieldKind::Name, name).expect("name")])
    }

    #[test]
    fn ids_are_monotonic_and_not_reused() {
        let mut book = AddressBook::new();
        let a = book.add(named("a"));
        let b = book.add(named("b"));
        assert_eq!((a, b), (ContactId(0), ContactId(1)));

        book.delete(b).expect("delete");
        assert_eq!(book.add(named("c")), ContactId(2));
        assert_eq!(book.next_id(), ContactId(3));
    }

    #[test]
    fn clear_resets_counter() {
        let mut book = AddressBook::new();
        book.add(named("a"));
        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.add(named("b")), ContactId(0));
    }

    #[test]
    fn get_and_replace_report_not_found() {
        let mut book = AddressBook::new();
        assert!(matches!(
            book.get(ContactId(4)),
            Err(BookError::NotFound { ref id }) if id == "4"
        ));
        assert!(matches!(
            book.replace(ContactId(0), named("x")),
            Err(BookError::NotFound { ref id }) if id == "0"
        ));

        let id = book.add(named("a"));
        book.replace(id, named("z")).expect("replace");
        assert_eq!(book.get(id).expect("get").display_name(), "z");
    }

    #[test]
    fn delete_distinguishes_bad_text_from_missing_id() {
        let mut book = AddressBook::new();
        book.add(named("a"));
        assert!(matches!(
            book.delete("abc"),
            Err(BookError::InvalidIndex { .. })
        ));
        assert!(matches!(
            book.delete(999),
            Err(BookError::NotFound { ref id }) if id == "999"
        ));
        assert!(matches!(
            book.delete("-1"),
            Err(BookError::NotFound { ref id }) if id == "-1"
        ));
        book.delete(" 0 ").expect("text id");
        assert!(book.is_empty());
    }

    #[test]
    fn delete_reports_huge_ids_as_missing() {
        let mut book = AddressBook::new();
        book.add(named("a"));
        assert!(matches!(
            book.delete("99999999999999999999"),
            Err(BookError::NotFound { ref id }) if id == "99999999999999999999"
        ));
        assert!(matches!(
            book.delete(u64::MAX),
            Err(BookError::NotFound { ref id }) if *id == u64::MAX.to_string()
        ));
        assert!(matches!(
            book.get(ContactId(u64::MAX)),
            Err(BookError::NotFound { ref id }) if *id == u64::MAX.to_string()
        ));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut book = AddressBook::new();
        let id = book.add(Contact::new());
        book.get_mut(id)
            .expect("get_mut")
            .add(Field::new(FieldKind::Note, "hi").expect("note"));
        assert_eq!(book.get(id).expect("get").note(), "hi");
    }

    #[test]
    fn dump_orders_keys_numerically() {
        let mut book = AddressBook::new();
        for i in 0..11 {
            book.add(named(&i.to_string()));
        }
        book.delete(1).expect("delete");
        let text = book.dump().expect("dump");
        let pos = |key: &str| text.find(&format!("\"{key}\":")).expect("key present");
        assert!(pos("2") < pos("10"));
        assert!(!text.contains("\"1\":"));
    }

    #[test]
    fn load_renumbers_in_document_order() {
        let mut book = AddressBook::new();
        book.add(named("stale"));
        book.load(
            r#"{"7": {"fields": [{"value": "Bo", "field_name": "Name"}]},
                "3": {"fields": []},
                "1": {"fields": null}}"#,
        )
        .expect("load");
        assert_eq!(book.len(), 3);
        assert_eq!(book.get(ContactId(0)).expect("first").display_name(), "B o");
        assert!(book.get(ContactId(2)).expect("third").is_empty());
        assert_eq!(book.next_id(), ContactId(3));
    }

    #[test]
    fn restore_keeps_document_ids() {
        let mut book = AddressBook::new();
        book.add(named("stale"));
        book.restore(
            r#"{"2": {"fields": [{"value": "C", "field_name": "Name"}]},
                "5": {"fields": []}}"#,
        )
        .expect("restore");
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(ContactId(2)).expect("kept id").display_name(), "C");
        assert!(book.get(ContactId(0)).is_err());
        assert_eq!(book.next_id(), ContactId(6));
        assert_eq!(book.add(named("d")), ContactId(6));
    }

    #[test]
    fn restore_rejects_non_integer_keys() {
        let mut book = AddressBook::new();
        let err = book.restore(r#"{"x": {"fields": []}}"#).unwrap_err();
        assert!(matches!(err, BookError::Decode(DecodeError::Malformed { .. })));
        let err = book.restore(r#"{"-1": {"fields": []}}"#).unwrap_err();
        assert!(matches!(err, BookError::Decode(DecodeError::Malformed { .. })));
        assert!(book.is_empty());
    }

    #[test]
    fn load_rejects_non_object_document() {
        let mut book = AddressBook::new();
        book.add(named("a"));
        assert!(matches!(book.load("[1, 2]"), Err(BookError::Json(_))));
        assert!(matches!(book.load("not json"), Err(BookError::Json(_))));
        assert!(book.is_empty());
    }
}
