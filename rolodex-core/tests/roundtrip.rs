//! Dump/load roundtrip tests for `rolodex-core`.
//!
//! Each `#[case]` is isolated — no shared state.

use rolodex_core::{AddressBook, Contact, ContactId, Field, FieldKind};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn field(kind: FieldKind, raw: &str) -> Field {
    Field::new(kind, raw).expect("valid field")
}

fn empty_book() -> AddressBook {
    AddressBook::new()
}

fn full_book() -> AddressBook {
    let mut book = AddressBook::new();
    book.add(Contact::with_fields([
        field(FieldKind::Name, "Alice"),
        field(FieldKind::Phone, "+380991234567"),
        field(FieldKind::Email, "alice@example.com"),
        field(FieldKind::Birthday, "29.02.2000"),
        field(FieldKind::Note, "met at the conference"),
    ]));
    book.add(Contact::with_fields([
        field(FieldKind::Phone, "067 111 22 33"),
        field(FieldKind::Phone, "44(050)7654321"),
    ]));
    book
}

fn sparse_ids_book() -> AddressBook {
    let mut book = AddressBook::new();
    for name in ["a", "b", "c", "d"] {
        book.add(Contact::with_fields([field(FieldKind::Name, name)]));
    }
    book.delete(0).expect("delete 0");
    book.delete(2).expect("delete 2");
    book
}

fn unicode_book() -> AddressBook {
    let mut book = AddressBook::new();
    book.add(Contact::with_fields([
        field(FieldKind::Name, "Олександр 李"),
        field(FieldKind::Note, "émojis 🚀 & quotes \"'<>"),
    ]));
    book.add(Contact::new());
    book
}

fn pairs(contact: &Contact) -> Vec<(FieldKind, String)> {
    contact
        .fields()
        .iter()
        .map(|f| (f.kind(), f.value().to_owned()))
        .collect()
}

// ---------------------------------------------------------------------------
// Parameterised roundtrip test
// ---------------------------------------------------------------------------

#[rstest]
#[case("empty", empty_book())]
#[case("all_kinds", full_book())]
#[case("sparse_ids", sparse_ids_book())]
#[case("unicode_strings", unicode_book())]
fn book_roundtrip(#[case] label: &str, #[case] book: AddressBook) {
    let document = book
        .dump()
        .unwrap_or_else(|e| panic!("[{label}] dump failed: {e}"));
    let mut back = AddressBook::new();
    back.load(&document)
        .unwrap_or_else(|e| panic!("[{label}] load failed: {e}"));

    assert_eq!(book.len(), back.len(), "[{label}] contact count");
    for (index, ((_, orig), (id, got))) in book.iter().zip(back.iter()).enumerate() {
        assert_eq!(id, ContactId(index as u64), "[{label}] renumbered id");
        assert_eq!(pairs(orig), pairs(got), "[{label}] fields of contact {index}");
    }
}

#[test]
fn sparse_ids_are_renumbered_from_zero() {
    let book = sparse_ids_book();
    let ids: Vec<_> = book.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, [ContactId(1), ContactId(3)]);

    let mut back = AddressBook::new();
    back.load(&book.dump().expect("dump")).expect("load");
    let ids: Vec<_> = back.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, [ContactId(0), ContactId(1)]);
    assert_eq!(back.next_id(), ContactId(2));
}

// ---------------------------------------------------------------------------
// Field kinds survive the wire (all variants)
// ---------------------------------------------------------------------------

#[rstest]
#[case(FieldKind::Name, "Bob")]
#[case(FieldKind::Phone, "+440501234567")]
#[case(FieldKind::Email, "bob@mail.org")]
#[case(FieldKind::Birthday, "07.11.1990")]
#[case(FieldKind::Note, "")]
fn field_kind_roundtrip(#[case] kind: FieldKind, #[case] raw: &str) {
    let original = field(kind, raw);
    let json = serde_json::to_value(&original).expect("serialize");
    assert_eq!(json["field_name"], kind.name());
    let back = Field::decode(&json).expect("decode");
    assert_eq!(back, original);
}
