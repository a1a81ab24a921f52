//! Subcommand implementations and the shared book session.

pub mod book;
pub mod contact;
pub mod field;
pub mod search;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use rolodex_core::{store, AddressBook, Contact, ContactId};

/// `--book` if given, otherwise `~/.rolodex/book.json`.
pub fn resolve_book_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    let path = match flag {
        Some(path) => path,
        None => store::default_path().context("cannot locate the default address book")?,
    };
    tracing::debug!(path = %path.display(), "using address book");
    Ok(path)
}

/// One opened book plus where it came from.
///
/// Mutating commands call [`Session::save`] explicitly; nothing is written
/// back otherwise.
pub struct Session {
    pub path: PathBuf,
    pub book: AddressBook,
}

impl Session {
    pub fn open(path: PathBuf) -> Result<Self> {
        let book = store::open(&path)
            .with_context(|| format!("failed to open address book '{}'", path.display()))?;
        Ok(Self { path, book })
    }

    pub fn save(&self) -> Result<()> {
        save_book(&self.path, &self.book)
    }
}

pub(crate) fn save_book(path: &Path, book: &AddressBook) -> Result<()> {
    store::save(path, book)
        .with_context(|| format!("failed to save address book '{}'", path.display()))
}

/// Parses a raw contact id argument.
pub(crate) fn parse_id(raw: &str) -> Result<ContactId> {
    raw.parse::<ContactId>()
        .with_context(|| format!("bad contact id '{raw}'"))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct ContactTableRow {
    #[tabled(rename = "id")]
    id: ContactId,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "phones")]
    phones: String,
    #[tabled(rename = "birthday")]
    birthday: String,
    #[tabled(rename = "email")]
    email: String,
    #[tabled(rename = "note")]
    note: String,
}

#[derive(Serialize)]
struct ContactSummaryJson<'a> {
    id: ContactId,
    name: String,
    phones: String,
    birthday: &'a str,
    email: &'a str,
    note: &'a str,
}

/// Renders `(id, contact)` pairs as a table, or JSON when `json` is set.
pub(crate) fn print_contacts<'a>(
    contacts: impl IntoIterator<Item = (ContactId, &'a Contact)>,
    json: bool,
) -> Result<()> {
    let contacts: Vec<_> = contacts.into_iter().collect();

    if json {
        let rows: Vec<_> = contacts
            .iter()
            .map(|(id, c)| ContactSummaryJson {
                id: *id,
                name: c.display_name(),
                phones: c.phone_summary(),
                birthday: c.birthday(),
                email: c.email(),
                note: c.note(),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("failed to serialize contacts")?
        );
        return Ok(());
    }

    if contacts.is_empty() {
        println!("No contacts.");
        return Ok(());
    }

    let rows = contacts.iter().map(|(id, c)| ContactTableRow {
        id: *id,
        name: c.display_name(),
        phones: c.phone_summary(),
        birthday: c.birthday().to_owned(),
        email: c.email().to_owned(),
        note: c.note().to_owned(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
