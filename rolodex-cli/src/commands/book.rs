//! Whole-book commands: `kinds`, `clear`, `dump`, `load`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use rolodex_core::{registry, AddressBook};

use super::{save_book, Session};

/// `rolodex kinds` — registry names in registration order.
pub fn kinds() {
    for name in registry::kind_names() {
        println!("{name}");
    }
}

/// `rolodex clear` — overwrites the store with an empty book. The old file
/// is never read, so a corrupt store can still be cleared.
pub fn clear(book_path: &Path) -> Result<()> {
    save_book(book_path, &AddressBook::new())?;
    println!("{} Cleared address book", "✓".green());
    Ok(())
}

/// Arguments for `rolodex dump`.
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Write the document here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl DumpArgs {
    pub fn run(self, session: &Session) -> Result<()> {
        let document = session.book.dump().context("failed to serialize address book")?;
        match self.out {
            Some(path) => {
                std::fs::write(&path, document)
                    .with_context(|| format!("failed to write '{}'", path.display()))?;
                println!(
                    "{} Dumped {} contact(s) to {}",
                    "✓".green(),
                    session.book.len(),
                    path.display()
                );
            }
            None => println!("{document}"),
        }
        Ok(())
    }
}

/// Arguments for `rolodex load`.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// JSON document previously produced by `rolodex dump`.
    pub file: PathBuf,
}

impl LoadArgs {
    /// Replaces the stored book. The store is only rewritten when the whole
    /// document decodes.
    pub fn run(self, book_path: &Path) -> Result<()> {
        let document = std::fs::read_to_string(&self.file)
            .with_context(|| format!("cannot read '{}'", self.file.display()))?;

        let mut book = AddressBook::new();
        book.load(&document).with_context(|| {
            format!(
                "failed to load '{}' ({} contact(s) decoded before the error)",
                self.file.display(),
                book.len()
            )
        })?;
        save_book(book_path, &book)?;
        println!("{} Loaded {} contact(s)", "✓".green(), book.len());
        Ok(())
    }
}
