//! JSON file store for the address book.
//!
//! # Storage layout
//!
//! ```text
//! ~/.rolodex/
//!   book.json        (mode 0600)
//! ```
//!
//! # API pattern
//!
//! Path-deriving functions have two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Nothing here runs implicitly: the caller decides when to open and when
//! to save.

use std::path::{Path, PathBuf};

use crate::book::AddressBook;
use crate::error::{io_err, BookError};

const STORE_DIR: &str = ".rolodex";
const BOOK_FILE: &str = "book.json";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.rolodex/book.json` — pure, no I/O.
pub fn default_path_at(home: &Path) -> PathBuf {
    home.join(STORE_DIR).join(BOOK_FILE)
}

/// `default_path_at` convenience wrapper.
pub fn default_path() -> Result<PathBuf, BookError> {
    Ok(default_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Open
// ---------------------------------------------------------------------------

/// Reads the book at `path`.
///
/// A missing file yields an empty book. Contacts keep the ids they were
/// saved under; see [`AddressBook::restore`].
pub fn open(path: &Path) -> Result<AddressBook, BookError> {
    let mut book = AddressBook::new();
    if !path.exists() {
        tracing::info!(path = %path.display(), "no book file yet; starting empty");
        return Ok(book);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    book.restore(&contents)?;
    tracing::info!(path = %path.display(), contacts = book.len(), "book opened");
    Ok(book)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically writes `book` to `path`.
///
/// Write flow: serialize → `<file>.tmp` sibling → `chmod 0600` → `rename`.
pub fn save(path: &Path, book: &AddressBook) -> Result<(), BookError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
            set_dir_permissions(dir)?;
        }
    }

    let tmp_path = tmp_path_for(path);
    let json = book.dump()?;
    std::fs::write(&tmp_path, json).map_err(|e| io_err(&tmp_path, e))?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;
    tracing::info!(path = %path.display(), contacts = book.len(), "book saved");
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| BOOK_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, BookError> {
    dirs::home_dir().ok_or(BookError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), BookError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), BookError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), BookError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), BookError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Contact;
    use crate::field::{Field, FieldKind};
    use crate::types::ContactId;
    use tempfile::TempDir;

    fn make_home() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    fn sample_book() -> AddressBook {
        let mut book = AddressBook::new();
        book.add(Contact::with_fields([
            Field::new(FieldKind::Name, "Alice").expect("name"),
            Field::new(FieldKind::Phone, "0991234567").expect("phone"),
        ]));
        book
    }

    #[test]
    fn default_path_is_correct() {
        let home = make_home();
        let path = default_path_at(home.path());
        assert!(path.ends_with(".rolodex/book.json"));
    }

    #[test]
    fn open_missing_file_gives_empty_book() {
        let home = make_home();
        let book = open(&default_path_at(home.path())).expect("open");
        assert!(book.is_empty());
    }

    #[test]
    fn save_and_open_roundtrip() {
        let home = make_home();
        let path = default_path_at(home.path());
        save(&path, &sample_book()).expect("save");
        let loaded = open(&path).expect("open");
        assert_eq!(loaded, sample_book());
    }

    #[test]
    fn reopen_keeps_ids_after_deletes() {
        let home = make_home();
        let path = default_path_at(home.path());
        let mut book = sample_book();
        let kept = book.add(Contact::with_fields([
            Field::new(FieldKind::Name, "Bob").expect("name"),
        ]));
        book.delete(0).expect("delete");
        save(&path, &book).expect("save");

        let mut reopened = open(&path).expect("open");
        assert_eq!(reopened, book);
        assert_eq!(reopened.get(kept).expect("kept").display_name(), "B o b");
        assert_eq!(reopened.add(Contact::new()), ContactId(2));
    }

    #[test]
    fn atomic_write_cleans_up_tmp() {
        let home = make_home();
        let path = default_path_at(home.path());
        save(&path, &sample_book()).expect("save");
        assert!(!path.with_file_name("book.json.tmp").exists());
    }

    #[test]
    fn saved_file_has_private_perms() {
        let home = make_home();
        let path = default_path_at(home.path());
        save(&path, &sample_book()).expect("save");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600);
            let dir_mode = std::fs::metadata(path.parent().unwrap())
                .unwrap()
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(dir_mode, 0o700);
        }
    }

    #[test]
    fn open_directory_is_io_error() {
        let home = make_home();
        let err = open(home.path()).unwrap_err();
        assert!(matches!(err, BookError::Io { .. }), "got: {err}");
    }
}
