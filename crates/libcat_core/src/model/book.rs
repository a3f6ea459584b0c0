//! Book records.
//!
//! # Responsibility
//! - Define the in-memory catalog entry and its issue/return lifecycle.
//! - Define the row shape read back from the `books` table.
//!
//! # Invariants
//! - `CatalogEntry` values are only constructed by `Catalog::create_entry`,
//!   so the catalog creation counter matches construction calls exactly.
//! - `issued` starts as `false` for every new entry.

use log::debug;
use std::fmt::{Display, Formatter};

/// Stable integer identifier of a book, shared by catalog and storage.
pub type BookId = i64;

/// Common read surface of anything lendable by the library.
pub trait LibraryItem {
    fn title(&self) -> &str;
    fn author(&self) -> &str;

    /// One-line human-readable summary used by console output.
    fn describe(&self) -> String;
}

/// In-memory book tracked by the catalog.
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    id: BookId,
    title: String,
    author: String,
    issued: bool,
}

impl CatalogEntry {
    pub(crate) fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            issued: false,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn is_issued(&self) -> bool {
        self.issued
    }

    /// Marks the book as lent out.
    pub fn issue(&mut self) {
        self.issued = true;
    }

    /// Marks the book as back on the shelf.
    pub fn return_entry(&mut self) {
        self.issued = false;
    }
}

impl LibraryItem for CatalogEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Display for CatalogEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[BOOK] ID: {}, Title: {}, Author: {}, Issued: {}",
            self.id, self.title, self.author, self.issued
        )
    }
}

impl Drop for CatalogEntry {
    fn drop(&mut self) {
        debug!(
            "event=entry_released module=model status=ok book_id={}",
            self.id
        );
    }
}

/// Book row as persisted in the `books` table.
///
/// Storage is synchronized manually, so a `StoredBook` may disagree with the
/// catalog entry carrying the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBook {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub issued: bool,
}

impl From<&CatalogEntry> for StoredBook {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            author: entry.author.clone(),
            issued: entry.issued,
        }
    }
}

impl LibraryItem for StoredBook {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Display for StoredBook {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Issued: {}",
            self.id, self.title, self.author, self.issued
        )
    }
}
