//! In-memory book catalog.
//!
//! # Responsibility
//! - Own every `CatalogEntry` keyed by its `BookId`.
//! - Count entry constructions independently of current catalog size.
//!
//! # Invariants
//! - Keys are unique; `add` replaces an existing entry silently.
//! - `total_created` is monotonic and never decremented by removals.
//! - The catalog is never synchronized with storage implicitly.

use crate::model::book::{BookId, CatalogEntry};
use log::{debug, info};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound(BookId),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Book with ID {id} not found."),
        }
    }
}

impl Error for CatalogError {}

/// Explicitly owned book catalog.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<BookId, CatalogEntry>,
    created: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, not-yet-added entry and bumps the creation counter.
    pub fn create_entry(
        &mut self,
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> CatalogEntry {
        self.created += 1;
        debug!(
            "event=entry_create module=catalog status=ok book_id={} total_created={}",
            id, self.created
        );
        CatalogEntry::new(id, title, author)
    }

    /// Inserts `entry`, returning the entry it replaced, if any.
    pub fn add(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        let id = entry.id();
        let replaced = self.entries.insert(id, entry);
        info!(
            "event=catalog_add module=catalog status=ok book_id={} replaced={}",
            id,
            replaced.is_some()
        );
        replaced
    }

    pub fn search(&self, id: BookId) -> CatalogResult<&CatalogEntry> {
        self.entries.get(&id).ok_or(CatalogError::NotFound(id))
    }

    pub fn search_mut(&mut self, id: BookId) -> CatalogResult<&mut CatalogEntry> {
        self.entries.get_mut(&id).ok_or(CatalogError::NotFound(id))
    }

    /// Removes and hands back the entry; dropping it releases it.
    pub fn remove(&mut self, id: BookId) -> Option<CatalogEntry> {
        let removed = self.entries.remove(&id);
        info!(
            "event=catalog_remove module=catalog status={} book_id={}",
            if removed.is_some() { "ok" } else { "not_found" },
            id
        );
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates current entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn total_created(&self) -> u64 {
        self.created
    }
}
