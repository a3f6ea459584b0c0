//! Library record types shared by catalog, storage and driver code.
//!
//! # Responsibility
//! - Define the book and member records handled by the catalog demo.
//! - Keep the in-memory entry separate from the row read back from storage.
//!
//! # Invariants
//! - A `CatalogEntry` identifier never changes after construction.
//! - `StoredBook` is a snapshot; mutating it never touches the catalog.

pub mod book;
pub mod member;
