//! Repository layer over the `books` table.
//!
//! # Responsibility
//! - Define the storage contract used by the persistence gateway.
//! - Isolate SQLite statement details from gateway orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`Duplicate`, `NotFound`) in
//!   addition to DB transport errors.

pub mod book_repo;
