//! Persistence gateway for catalog entries.
//!
//! # Responsibility
//! - Run each storage operation on its own short-lived connection.
//! - Convert every repository error into a reportable outcome value.
//!
//! # Invariants
//! - The connection is dropped before an operation returns, on every path.
//! - No operation returns `Err`; failures are logged and handed back as
//!   `Failed(OperationFailure)` so callers can always continue.
//! - Gateway calls never read or write the in-memory catalog.

use crate::config::DbConfig;
use crate::db::open_db;
use crate::model::book::{BookId, CatalogEntry, StoredBook};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
use log::{error, info, warn};
use std::fmt::{Display, Formatter};

pub const OP_CREATE_TABLE: &str = "createTable";
pub const OP_SAVE_BOOK: &str = "saveBookToDB";
pub const OP_FETCH_BOOKS: &str = "fetchBooksFromDB";
pub const OP_UPDATE_STATUS: &str = "updateBookStatus";
pub const OP_DELETE_BOOK: &str = "deleteBookFromDB";

/// Non-fatal storage failure labelled with the operation that hit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    pub operation: &'static str,
    pub message: String,
}

impl OperationFailure {
    fn new(operation: &'static str, err: &RepoError) -> Self {
        Self {
            operation,
            message: err.to_string(),
        }
    }
}

impl Display for OperationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DB Error ({}): {}", self.operation, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOutcome {
    Ensured,
    Failed(OperationFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Saved,
    Duplicate(BookId),
    Failed(OperationFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    /// Rows in storage-engine order.
    Rows(Vec<StoredBook>),
    Failed(OperationFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound(BookId),
    Failed(OperationFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound(BookId),
    Failed(OperationFailure),
}

impl Display for SchemaOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ensured => f.write_str("Table 'books' ensured in DB."),
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

impl Display for InsertOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved => f.write_str("Book saved to DB."),
            Self::Duplicate(id) => write!(f, "Book already exists in DB (id={id})."),
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

impl Display for ListOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rows(rows) => {
                f.write_str("\nBooks in DB:")?;
                for row in rows {
                    write!(f, "\n{row}")?;
                }
                Ok(())
            }
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

impl Display for UpdateOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Updated => f.write_str("Book status updated in DB."),
            Self::NotFound(_) => f.write_str("Book not found in DB."),
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

impl Display for DeleteOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deleted => f.write_str("Book deleted from DB."),
            Self::NotFound(_) => f.write_str("Book not found in DB."),
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

/// Stateless gateway: holds only connection parameters.
#[derive(Debug, Clone)]
pub struct BookGateway {
    config: DbConfig,
}

impl BookGateway {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Creates the `books` table when absent. Idempotent.
    pub fn ensure_schema(&self) -> SchemaOutcome {
        match self.with_repo(|repo| repo.ensure_schema()) {
            Ok(()) => {
                info!("event=ensure_schema module=gateway status=ok");
                SchemaOutcome::Ensured
            }
            Err(err) => SchemaOutcome::Failed(log_failure(OP_CREATE_TABLE, &err)),
        }
    }

    /// Mirrors `entry` into storage as a new row.
    pub fn insert(&self, entry: &CatalogEntry) -> InsertOutcome {
        let book = StoredBook::from(entry);
        match self.with_repo(|repo| repo.insert_book(&book)) {
            Ok(()) => {
                info!(
                    "event=insert_book module=gateway status=ok book_id={}",
                    book.id
                );
                InsertOutcome::Saved
            }
            Err(RepoError::Duplicate(id)) => {
                warn!("event=insert_book module=gateway status=duplicate book_id={id}");
                InsertOutcome::Duplicate(id)
            }
            Err(err) => InsertOutcome::Failed(log_failure(OP_SAVE_BOOK, &err)),
        }
    }

    /// Reads every stored row without imposing an order.
    pub fn list_all(&self) -> ListOutcome {
        match self.with_repo(|repo| repo.list_books()) {
            Ok(rows) => {
                info!(
                    "event=list_books module=gateway status=ok row_count={}",
                    rows.len()
                );
                ListOutcome::Rows(rows)
            }
            Err(err) => ListOutcome::Failed(log_failure(OP_FETCH_BOOKS, &err)),
        }
    }

    pub fn update_issued(&self, id: BookId, issued: bool) -> UpdateOutcome {
        match self.with_repo(|repo| repo.update_issued(id, issued)) {
            Ok(()) => {
                info!(
                    "event=update_issued module=gateway status=ok book_id={id} issued={issued}"
                );
                UpdateOutcome::Updated
            }
            Err(RepoError::NotFound(missing)) => {
                warn!("event=update_issued module=gateway status=not_found book_id={missing}");
                UpdateOutcome::NotFound(missing)
            }
            Err(err) => UpdateOutcome::Failed(log_failure(OP_UPDATE_STATUS, &err)),
        }
    }

    pub fn delete(&self, id: BookId) -> DeleteOutcome {
        match self.with_repo(|repo| repo.delete_book(id)) {
            Ok(()) => {
                info!("event=delete_book module=gateway status=ok book_id={id}");
                DeleteOutcome::Deleted
            }
            Err(RepoError::NotFound(missing)) => {
                warn!("event=delete_book module=gateway status=not_found book_id={missing}");
                DeleteOutcome::NotFound(missing)
            }
            Err(err) => DeleteOutcome::Failed(log_failure(OP_DELETE_BOOK, &err)),
        }
    }

    fn with_repo<T>(
        &self,
        op: impl FnOnce(&SqliteBookRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = open_db(&self.config)?;
        let repo = SqliteBookRepository::new(&conn);
        op(&repo)
    }
}

fn log_failure(operation: &'static str, err: &RepoError) -> OperationFailure {
    error!(
        "event=gateway_failure module=gateway status=error operation={} error={}",
        operation, err
    );
    OperationFailure::new(operation, err)
}
