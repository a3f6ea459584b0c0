//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Keep the `books` table SQL inside the storage boundary.
//! - Map SQLite outcomes onto semantic errors (`Duplicate`, `NotFound`).
//!
//! # Invariants
//! - Each method runs exactly one statement on the borrowed connection.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::book::{BookId, StoredBook};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CREATE_BOOKS_SQL: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    title VARCHAR(200),
    author VARCHAR(200),
    issued BOOLEAN
);";

const BOOK_SELECT_SQL: &str = "SELECT id, title, author, issued FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Duplicate(BookId),
    NotFound(BookId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Duplicate(id) => write!(f, "book already exists: {id}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Duplicate(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for `books` table access.
pub trait BookRepository {
    fn ensure_schema(&self) -> RepoResult<()>;
    fn insert_book(&self, book: &StoredBook) -> RepoResult<()>;
    fn list_books(&self) -> RepoResult<Vec<StoredBook>>;
    fn update_issued(&self, id: BookId, issued: bool) -> RepoResult<()>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn ensure_schema(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_BOOKS_SQL)?;
        Ok(())
    }

    fn insert_book(&self, book: &StoredBook) -> RepoResult<()> {
        let result = self.conn.execute(
            "INSERT INTO books (id, title, author, issued) VALUES (?1, ?2, ?3, ?4);",
            params![
                book.id,
                book.title.as_str(),
                book.author.as_str(),
                bool_to_int(book.issued),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_constraint_violation(&err) => Err(RepoError::Duplicate(book.id)),
            Err(err) => Err(err.into()),
        }
    }

    fn list_books(&self) -> RepoResult<Vec<StoredBook>> {
        let mut stmt = self.conn.prepare(BOOK_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn update_issued(&self, id: BookId, issued: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE books SET issued = ?1 WHERE id = ?2;",
            params![bool_to_int(issued), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<StoredBook> {
    let id: BookId = row.get("id")?;
    let issued = match row.get::<_, Option<i64>>("issued")? {
        Some(0) | None => false,
        Some(1) => true,
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid issued value `{other}` in books.issued for id {id}"
            )));
        }
    };

    Ok(StoredBook {
        id,
        title: row.get::<_, Option<String>>("title")?.unwrap_or_default(),
        author: row.get::<_, Option<String>>("author")?.unwrap_or_default(),
        issued,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
