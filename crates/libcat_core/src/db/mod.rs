//! SQLite connection bootstrap.
//!
//! # Responsibility
//! - Open and configure one SQLite connection per storage operation.
//! - Separate connection failures from statement failures.
//!
//! # Invariants
//! - Connections are never pooled or shared between operations.
//! - Returned connections already have the configured busy timeout.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

mod open;

pub use open::open_db;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    BusyTimeoutOutOfRange(Duration),
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open database `{}`: {source}", path.display())
            }
            Self::BusyTimeoutOutOfRange(timeout) => write!(
                f,
                "busy timeout of {}ms does not fit SQLite's millisecond range",
                timeout.as_millis()
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::BusyTimeoutOutOfRange(_) => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
