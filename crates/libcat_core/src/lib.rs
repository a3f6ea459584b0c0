//! Core logic for the libcat library-catalog demo.
//! In-memory catalog bookkeeping plus a manually synchronized SQLite mirror.

pub mod catalog;
pub mod config;
pub mod db;
pub mod demo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::{Catalog, CatalogError, CatalogResult};
pub use config::{AppConfig, ConfigEnv, ConfigError, DbConfig, LogConfig};
pub use demo::{run_demo, DemoSummary};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{BookId, CatalogEntry, LibraryItem, StoredBook};
pub use model::member::{Member, MemberId};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::book_gateway::{
    BookGateway, DeleteOutcome, InsertOutcome, ListOutcome, OperationFailure, SchemaOutcome,
    UpdateOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
