//! Storage-facing use-case services.
//!
//! # Responsibility
//! - Wrap repository calls with connection scoping and failure reporting.
//! - Keep the driver decoupled from SQLite details.

pub mod book_gateway;
