//! Connection bootstrap utilities for SQLite.
//!
//! # Invariants
//! - Returned connections have the configured busy timeout applied.
//! - Failures are logged with duration before being returned.

use super::{DbError, DbResult};
use crate::config::DbConfig;
use log::{debug, error};
use rusqlite::Connection;
use std::time::Instant;

/// Opens the configured SQLite database file.
///
/// The file is created when absent; its parent directory must exist.
/// A busy timeout beyond `i32::MAX` milliseconds is rejected before opening.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(config: &DbConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    if i32::try_from(config.busy_timeout.as_millis()).is_err() {
        error!(
            "event=db_open module=db status=error error_code=busy_timeout_out_of_range busy_timeout_ms={}",
            config.busy_timeout.as_millis()
        );
        return Err(DbError::BusyTimeoutOutOfRange(config.busy_timeout));
    }

    debug!(
        "event=db_open module=db status=start path={}",
        config.path.display()
    );

    let conn = match Connection::open(&config.path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::Open {
                path: config.path.clone(),
                source: err,
            });
        }
    };

    if let Err(err) = conn.busy_timeout(config.busy_timeout) {
        error!(
            "event=db_open module=db status=error duration_ms={} error_code=db_bootstrap_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err.into());
    }

    debug!(
        "event=db_open module=db status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}
