//! Scripted create/read/update/delete walkthrough.
//!
//! # Responsibility
//! - Drive catalog and gateway calls in a fixed linear order.
//! - Write one human-readable status line per step to the given sink.
//!
//! # Invariants
//! - Storage failures never stop the script; every step runs.
//! - Book 202 is deleted from storage only, so catalog and storage diverge
//!   by the end of the run.

use crate::catalog::Catalog;
use crate::model::book::BookId;
use crate::model::member::Member;
use crate::service::book_gateway::BookGateway;
use log::info;
use std::io::{self, Write};

pub const ISSUED_BOOK_ID: BookId = 201;
pub const DELETED_BOOK_ID: BookId = 202;
pub const MISSING_BOOK_ID: BookId = 203;

/// What the in-memory side looked like when the script finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSummary {
    pub catalog_len: usize,
    pub total_created: u64,
}

/// Runs the walkthrough against `gateway`, writing console lines to `out`.
///
/// # Errors
/// Returns an error only when writing to `out` fails.
pub fn run_demo(gateway: &BookGateway, out: &mut impl Write) -> io::Result<DemoSummary> {
    info!("event=demo_run module=demo status=start");

    writeln!(out, "{}", gateway.ensure_schema())?;

    let members = [Member::new(1, "John"), Member::new(2, "Sophia")];
    for member in &members {
        writeln!(out, "{member}")?;
    }

    let mut catalog = Catalog::new();
    let first = catalog.create_entry(ISSUED_BOOK_ID, "Java Programming", "James Gosling");
    let second = catalog.create_entry(DELETED_BOOK_ID, "Database Systems", "C. J. Date");
    for entry in [first, second] {
        catalog.add(entry);
        writeln!(out, "Book added successfully!")?;
    }

    for id in [ISSUED_BOOK_ID, DELETED_BOOK_ID] {
        if let Ok(entry) = catalog.search(id) {
            writeln!(out, "{entry}")?;
        }
    }

    for id in [ISSUED_BOOK_ID, DELETED_BOOK_ID] {
        if let Ok(entry) = catalog.search(id) {
            writeln!(out, "{}", gateway.insert(entry))?;
        }
    }

    writeln!(out, "{}", gateway.list_all())?;

    if let Ok(entry) = catalog.search_mut(ISSUED_BOOK_ID) {
        entry.issue();
        let outcome = gateway.update_issued(entry.id(), entry.is_issued());
        writeln!(out, "{outcome}")?;
    }
    writeln!(out, "{}", gateway.list_all())?;

    writeln!(out, "{}", gateway.delete(DELETED_BOOK_ID))?;
    writeln!(out, "{}", gateway.list_all())?;

    match catalog.search(MISSING_BOOK_ID) {
        Ok(entry) => writeln!(out, "{entry}")?,
        Err(err) => writeln!(out, "Exception Caught: {err}")?,
    }

    writeln!(
        out,
        "Total Books in Library (in-memory): {}",
        catalog.total_created()
    )?;

    let summary = DemoSummary {
        catalog_len: catalog.len(),
        total_created: catalog.total_created(),
    };
    info!(
        "event=demo_run module=demo status=ok catalog_len={} total_created={}",
        summary.catalog_len, summary.total_created
    );
    Ok(summary)
}
