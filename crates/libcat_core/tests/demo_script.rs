use libcat_core::{run_demo, BookGateway, DbConfig, DemoSummary, ListOutcome, StoredBook};

const EXPECTED_FIRST_RUN: &str = "\
Table 'books' ensured in DB.
[MEMBER] ID: 1, Name: John
[MEMBER] ID: 2, Name: Sophia
Book added successfully!
Book added successfully!
[BOOK] ID: 201, Title: Java Programming, Author: James Gosling, Issued: false
[BOOK] ID: 202, Title: Database Systems, Author: C. J. Date, Issued: false
Book saved to DB.
Book saved to DB.

Books in DB:
ID: 201, Title: Java Programming, Author: James Gosling, Issued: false
ID: 202, Title: Database Systems, Author: C. J. Date, Issued: false
Book status updated in DB.

Books in DB:
ID: 201, Title: Java Programming, Author: James Gosling, Issued: true
ID: 202, Title: Database Systems, Author: C. J. Date, Issued: false
Book deleted from DB.

Books in DB:
ID: 201, Title: Java Programming, Author: James Gosling, Issued: true
Exception Caught: Book with ID 203 not found.
Total Books in Library (in-memory): 2
";

fn run(gateway: &BookGateway) -> (String, DemoSummary) {
    let mut out = Vec::new();
    let summary = run_demo(gateway, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

#[test]
fn first_run_walks_the_full_crud_script() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = BookGateway::new(DbConfig::new(dir.path().join("library.sqlite3")));

    let (output, summary) = run(&gateway);

    assert_eq!(output, EXPECTED_FIRST_RUN);
    assert_eq!(
        summary,
        DemoSummary {
            catalog_len: 2,
            total_created: 2,
        }
    );
    assert_eq!(
        gateway.list_all(),
        ListOutcome::Rows(vec![StoredBook {
            id: 201,
            title: "Java Programming".to_string(),
            author: "James Gosling".to_string(),
            issued: true,
        }])
    );
}

#[test]
fn second_run_against_same_database_reports_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = BookGateway::new(DbConfig::new(dir.path().join("library.sqlite3")));
    run(&gateway);

    let (output, summary) = run(&gateway);

    assert!(output.contains("Book already exists in DB (id=201).\nBook saved to DB.\n"));
    assert!(output.ends_with("Total Books in Library (in-memory): 2\n"));
    assert_eq!(summary.total_created, 2);
}

#[test]
fn storage_failures_do_not_stop_the_script() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = BookGateway::new(DbConfig::new(
        dir.path().join("no-such-dir").join("library.sqlite3"),
    ));

    let (output, summary) = run(&gateway);

    for operation in [
        "createTable",
        "saveBookToDB",
        "fetchBooksFromDB",
        "updateBookStatus",
        "deleteBookFromDB",
    ] {
        assert!(
            output.contains(&format!("DB Error ({operation}): ")),
            "missing failure line for {operation}"
        );
    }
    assert!(!output.contains("Books in DB:"));
    assert!(output.contains("Exception Caught: Book with ID 203 not found."));
    assert!(output.ends_with("Total Books in Library (in-memory): 2\n"));
    assert_eq!(summary.catalog_len, 2);
}
