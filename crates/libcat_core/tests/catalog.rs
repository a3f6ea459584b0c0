use libcat_core::{Catalog, CatalogError, LibraryItem};

#[test]
fn add_then_search_returns_matching_fields() {
    let mut catalog = Catalog::new();
    let books = [
        (1, "Dune", "Frank Herbert"),
        (42, "Hyperion", "Dan Simmons"),
        (-7, "", "Anonymous"),
    ];

    for (id, title, author) in books {
        let entry = catalog.create_entry(id, title, author);
        assert!(catalog.add(entry).is_none());
    }

    for (id, title, author) in books {
        let found = catalog.search(id).unwrap();
        assert_eq!(found.id(), id);
        assert_eq!(found.title(), title);
        assert_eq!(found.author(), author);
        assert!(!found.is_issued());
    }
    assert_eq!(catalog.len(), 3);
}

#[test]
fn search_for_absent_id_reports_not_found_with_id() {
    let mut catalog = Catalog::new();
    let first = catalog.create_entry(201, "Java Programming", "James Gosling");
    let second = catalog.create_entry(202, "Database Systems", "C. J. Date");
    catalog.add(first);
    catalog.add(second);

    let err = catalog.search(203).unwrap_err();
    assert_eq!(err, CatalogError::NotFound(203));
    assert_eq!(err.to_string(), "Book with ID 203 not found.");
    assert!(matches!(
        catalog.search_mut(203),
        Err(CatalogError::NotFound(203))
    ));
}

#[test]
fn add_replaces_existing_entry_silently() {
    let mut catalog = Catalog::new();
    let original = catalog.create_entry(5, "Old Title", "Old Author");
    let replacement = catalog.create_entry(5, "New Title", "New Author");

    assert!(catalog.add(original).is_none());
    let replaced = catalog.add(replacement).unwrap();

    assert_eq!(replaced.title(), "Old Title");
    assert_eq!(catalog.search(5).unwrap().title(), "New Title");
    assert_eq!(catalog.len(), 1);
}

#[test]
fn total_created_counts_constructions_not_current_size() {
    let mut catalog = Catalog::new();
    assert_eq!(catalog.total_created(), 0);
    assert!(catalog.is_empty());

    let kept = catalog.create_entry(1, "Kept", "A");
    let removed = catalog.create_entry(2, "Removed", "B");
    let _never_added = catalog.create_entry(3, "Never Added", "C");
    catalog.add(kept);
    catalog.add(removed);

    assert!(catalog.remove(2).is_some());
    assert!(catalog.remove(2).is_none());

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.total_created(), 3);
}

#[test]
fn issue_and_return_through_search_mut() {
    let mut catalog = Catalog::new();
    let entry = catalog.create_entry(9, "SICP", "Abelson");
    catalog.add(entry);

    catalog.search_mut(9).unwrap().issue();
    assert!(catalog.search(9).unwrap().is_issued());

    catalog.search_mut(9).unwrap().return_entry();
    assert!(!catalog.search(9).unwrap().is_issued());
}

#[test]
fn entries_iterates_every_current_entry() {
    let mut catalog = Catalog::new();
    for id in [10, 11, 12] {
        let entry = catalog.create_entry(id, format!("Title {id}"), "Author");
        catalog.add(entry);
    }

    let mut ids: Vec<_> = catalog.entries().map(|entry| entry.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![10, 11, 12]);
}

#[test]
fn releasing_replaced_and_removed_entries_keeps_the_counter() {
    let mut catalog = Catalog::new();
    let original = catalog.create_entry(1, "First Edition", "A");
    let reprint = catalog.create_entry(1, "Second Edition", "A");
    catalog.add(original);

    let replaced = catalog.add(reprint).unwrap();
    drop(replaced);
    assert_eq!(catalog.total_created(), 2);

    let removed = catalog.remove(1).unwrap();
    assert_eq!(removed.title(), "Second Edition");
    drop(removed);

    assert!(catalog.is_empty());
    assert_eq!(catalog.total_created(), 2);
    assert!(matches!(catalog.search(1), Err(CatalogError::NotFound(1))));
}
