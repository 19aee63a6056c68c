use bookshelf_core::{
    Book, BookStatus, Catalog, CatalogError, CatalogEvent, CatalogRepository, MemoryReporter,
    MemoryRepository, Operation, RepoError, RepoResult,
};

fn open_empty() -> (Catalog<MemoryRepository>, MemoryRepository, MemoryReporter) {
    let repo = MemoryRepository::new();
    let reporter = MemoryReporter::new();
    let catalog = Catalog::open(repo.clone(), reporter.clone());
    (catalog, repo, reporter)
}

fn test_driven() -> Book {
    Book::new("Test Driven", "Author A", "ISBN-1234")
}

#[test]
fn open_without_stored_content_starts_empty() {
    let (catalog, repo, reporter) = open_empty();

    assert!(catalog.is_empty());
    assert_eq!(repo.save_count(), 0);
    assert_eq!(
        reporter.events(),
        vec![CatalogEvent::StartedEmpty {
            location: "memory".to_string()
        }]
    );
}

#[test]
fn add_appends_in_order_and_persists_each_time() {
    let (mut catalog, repo, _reporter) = open_empty();

    assert!(catalog.add_book(test_driven()));
    assert!(catalog.add_book(Book::new("Second", "Author B", "ISBN-2")));

    let isbns: Vec<&str> = catalog.books().iter().map(|b| b.isbn.as_str()).collect();
    assert_eq!(isbns, vec!["ISBN-1234", "ISBN-2"]);
    assert_eq!(repo.save_count(), 2);
    assert!(repo.content().unwrap().contains("ISBN-2"));
}

#[test]
fn duplicate_isbn_is_rejected_and_first_record_kept() {
    let (mut catalog, repo, reporter) = open_empty();
    catalog.add_book(test_driven());

    let added = catalog.add_book(Book::new("Impostor", "Someone Else", "ISBN-1234"));

    assert!(!added);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.books()[0], test_driven());
    assert_eq!(repo.save_count(), 1);
    assert!(reporter.errors().contains(&CatalogEvent::Rejected {
        operation: Operation::Add,
        error: CatalogError::DuplicateIsbn("ISBN-1234".to_string()),
    }));
}

#[test]
fn padded_isbn_is_stored_trimmed_and_cannot_be_added_twice() {
    let (mut catalog, repo, _reporter) = open_empty();
    catalog.add_book(Book::new("Keep", "K", "K-1"));

    let mut padded = Book::new("T", "A", "X-1");
    padded.isbn = "X-1 ".to_string();
    assert!(catalog.add_book(padded));
    assert!(!catalog.add_book(Book::new("T2", "A2", " X-1")));

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.find_by_isbn("X-1").unwrap().title, "T");
    assert!(catalog.issue_book("X-1 "));

    let reopened = Catalog::open(repo, MemoryReporter::new());
    assert_eq!(reopened.len(), 2);
    assert_eq!(
        reopened.find_by_isbn("X-1").unwrap().status,
        BookStatus::Issued
    );
}

#[test]
fn stored_duplicates_keep_first_record_and_load_the_rest() {
    let repo = MemoryRepository::with_content(
        r#"[
            {"title": "First", "isbn": "D-1"},
            {"title": "Other", "isbn": "O-1"},
            {"title": "Second", "isbn": "D-1"}
        ]"#,
    );
    let reporter = MemoryReporter::new();

    let catalog = Catalog::open(repo.clone(), reporter.clone());

    let titles: Vec<&str> = catalog.books().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Other"]);
    assert_eq!(repo.quarantined(), None);
    assert_eq!(
        reporter.events(),
        vec![
            CatalogEvent::DuplicateDropped {
                location: "memory".to_string(),
                book: "Second by Unknown Author (ID: D-1) - available".to_string(),
            },
            CatalogEvent::Loaded {
                location: "memory".to_string(),
                count: 2,
            },
        ]
    );
}

#[test]
fn find_by_isbn_trims_query() {
    let (mut catalog, _repo, _reporter) = open_empty();
    catalog.add_book(test_driven());

    assert_eq!(catalog.find_by_isbn("  ISBN-1234\n"), Some(&test_driven()));
    assert_eq!(catalog.find_by_isbn("ISBN-9999"), None);
}

#[test]
fn search_by_title_is_case_insensitive_substring() {
    let (mut catalog, _repo, _reporter) = open_empty();
    catalog.add_book(test_driven());
    catalog.add_book(Book::new("Driven Out", "Author C", "ISBN-3"));
    catalog.add_book(Book::new("Unrelated", "Author D", "ISBN-4"));

    let hits: Vec<&str> = catalog
        .search_by_title("driven")
        .iter()
        .map(|b| b.isbn.as_str())
        .collect();
    assert_eq!(hits, vec!["ISBN-1234", "ISBN-3"]);
    assert!(catalog.search_by_title("xyz").is_empty());
}

#[test]
fn list_all_renders_display_lines_in_order() {
    let (mut catalog, _repo, _reporter) = open_empty();
    catalog.add_book(test_driven());
    catalog.add_book(Book::new("Second", "Author B", "ISBN-2"));

    assert_eq!(
        catalog.list_all(),
        vec![
            "Test Driven by Author A (ID: ISBN-1234) - available".to_string(),
            "Second by Author B (ID: ISBN-2) - available".to_string(),
        ]
    );
}

#[test]
fn issue_and_return_transition_and_persist() {
    let (mut catalog, repo, _reporter) = open_empty();
    catalog.add_book(test_driven());

    assert!(catalog.issue_book("ISBN-1234"));
    assert_eq!(
        catalog.find_by_isbn("ISBN-1234").unwrap().status,
        BookStatus::Issued
    );
    assert!(repo.content().unwrap().contains("\"issued\""));

    assert!(catalog.return_book("ISBN-1234"));
    assert_eq!(
        catalog.find_by_isbn("ISBN-1234").unwrap().status,
        BookStatus::Available
    );
    assert_eq!(repo.save_count(), 3);
}

#[test]
fn double_issue_fails_without_persisting() {
    let (mut catalog, repo, reporter) = open_empty();
    catalog.add_book(test_driven());
    catalog.issue_book("ISBN-1234");

    assert!(!catalog.issue_book("ISBN-1234"));
    assert_eq!(repo.save_count(), 2);
    assert!(reporter.errors().contains(&CatalogEvent::Rejected {
        operation: Operation::Issue,
        error: CatalogError::AlreadyIssued("ISBN-1234".to_string()),
    }));
}

#[test]
fn return_of_available_book_fails_without_persisting() {
    let (mut catalog, repo, reporter) = open_empty();
    catalog.add_book(test_driven());

    assert!(!catalog.return_book("ISBN-1234"));
    assert_eq!(repo.save_count(), 1);
    assert!(reporter.errors().contains(&CatalogEvent::Rejected {
        operation: Operation::Return,
        error: CatalogError::NotIssued("ISBN-1234".to_string()),
    }));
}

#[test]
fn unknown_isbn_is_reported_as_not_found() {
    let (mut catalog, repo, reporter) = open_empty();

    assert!(!catalog.issue_book(" ghost "));
    assert!(!catalog.return_book("ghost"));
    assert_eq!(repo.save_count(), 0);
    assert_eq!(
        reporter.errors(),
        vec![
            CatalogEvent::Rejected {
                operation: Operation::Issue,
                error: CatalogError::NotFound("ghost".to_string()),
            },
            CatalogEvent::Rejected {
                operation: Operation::Return,
                error: CatalogError::NotFound("ghost".to_string()),
            },
        ]
    );
}

#[test]
fn save_failure_keeps_in_memory_state() {
    let (mut catalog, repo, reporter) = open_empty();
    repo.set_fail_writes(true);

    assert!(catalog.add_book(test_driven()));
    assert!(catalog.issue_book("ISBN-1234"));

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.books()[0].status, BookStatus::Issued);
    assert_eq!(repo.content(), None);
    assert!(!catalog.save());
    let failures = reporter
        .errors()
        .into_iter()
        .filter(|event| matches!(event, CatalogEvent::SaveFailed { .. }))
        .count();
    assert_eq!(failures, 3);
}

#[test]
fn reopen_restores_saved_books() {
    let repo = MemoryRepository::new();
    {
        let mut catalog = Catalog::open(repo.clone(), MemoryReporter::new());
        catalog.add_book(test_driven());
        catalog.add_book(Book::new("Second", "Author B", "ISBN-2"));
        catalog.issue_book("ISBN-2");
    }

    let reporter = MemoryReporter::new();
    let reopened = Catalog::open(repo, reporter.clone());

    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.books()[1].status, BookStatus::Issued);
    assert_eq!(
        reporter.events(),
        vec![CatalogEvent::Loaded {
            location: "memory".to_string(),
            count: 2
        }]
    );
}

#[test]
fn corrupt_content_is_quarantined_and_catalog_starts_empty() {
    let repo = MemoryRepository::with_content("{not json");
    let reporter = MemoryReporter::new();

    let catalog = Catalog::open(repo.clone(), reporter.clone());

    assert!(catalog.is_empty());
    assert_eq!(repo.content(), None);
    assert_eq!(repo.quarantined().as_deref(), Some("{not json"));
    let events = reporter.events();
    assert!(matches!(events[0], CatalogEvent::CorruptContent { .. }));
    assert_eq!(
        events[1],
        CatalogEvent::CorruptBackedUp {
            location: "memory".to_string(),
            backup: "memory.corrupt".to_string(),
        }
    );
}

#[test]
fn unknown_status_in_storage_is_treated_as_corrupt() {
    let repo =
        MemoryRepository::with_content(r#"[{"title": "T", "isbn": "1", "status": "lost"}]"#);

    let catalog = Catalog::open(repo.clone(), MemoryReporter::new());

    assert!(catalog.is_empty());
    assert!(repo.quarantined().unwrap().contains("lost"));
}

#[test]
fn failed_quarantine_is_reported_and_catalog_still_starts_empty() {
    let repo = MemoryRepository::with_content("[");
    repo.set_fail_quarantine(true);
    let reporter = MemoryReporter::new();

    let catalog = Catalog::open(repo.clone(), reporter.clone());

    assert!(catalog.is_empty());
    assert_eq!(repo.content().as_deref(), Some("["));
    assert!(reporter
        .errors()
        .iter()
        .any(|event| matches!(event, CatalogEvent::BackupFailed { .. })));
}

struct UnreadableRepository;

impl CatalogRepository for UnreadableRepository {
    fn load(&self) -> RepoResult<Option<Vec<Book>>> {
        Err(RepoError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )))
    }

    fn save(&self, _books: &[Book]) -> RepoResult<()> {
        Ok(())
    }

    fn quarantine(&self) -> RepoResult<String> {
        panic!("unreadable content must not be quarantined");
    }

    fn location(&self) -> String {
        "unreadable".to_string()
    }
}

#[test]
fn read_failure_starts_empty_without_quarantine() {
    let reporter = MemoryReporter::new();

    let catalog = Catalog::open(UnreadableRepository, reporter.clone());

    assert!(catalog.is_empty());
    assert_eq!(
        reporter.events(),
        vec![CatalogEvent::LoadFailed {
            location: "unreadable".to_string(),
            error: "denied".to_string(),
        }]
    );
}
