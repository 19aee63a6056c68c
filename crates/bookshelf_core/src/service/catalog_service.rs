//! Catalog use-case service.
//!
//! # Responsibility
//! - Own the ordered in-memory book list and its search/mutation APIs.
//! - Persist the full list after every successful mutation.
//! - Degrade every failure into a boolean/empty result plus a reported event.
//!
//! # Invariants
//! - No two books share an `isbn`.
//! - Insertion order is preserved and is the persisted order.
//! - The in-memory list is the source of truth between saves.
//! - No error crosses the public API.

use crate::config::CatalogConfig;
use crate::model::book::Book;
use crate::repo::catalog_repo::CatalogRepository;
use crate::repo::json_file::JsonFileRepository;
use crate::report::{CatalogEvent, CatalogReporter, Operation};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Why a catalog mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateIsbn(String),
    NotFound(String),
    AlreadyIssued(String),
    NotIssued(String),
}

impl CatalogError {
    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateIsbn(_) => "duplicate_isbn",
            Self::NotFound(_) => "not_found",
            Self::AlreadyIssued(_) => "already_issued",
            Self::NotIssued(_) => "not_issued",
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateIsbn(isbn) => write!(f, "book with isbn {isbn} already exists"),
            Self::NotFound(isbn) => write!(f, "no book found with isbn {isbn}"),
            Self::AlreadyIssued(isbn) => write!(f, "book {isbn} is already issued"),
            Self::NotIssued(isbn) => write!(f, "book {isbn} was not issued"),
        }
    }
}

impl Error for CatalogError {}

/// Book catalog over a persistence repository.
pub struct Catalog<R: CatalogRepository> {
    repo: R,
    reporter: Box<dyn CatalogReporter>,
    books: Vec<Book>,
}

impl Catalog<JsonFileRepository> {
    /// Opens the JSON file catalog at `path`.
    pub fn open_path(path: impl Into<PathBuf>, reporter: impl CatalogReporter + 'static) -> Self {
        Self::open(JsonFileRepository::new(path), reporter)
    }

    /// Opens the JSON file catalog at the configured storage path.
    pub fn open_with_config(
        config: &CatalogConfig,
        reporter: impl CatalogReporter + 'static,
    ) -> Self {
        Self::open_path(config.storage_path.clone(), reporter)
    }

    /// Opens `books.json` in the working directory.
    pub fn open_default(reporter: impl CatalogReporter + 'static) -> Self {
        Self::open_with_config(&CatalogConfig::default(), reporter)
    }
}

impl<R: CatalogRepository> Catalog<R> {
    /// Creates a catalog and loads its full state from `repo`.
    ///
    /// # Side effects
    /// - Corrupt stored content is moved aside through `repo.quarantine()`.
    pub fn open(repo: R, reporter: impl CatalogReporter + 'static) -> Self {
        let mut catalog = Self {
            repo,
            reporter: Box::new(reporter),
            books: Vec::new(),
        };
        catalog.load();
        catalog
    }

    fn load(&mut self) {
        let location = self.repo.location();
        self.books = match self.repo.load() {
            Ok(Some(books)) => {
                let books = self.dedupe(&location, books);
                self.reporter.report(&CatalogEvent::Loaded {
                    location,
                    count: books.len(),
                });
                books
            }
            Ok(None) => {
                self.reporter.report(&CatalogEvent::StartedEmpty { location });
                Vec::new()
            }
            Err(err) if err.is_corrupt() => {
                self.reporter.report(&CatalogEvent::CorruptContent {
                    location: location.clone(),
                    error: err.to_string(),
                });
                self.quarantine(location);
                Vec::new()
            }
            Err(err) => {
                self.reporter.report(&CatalogEvent::LoadFailed {
                    location,
                    error: err.to_string(),
                });
                Vec::new()
            }
        };
    }

    /// Keeps the first stored book per isbn and reports the rest.
    fn dedupe(&self, location: &str, books: Vec<Book>) -> Vec<Book> {
        let mut seen = HashSet::with_capacity(books.len());
        books
            .into_iter()
            .filter(|book| {
                let first = seen.insert(book.isbn.clone());
                if !first {
                    self.reporter.report(&CatalogEvent::DuplicateDropped {
                        location: location.to_string(),
                        book: book.to_string(),
                    });
                }
                first
            })
            .collect()
    }

    fn quarantine(&self, location: String) {
        let event = match self.repo.quarantine() {
            Ok(backup) => CatalogEvent::CorruptBackedUp { location, backup },
            Err(err) => CatalogEvent::BackupFailed {
                location,
                error: err.to_string(),
            },
        };
        self.reporter.report(&event);
    }

    /// Appends `book` and persists.
    ///
    /// The isbn is stored trimmed. Returns `false` without changes when it is
    /// already taken.
    pub fn add_book(&mut self, mut book: Book) -> bool {
        book.isbn = book.isbn.trim().to_string();
        let result = if self.find_by_isbn(&book.isbn).is_some() {
            Err(CatalogError::DuplicateIsbn(book.isbn.clone()))
        } else {
            let summary = book.to_string();
            self.books.push(book);
            Ok(summary)
        };
        self.finish(Operation::Add, result)
    }

    /// Exact isbn lookup; surrounding whitespace in `isbn` is ignored.
    pub fn find_by_isbn(&self, isbn: &str) -> Option<&Book> {
        let isbn = isbn.trim();
        self.books.iter().find(|book| book.isbn == isbn)
    }

    /// Case-insensitive title substring search, in catalog order.
    pub fn search_by_title(&self, query: &str) -> Vec<&Book> {
        let query = query.trim().to_lowercase();
        self.books
            .iter()
            .filter(|book| book.title.to_lowercase().contains(&query))
            .collect()
    }

    /// One display line per book, in catalog order.
    pub fn list_all(&self) -> Vec<String> {
        self.books.iter().map(ToString::to_string).collect()
    }

    /// Issues the book with `isbn`, persisting on success.
    pub fn issue_book(&mut self, isbn: &str) -> bool {
        let result = self.book_mut(isbn).and_then(|book| {
            if book.issue() {
                Ok(book.to_string())
            } else {
                Err(CatalogError::AlreadyIssued(book.isbn.clone()))
            }
        });
        self.finish(Operation::Issue, result)
    }

    /// Returns the book with `isbn`, persisting on success.
    pub fn return_book(&mut self, isbn: &str) -> bool {
        let result = self.book_mut(isbn).and_then(|book| {
            if book.return_book() {
                Ok(book.to_string())
            } else {
                Err(CatalogError::NotIssued(book.isbn.clone()))
            }
        });
        self.finish(Operation::Return, result)
    }

    /// Writes the full catalog to the repository.
    ///
    /// Returns `false` when the write failed; the in-memory state is kept
    /// and stored content may be stale.
    pub fn save(&self) -> bool {
        let location = self.repo.location();
        match self.repo.save(&self.books) {
            Ok(()) => {
                self.reporter.report(&CatalogEvent::Saved {
                    location,
                    count: self.books.len(),
                });
                true
            }
            Err(err) => {
                self.reporter.report(&CatalogEvent::SaveFailed {
                    location,
                    error: err.to_string(),
                });
                false
            }
        }
    }

    /// All books in catalog order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn book_mut(&mut self, isbn: &str) -> Result<&mut Book, CatalogError> {
        let isbn = isbn.trim();
        self.books
            .iter_mut()
            .find(|book| book.isbn == isbn)
            .ok_or_else(|| CatalogError::NotFound(isbn.to_string()))
    }

    /// Reports the outcome and persists applied mutations.
    fn finish(&self, operation: Operation, result: Result<String, CatalogError>) -> bool {
        match result {
            Ok(book) => {
                self.reporter
                    .report(&CatalogEvent::Applied { operation, book });
                self.save();
                true
            }
            Err(error) => {
                self.reporter
                    .report(&CatalogEvent::Rejected { operation, error });
                false
            }
        }
    }
}
