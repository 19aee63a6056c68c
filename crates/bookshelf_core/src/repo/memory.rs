//! In-memory catalog repository.
//!
//! Stores the same JSON text the file repository would write, so decoding,
//! corruption handling and quarantine behave identically without touching
//! disk. Clones share one storage slot.

use super::catalog_repo::{decode_books, encode_books, CatalogRepository, RepoError, RepoResult};
use crate::model::book::Book;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

const MEMORY_LOCATION: &str = "memory";

#[derive(Debug, Default)]
struct MemoryState {
    content: Option<String>,
    quarantined: Option<String>,
    save_count: usize,
    fail_writes: bool,
    fail_quarantine: bool,
}

/// Single-threaded in-memory repository, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with raw stored content, as if read from a file.
    pub fn with_content(content: impl Into<String>) -> Self {
        let repo = Self::default();
        repo.state.borrow_mut().content = Some(content.into());
        repo
    }

    /// Current stored content, if any.
    pub fn content(&self) -> Option<String> {
        self.state.borrow().content.clone()
    }

    /// Content moved aside by the last quarantine.
    pub fn quarantined(&self) -> Option<String> {
        self.state.borrow().quarantined.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.state.borrow().save_count
    }

    /// Makes subsequent saves fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Makes subsequent quarantines fail with an I/O error.
    pub fn set_fail_quarantine(&self, fail: bool) {
        self.state.borrow_mut().fail_quarantine = fail;
    }
}

impl CatalogRepository for MemoryRepository {
    fn load(&self) -> RepoResult<Option<Vec<Book>>> {
        match self.state.borrow().content.as_deref() {
            Some(content) => decode_books(content).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, books: &[Book]) -> RepoResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(RepoError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated write error",
            )));
        }
        state.content = Some(encode_books(books)?);
        state.save_count += 1;
        Ok(())
    }

    fn quarantine(&self) -> RepoResult<String> {
        let mut state = self.state.borrow_mut();
        if state.fail_quarantine {
            return Err(RepoError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated quarantine error",
            )));
        }
        let content = state.content.take();
        state.quarantined = content;
        Ok(format!("{MEMORY_LOCATION}.corrupt"))
    }

    fn location(&self) -> String {
        MEMORY_LOCATION.to_string()
    }
}
