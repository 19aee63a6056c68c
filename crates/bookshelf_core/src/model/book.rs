//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record and its lending status.
//! - Own the two legal lending transitions (issue / return).
//!
//! # Invariants
//! - `status` is always one of `BookStatus::Available` / `BookStatus::Issued`.
//! - Transitions attempted from the wrong state are no-ops returning `false`.
//! - `isbn` is trimmed on construction; uniqueness is enforced by the catalog.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lending state of a catalog record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// On the shelf and free to lend.
    #[default]
    Available,
    /// Lent out.
    Issued,
}

impl BookStatus {
    /// Parses persisted or user-provided status text.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Returns `None` for anything other than `available` / `issued`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "available" => Some(Self::Available),
            "issued" => Some(Self::Issued),
            _ => None,
        }
    }

    /// Canonical lowercase wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Issued => "issued",
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction error for [`Book`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// Status text is neither `available` nor `issued`.
    UnknownStatus(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStatus(value) => write!(
                f,
                "unknown book status `{value}`; expected available|issued"
            ),
        }
    }
}

impl Error for BookValidationError {}

/// One book's catalog entry.
///
/// Serialized verbatim as the persisted record shape:
/// `{"title", "author", "isbn", "status"}`. Decoding goes through the
/// repository's lenient record shape instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Unique key within a catalog, stored without surrounding whitespace.
    pub isbn: String,
    pub status: BookStatus,
}

impl Book {
    /// Creates an available book. Surrounding whitespace in `isbn` is dropped.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into().trim().to_string(),
            status: BookStatus::Available,
        }
    }

    /// Creates a book from free-form status text.
    ///
    /// # Errors
    /// - Returns `BookValidationError::UnknownStatus` when `status` does not
    ///   normalize to a known lending state.
    pub fn with_status(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        status: &str,
    ) -> Result<Self, BookValidationError> {
        let status = BookStatus::parse(status)
            .ok_or_else(|| BookValidationError::UnknownStatus(status.to_string()))?;
        let mut book = Self::new(title, author, isbn);
        book.status = status;
        Ok(book)
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Moves `Available -> Issued`. Returns `false` if already issued.
    pub fn issue(&mut self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.status = BookStatus::Issued;
        true
    }

    /// Moves `Issued -> Available`. Returns `false` if not issued.
    pub fn return_book(&mut self) -> bool {
        if self.is_available() {
            return false;
        }
        self.status = BookStatus::Available;
        true
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} (ID: {}) - {}",
            self.title, self.author, self.isbn, self.status
        )
    }
}
