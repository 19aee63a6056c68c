//! Catalog persistence contract and shared JSON codec.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the catalog.
//! - Decode stored records defensively, filling missing fields with defaults.
//!
//! # Invariants
//! - Stored content is a JSON array of `{title, author, isbn, status}` objects.
//! - Decoding preserves stored order, duplicates included; the catalog owns
//!   identifier uniqueness.
//! - A present status outside `available|issued` is invalid data, not a guess.

use crate::model::book::{Book, BookValidationError};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_TITLE: &str = "Unknown Title";
const DEFAULT_AUTHOR: &str = "Unknown Author";
const DEFAULT_STATUS: &str = "available";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for catalog storage.
#[derive(Debug)]
pub enum RepoError {
    Io(std::io::Error),
    /// Stored content is not a parseable record list.
    Corrupt(serde_json::Error),
    /// Stored content parses but breaks a record invariant.
    InvalidData(String),
    Serialization(serde_json::Error),
}

impl RepoError {
    /// Whether the stored content itself is unusable and should be set aside.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_) | Self::InvalidData(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "corrupt catalog content: {err}"),
            Self::InvalidData(message) => write!(f, "invalid catalog data: {message}"),
            Self::Serialization(err) => write!(f, "failed to encode catalog: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Corrupt(err) | Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Repository interface for whole-catalog persistence.
pub trait CatalogRepository {
    /// Reads every stored book in stored order.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> RepoResult<Option<Vec<Book>>>;
    /// Replaces stored content with `books`, in order.
    fn save(&self, books: &[Book]) -> RepoResult<()>;
    /// Moves unusable stored content aside and returns where it went.
    fn quarantine(&self) -> RepoResult<String>;
    /// Human-readable storage location for diagnostics.
    fn location(&self) -> String;
}

/// Loose on-disk record shape; every field may be absent.
#[derive(Debug, Deserialize)]
struct StoredBook {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    status: Option<String>,
}

impl StoredBook {
    fn into_book(self) -> Result<Book, BookValidationError> {
        Book::with_status(
            self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            self.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            self.isbn.unwrap_or_default(),
            self.status.as_deref().unwrap_or(DEFAULT_STATUS),
        )
    }
}

/// Decodes stored catalog content.
pub(crate) fn decode_books(content: &str) -> RepoResult<Vec<Book>> {
    let stored: Vec<StoredBook> = serde_json::from_str(content).map_err(RepoError::Corrupt)?;
    stored
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_book()
                .map_err(|err| RepoError::InvalidData(format!("record {index}: {err}")))
        })
        .collect()
}

/// Encodes books as indented JSON with a trailing newline.
pub(crate) fn encode_books(books: &[Book]) -> RepoResult<String> {
    let mut content = serde_json::to_string_pretty(books).map_err(RepoError::Serialization)?;
    content.push('\n');
    Ok(content)
}
