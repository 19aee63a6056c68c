//! Catalog outcome reporting.
//!
//! # Responsibility
//! - Describe every catalog outcome (success or degraded) as a typed event.
//! - Deliver events through a reporter injected at catalog construction.
//!
//! # Invariants
//! - Reporters never fail and never abort the calling operation.
//! - Reporting never touches process-wide logger configuration.

use crate::service::catalog_service::CatalogError;
use log::Level;
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const MODULE: &str = "catalog";

/// Catalog mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Issue,
    Return,
}

impl Operation {
    fn event_name(self) -> &'static str {
        match self {
            Self::Add => "book_add",
            Self::Issue => "book_issue",
            Self::Return => "book_return",
        }
    }
}

/// Something the catalog did or failed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    Loaded { location: String, count: usize },
    /// Nothing stored yet.
    StartedEmpty { location: String },
    /// Stored content could not be read; catalog starts empty.
    LoadFailed { location: String, error: String },
    /// Stored content is unusable; catalog starts empty.
    CorruptContent { location: String, error: String },
    /// A later stored record reused an isbn; the first one was kept.
    DuplicateDropped { location: String, book: String },
    CorruptBackedUp { location: String, backup: String },
    BackupFailed { location: String, error: String },
    Saved { location: String, count: usize },
    /// In-memory state is kept; stored content may be stale.
    SaveFailed { location: String, error: String },
    Applied { operation: Operation, book: String },
    Rejected { operation: Operation, error: CatalogError },
}

impl CatalogEvent {
    /// Log level this event is emitted at.
    pub fn level(&self) -> Level {
        match self {
            Self::Loaded { .. }
            | Self::StartedEmpty { .. }
            | Self::CorruptBackedUp { .. }
            | Self::Saved { .. }
            | Self::Applied { .. } => Level::Info,
            Self::LoadFailed { .. }
            | Self::CorruptContent { .. }
            | Self::DuplicateDropped { .. }
            | Self::BackupFailed { .. }
            | Self::SaveFailed { .. }
            | Self::Rejected { .. } => Level::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level() == Level::Error
    }
}

impl Display for CatalogEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded { location, count } => write!(
                f,
                "event=catalog_load module={MODULE} status=ok location={location} count={count}"
            ),
            Self::StartedEmpty { location } => write!(
                f,
                "event=catalog_load module={MODULE} status=empty location={location}"
            ),
            Self::LoadFailed { location, error } => write!(
                f,
                "event=catalog_load module={MODULE} status=error error_code=load_failed location={location} error={error}"
            ),
            Self::CorruptContent { location, error } => write!(
                f,
                "event=catalog_load module={MODULE} status=error error_code=corrupt location={location} error={error}"
            ),
            Self::DuplicateDropped { location, book } => write!(
                f,
                "event=catalog_load module={MODULE} status=error error_code=duplicate_isbn location={location} dropped={book}"
            ),
            Self::CorruptBackedUp { location, backup } => write!(
                f,
                "event=catalog_backup module={MODULE} status=ok location={location} backup={backup}"
            ),
            Self::BackupFailed { location, error } => write!(
                f,
                "event=catalog_backup module={MODULE} status=error location={location} error={error}"
            ),
            Self::Saved { location, count } => write!(
                f,
                "event=catalog_save module={MODULE} status=ok location={location} count={count}"
            ),
            Self::SaveFailed { location, error } => write!(
                f,
                "event=catalog_save module={MODULE} status=error location={location} error={error}"
            ),
            Self::Applied { operation, book } => write!(
                f,
                "event={} module={MODULE} status=ok book={book}",
                operation.event_name()
            ),
            Self::Rejected { operation, error } => write!(
                f,
                "event={} module={MODULE} status=error error_code={} error={error}",
                operation.event_name(),
                error.code()
            ),
        }
    }
}

/// Sink for catalog events, passed to the catalog at construction.
pub trait CatalogReporter {
    fn report(&self, event: &CatalogEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl CatalogReporter for LogReporter {
    fn report(&self, event: &CatalogEvent) {
        log::log!(event.level(), "{event}");
    }
}

/// Keeps events in memory. Clones share one event list.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    events: Rc<RefCell<Vec<CatalogEvent>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events reported so far, oldest first.
    pub fn events(&self) -> Vec<CatalogEvent> {
        self.events.borrow().clone()
    }

    /// Only error-level events.
    pub fn errors(&self) -> Vec<CatalogEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.is_error())
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl CatalogReporter for MemoryReporter {
    fn report(&self, event: &CatalogEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
