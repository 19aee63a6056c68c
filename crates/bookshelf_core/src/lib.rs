//! Core domain logic for the bookshelf catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use config::CatalogConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookStatus, BookValidationError};
pub use repo::catalog_repo::{CatalogRepository, RepoError, RepoResult};
pub use repo::json_file::JsonFileRepository;
pub use repo::memory::MemoryRepository;
pub use report::{CatalogEvent, CatalogReporter, LogReporter, MemoryReporter, Operation};
pub use service::catalog_service::{Catalog, CatalogError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
