//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-catalog load/save contract.
//! - Isolate file format and filesystem details from catalog logic.
//!
//! # Invariants
//! - Repositories report failures as `RepoError`; deciding how to degrade is
//!   the catalog's job.

pub mod catalog_repo;
pub mod json_file;
pub mod memory;
