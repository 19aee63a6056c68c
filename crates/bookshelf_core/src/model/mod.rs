//! Catalog domain model.
//!
//! # Responsibility
//! - Define the record shape shared by storage and catalog logic.
//!
//! # Invariants
//! - Lending status is a closed two-value enum, never free text.

pub mod book;
