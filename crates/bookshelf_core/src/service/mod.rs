//! Core use-case services.
//!
//! # Responsibility
//! - Expose the catalog API consumed by shells and embedders.
//! - Keep callers decoupled from storage details.

pub mod catalog_service;
