//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bookshelf_core` wiring: config, optional file logging, catalog load.
//! - Print the catalog listing; the interactive menu shell lives elsewhere.
//!
//! Usage: `bookshelf [CATALOG_PATH]`

use bookshelf_core::{core_version, init_logging, Catalog, CatalogConfig, LogReporter};
use std::path::PathBuf;

fn main() {
    let mut config = CatalogConfig::from_env();
    if let Some(path) = std::env::args_os().nth(1) {
        config.storage_path = PathBuf::from(path);
    }

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("bookshelf logging disabled: {err}");
        }
    }

    let catalog = Catalog::open_with_config(&config, LogReporter);

    println!("bookshelf_core version={}", core_version());
    println!(
        "catalog={} books={}",
        config.storage_path.display(),
        catalog.len()
    );
    for (index, line) in catalog.list_all().iter().enumerate() {
        println!("{}. {line}", index + 1);
    }
}
