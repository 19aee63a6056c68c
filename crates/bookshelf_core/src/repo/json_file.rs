//! JSON file catalog repository.
//!
//! # Responsibility
//! - Persist the catalog as one indented JSON file.
//! - Set corrupt files aside as `<stem>.corrupt.<ext>` siblings.
//!
//! # Invariants
//! - Saves write a temporary sibling and rename it over the target, so the
//!   target is either the old or the new content.
//! - The temporary file never outlives a failed save.

use super::catalog_repo::{decode_books, encode_books, CatalogRepository, RepoError, RepoResult};
use crate::model::book::Book;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const CORRUPT_MARKER: &str = "corrupt";

/// Catalog repository backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where [`CatalogRepository::quarantine`] moves a corrupt file.
    pub fn backup_path(&self) -> PathBuf {
        corrupt_backup_path(&self.path)
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl CatalogRepository for JsonFileRepository {
    fn load(&self) -> RepoResult<Option<Vec<Book>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode_books(&content).map(Some)
    }

    fn save(&self, books: &[Book]) -> RepoResult<()> {
        let content = encode_books(books)?;
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Dropping `staged` on any early return removes the temp file.
        let mut staged = tempfile::Builder::new()
            .prefix(&format!(".{file_name}."))
            .suffix(".tmp")
            .tempfile_in(dir)?;
        staged.write_all(content.as_bytes())?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|err| RepoError::Io(err.error))?;

        Ok(())
    }

    fn quarantine(&self) -> RepoResult<String> {
        let backup = self.backup_path();
        fs::rename(&self.path, &backup)?;
        Ok(backup.display().to_string())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn corrupt_backup_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}.{CORRUPT_MARKER}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{CORRUPT_MARKER}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::corrupt_backup_path;
    use std::path::{Path, PathBuf};

    #[test]
    fn backup_path_inserts_marker_before_extension() {
        assert_eq!(
            corrupt_backup_path(Path::new("data/books.json")),
            PathBuf::from("data/books.corrupt.json")
        );
    }

    #[test]
    fn backup_path_appends_marker_without_extension() {
        assert_eq!(
            corrupt_backup_path(Path::new("catalog")),
            PathBuf::from("catalog.corrupt")
        );
    }
}
