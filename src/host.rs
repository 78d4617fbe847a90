//! Interfaces to the host media subsystem.
//!
//! The renderer never talks to a content-management host directly. Every lookup goes
//! through these traits so a live host, a manifest-backed [`crate::library::MediaLibrary`]
//! or a test fixture can be substituted freely.

use std::fs;
use std::path::{Path, PathBuf};

use crate::file_type::FileType;

/// Lookups the host media registry provides for an attachment.
pub trait MediaRegistry {
  /// Resolve the url of attachment `id` for the requested size variant.
  ///
  /// `None` for `size` requests the host's default rendition. Returns `None` when the
  /// attachment cannot be located.
  fn resolve_url(&self, id: u64, size: Option<&str>) -> Option<String>;

  /// Alternate text recorded for the attachment.
  fn alt_text_of(&self, id: u64) -> Option<String>;

  /// Title recorded for the attachment.
  fn title_of(&self, id: u64) -> Option<String>;

  /// Location of the attachment's original file.
  fn file_path_of(&self, id: u64) -> Option<PathBuf>;

  /// Classify a resolved url. Defaults to extension based detection.
  fn file_type_of(&self, url: &str) -> FileType {
    FileType::from_url(url)
  }
}

impl<R: MediaRegistry + ?Sized> MediaRegistry for &R {
  fn resolve_url(&self, id: u64, size: Option<&str>) -> Option<String> {
    (**self).resolve_url(id, size)
  }

  fn alt_text_of(&self, id: u64) -> Option<String> {
    (**self).alt_text_of(id)
  }

  fn title_of(&self, id: u64) -> Option<String> {
    (**self).title_of(id)
  }

  fn file_path_of(&self, id: u64) -> Option<PathBuf> {
    (**self).file_path_of(id)
  }

  fn file_type_of(&self, url: &str) -> FileType {
    (**self).file_type_of(url)
  }
}

/// Read primitive used to inline vector assets.
pub trait FileStore {
  /// Return the file contents, or `None` when the file is missing or unreadable.
  fn read_file(&self, path: &Path) -> Option<Vec<u8>>;
}

/// [`FileStore`] reading straight from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
  fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
    if !path.is_file() {
      return None;
    }
    fs::read(path).ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn local_store_reads_existing_files() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("logo.svg");
    fs::write(&path, "<svg/>").expect("failed to write fixture");

    assert_eq!(LocalFileStore.read_file(&path), Some(b"<svg/>".to_vec()));
  }

  #[test]
  fn local_store_reports_missing_files_and_directories() {
    let temp = tempdir().expect("failed to create temp dir");

    assert_eq!(LocalFileStore.read_file(&temp.path().join("missing.svg")), None);
    assert_eq!(LocalFileStore.read_file(temp.path()), None);
  }
}
