//! Manifest-backed media registry.
//!
//! A media library manifest lists attachments with their renditions and metadata, which
//! lets the renderer run without a live content-management host. Manifests are JSON, or
//! YAML when the file extension is `.yaml`/`.yml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::host::MediaRegistry;

/// Size label that always maps to the original upload.
pub const FULL_SIZE: &str = "full";

/// One attachment entry in a media library manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachmentRecord {
  /// Url of the full-size upload.
  pub url: String,
  /// Urls of named renditions keyed by size label.
  #[serde(default)]
  pub sizes: BTreeMap<String, String>,
  /// Path of the original file, relative to the uploads directory unless absolute.
  #[serde(default)]
  pub file: Option<PathBuf>,
  /// Alternate text.
  #[serde(default)]
  pub alt: Option<String>,
  /// Attachment title.
  #[serde(default)]
  pub title: Option<String>,
  /// Any further metadata the host stores. Kept for completeness, never rendered.
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
struct LibraryManifest {
  #[serde(default)]
  uploads_dir: Option<PathBuf>,
  #[serde(default)]
  attachments: BTreeMap<u64, AttachmentRecord>,
}

/// In-memory media registry loaded from a manifest.
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
  attachments: BTreeMap<u64, AttachmentRecord>,
  uploads_dir: PathBuf,
}

/// Errors that can occur while loading a media library manifest.
#[derive(Debug)]
pub enum LibraryError {
  /// Failed to read the manifest from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse a JSON manifest.
  Json {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// Failed to parse a YAML manifest.
  Yaml {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
}

impl MediaLibrary {
  /// Build a library from records, resolving relative file paths against `uploads_dir`.
  pub fn from_records(
    records: impl IntoIterator<Item = (u64, AttachmentRecord)>,
    uploads_dir: PathBuf,
  ) -> Self {
    Self {
      attachments: records.into_iter().collect(),
      uploads_dir,
    }
  }

  /// Load a manifest file.
  ///
  /// A relative `uploads_dir` in the manifest is resolved against the manifest's directory,
  /// which is also the default uploads directory.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| LibraryError::Io {
      path: path.to_path_buf(),
      source: err,
    })?;

    let manifest: LibraryManifest = if is_yaml(path) {
      serde_yaml::from_str(&contents).map_err(|err| LibraryError::Yaml {
        path: path.to_path_buf(),
        source: err,
      })?
    } else {
      serde_json::from_str(&contents).map_err(|err| LibraryError::Json {
        path: path.to_path_buf(),
        source: err,
      })?
    };

    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let uploads_dir = match manifest.uploads_dir {
      Some(dir) => base.join(dir),
      None => base,
    };

    Ok(Self::from_records(manifest.attachments, uploads_dir))
  }

  /// Look up the raw record for an attachment.
  pub fn attachment(&self, id: u64) -> Option<&AttachmentRecord> {
    self.attachments.get(&id)
  }

  /// Number of attachments in the library.
  pub fn len(&self) -> usize {
    self.attachments.len()
  }

  /// Returns `true` when the library holds no attachments.
  pub fn is_empty(&self) -> bool {
    self.attachments.is_empty()
  }
}

impl MediaRegistry for MediaLibrary {
  fn resolve_url(&self, id: u64, size: Option<&str>) -> Option<String> {
    let record = self.attachments.get(&id)?;
    let url = match size {
      None | Some(FULL_SIZE) => &record.url,
      // Unknown renditions fall back to the original upload.
      Some(label) => record.sizes.get(label).unwrap_or(&record.url),
    };

    (!url.is_empty()).then(|| url.clone())
  }

  fn alt_text_of(&self, id: u64) -> Option<String> {
    self.attachments.get(&id)?.alt.clone()
  }

  fn title_of(&self, id: u64) -> Option<String> {
    self.attachments.get(&id)?.title.clone()
  }

  fn file_path_of(&self, id: u64) -> Option<PathBuf> {
    let file = self.attachments.get(&id)?.file.as_ref()?;
    Some(self.uploads_dir.join(file))
  }
}

fn is_yaml(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

impl std::fmt::Display for LibraryError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Json { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::Yaml { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for LibraryError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Json { source, .. } => Some(source),
      Self::Yaml { source, .. } => Some(source),
    }
  }
}
