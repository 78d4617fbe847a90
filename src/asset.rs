//! Resolved snapshot of a single media asset.

use crate::file_type::FileType;
use crate::host::{FileStore, MediaRegistry};

/// Immutable attributes of one media asset, resolved once from the host registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
  id: u64,
  url: String,
  size: Option<String>,
  file_type: FileType,
  alt: String,
  title: String,
}

/// Returned when no url resolves for the requested asset.
///
/// This is the "nothing to render" signal rather than a fatal condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetNotFound {
  /// Identifier that was looked up.
  pub id: u64,
  /// Size variant that was requested.
  pub size: Option<String>,
}

impl AssetDescriptor {
  /// Resolve asset `id` at the requested size variant through `registry`.
  pub fn resolve<R: MediaRegistry + ?Sized>(
    registry: &R,
    id: u64,
    size: Option<&str>,
  ) -> Result<Self, AssetNotFound> {
    let url = registry
      .resolve_url(id, size)
      .filter(|url| !url.is_empty())
      .ok_or_else(|| AssetNotFound {
        id,
        size: size.map(str::to_string),
      })?;

    Ok(Self {
      id,
      file_type: registry.file_type_of(&url),
      url,
      size: size.map(str::to_string),
      alt: registry.alt_text_of(id).unwrap_or_default(),
      title: registry.title_of(id).unwrap_or_default(),
    })
  }

  /// Host identifier of the asset.
  pub fn id(&self) -> u64 {
    self.id
  }

  /// Url resolved for the requested size.
  pub fn url(&self) -> &str {
    &self.url
  }

  /// Size variant the descriptor was resolved for.
  pub fn size(&self) -> Option<&str> {
    self.size.as_deref()
  }

  /// File type derived from the resolved url.
  pub fn file_type(&self) -> &FileType {
    &self.file_type
  }

  /// Alternate text, empty when unset.
  pub fn alt(&self) -> &str {
    &self.alt
  }

  /// Title, empty when unset.
  pub fn title(&self) -> &str {
    &self.title
  }

  /// Returns `true` when the asset should be inlined rather than referenced.
  pub fn is_vector_format(&self) -> bool {
    self.file_type.is_vector()
  }

  /// Read and trim the raw file contents of the asset.
  ///
  /// A missing path or unreadable file yields an empty string so page rendering carries on.
  pub fn vector_content<R, F>(&self, registry: &R, files: &F) -> String
  where
    R: MediaRegistry + ?Sized,
    F: FileStore + ?Sized,
  {
    let Some(path) = registry.file_path_of(self.id) else {
      tracing::debug!("asset {} has no attached file", self.id);
      return String::new();
    };

    match files.read_file(&path) {
      Some(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
      None => {
        tracing::debug!("vector file for asset {} missing at {}", self.id, path.display());
        String::new()
      }
    }
  }

  /// Attributes allowed onto the rendered `<img>` element, in output order.
  ///
  /// Only `alt` and `title` are ever exposed; the id, size, url and file type stay internal.
  pub fn markup_attributes(&self) -> [(&'static str, &str); 2] {
    [("alt", self.alt.as_str()), ("title", self.title.as_str())]
  }
}

impl std::fmt::Display for AssetNotFound {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.size {
      Some(size) => write!(f, "no url resolved for asset {} at size {}", self.id, size),
      None => write!(f, "no url resolved for asset {}", self.id),
    }
  }
}

impl std::error::Error for AssetNotFound {}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::library::{AttachmentRecord, MediaLibrary};
  use std::collections::BTreeMap;
  use std::path::{Path, PathBuf};
  use tempfile::tempdir;

  fn library(file: Option<&str>) -> MediaLibrary {
    let mut extra = BTreeMap::new();
    extra.insert("caption".to_string(), serde_yaml::Value::from("Never rendered"));
    MediaLibrary::from_records(
      [(7, AttachmentRecord {
        url: "https://cdn.example/logo.svg".into(),
        sizes: BTreeMap::new(),
        file: file.map(PathBuf::from),
        alt: Some("Company logo".into()),
        title: None,
        extra,
      })],
      PathBuf::from("/"),
    )
  }

  struct FixedStore(&'static str);

  impl FileStore for FixedStore {
    fn read_file(&self, _path: &Path) -> Option<Vec<u8>> {
      Some(self.0.as_bytes().to_vec())
    }
  }

  #[test]
  fn resolves_snapshot_from_registry() {
    let library = library(None);
    let asset = AssetDescriptor::resolve(&library, 7, Some("medium")).expect("asset resolves");

    assert_eq!(asset.id(), 7);
    assert_eq!(asset.url(), "https://cdn.example/logo.svg");
    assert_eq!(asset.size(), Some("medium"));
    assert_eq!(asset.alt(), "Company logo");
    assert_eq!(asset.title(), "");
    assert_eq!(asset.file_type().ext.as_deref(), Some("svg"));
    assert!(asset.is_vector_format());
  }

  #[test]
  fn missing_url_is_reported_as_not_found() {
    let library = library(None);
    let err = AssetDescriptor::resolve(&library, 99, None).unwrap_err();

    assert_eq!(err, AssetNotFound { id: 99, size: None });
    assert_eq!(err.to_string(), "no url resolved for asset 99");
  }

  #[test]
  fn markup_attributes_only_expose_safelisted_keys() {
    let library = library(None);
    let asset = AssetDescriptor::resolve(&library, 7, None).expect("asset resolves");

    assert_eq!(asset.markup_attributes(), [("alt", "Company logo"), ("title", "")]);
  }

  #[test]
  fn vector_content_is_trimmed() {
    let library = library(Some("logo.svg"));
    let asset = AssetDescriptor::resolve(&library, 7, None).expect("asset resolves");

    let content = asset.vector_content(&library, &FixedStore("\n  <svg></svg>\n\n"));
    assert_eq!(content, "<svg></svg>");
  }

  #[test]
  fn vector_content_is_empty_for_missing_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let library = MediaLibrary::from_records(
      [(7, AttachmentRecord {
        url: "https://cdn.example/logo.svg".into(),
        file: Some(PathBuf::from("missing.svg")),
        ..AttachmentRecord::default()
      })],
      temp.path().to_path_buf(),
    );
    let asset = AssetDescriptor::resolve(&library, 7, None).expect("asset resolves");

    assert_eq!(asset.vector_content(&library, &crate::host::LocalFileStore), "");
  }

  #[test]
  fn vector_content_is_empty_without_attached_file() {
    let library = library(None);
    let asset = AssetDescriptor::resolve(&library, 7, None).expect("asset resolves");

    assert_eq!(asset.vector_content(&library, &FixedStore("<svg/>")), "");
  }
}
