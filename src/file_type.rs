//! File type detection for resolved asset urls.

use regex::Regex;

/// Extension marking assets that are inlined instead of referenced via `src`.
pub const VECTOR_EXTENSION: &str = "svg";

/// Extensions recognised by the default detector and the mime type each maps to.
const MIME_TYPES: &[(&[&str], &str)] = &[
  (&["jpg", "jpeg", "jpe"], "image/jpeg"),
  (&["png"], "image/png"),
  (&["gif"], "image/gif"),
  (&["webp"], "image/webp"),
  (&["avif"], "image/avif"),
  (&["heic"], "image/heic"),
  (&["bmp"], "image/bmp"),
  (&["tif", "tiff"], "image/tiff"),
  (&["ico"], "image/x-icon"),
  (&[VECTOR_EXTENSION], "image/svg+xml"),
];

fn extension_pattern() -> &'static Regex {
  use std::sync::OnceLock;

  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"\.([A-Za-z0-9]+)$").expect("invalid extension regex"))
}

/// Extension and mime type derived from an asset url.
///
/// Both fields are `None` when the url carries no extension or the extension is not a
/// known media type, matching how the host reports unrecognised uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileType {
  /// Lowercase file extension without the leading dot.
  pub ext: Option<String>,
  /// Mime type associated with the extension.
  pub mime: Option<String>,
}

impl FileType {
  /// Derive the file type from the extension of `url`, ignoring any query or fragment.
  pub fn from_url(url: &str) -> Self {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let Some(ext) = extension_pattern()
      .captures(path)
      .and_then(|caps| caps.get(1))
      .map(|m| m.as_str().to_ascii_lowercase())
    else {
      return Self::default();
    };

    MIME_TYPES
      .iter()
      .find(|(extensions, _)| extensions.contains(&ext.as_str()))
      .map(|(_, mime)| Self {
        ext: Some(ext.clone()),
        mime: Some((*mime).to_string()),
      })
      .unwrap_or_default()
  }

  /// Returns `true` when the extension is the vector marker.
  pub fn is_vector(&self) -> bool {
    self.ext.as_deref() == Some(VECTOR_EXTENSION)
  }
}
