//! Markup rendering for media assets.
//!
//! Vector assets are inlined as their raw file contents. Everything else becomes a
//! `<picture>` element with one `<source>` per configured size variant followed by a
//! fallback `<img>`.

mod markup;

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::asset::AssetDescriptor;
use crate::host::{FileStore, LocalFileStore, MediaRegistry};

/// How interpolated values are written into the markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escaping {
  /// Escape `&`, `<`, `>`, `"` and `'` in urls, metadata, class names and media queries.
  #[default]
  Minimal,
  /// Insert values untouched, for consumers relying on the unescaped output.
  Raw,
}

impl Escaping {
  fn apply(self, value: &str) -> Cow<'_, str> {
    match self {
      Self::Minimal => Cow::Owned(htmlescape::encode_minimal(value)),
      Self::Raw => Cow::Borrowed(value),
    }
  }
}

/// Options controlling a single render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
  /// Size variant used for the fallback `<img>`.
  pub default_size: Option<String>,
  /// Size label to media query, emitted as `<source>` elements in insertion order.
  pub sizes: IndexMap<String, String>,
  /// Class names applied to the `<img>`.
  pub classes: Vec<String>,
  /// Pre-formatted attributes appended to the `<img>` as-is.
  pub data_attributes: Vec<String>,
  /// Escaping applied to interpolated values.
  pub escaping: Escaping,
}

impl RenderOptions {
  /// Options rendering the given default size.
  pub fn with_default_size(size: impl Into<String>) -> Self {
    Self {
      default_size: Some(size.into()),
      ..Self::default()
    }
  }

  /// Append a size variant and its media query.
  pub fn size(mut self, label: impl Into<String>, media: impl Into<String>) -> Self {
    self.sizes.insert(label.into(), media.into());
    self
  }

  /// Append a class name.
  pub fn class(mut self, class: impl Into<String>) -> Self {
    self.classes.push(class.into());
    self
  }

  /// Append a pre-formatted attribute.
  pub fn data_attribute(mut self, attribute: impl Into<String>) -> Self {
    self.data_attributes.push(attribute.into());
    self
  }
}

/// Renders assets looked up through a [`MediaRegistry`].
#[derive(Debug, Clone)]
pub struct Renderer<R, F = LocalFileStore> {
  registry: R,
  files: F,
}

impl<R: MediaRegistry> Renderer<R> {
  /// Create a renderer reading vector files from the local filesystem.
  pub fn new(registry: R) -> Self {
    Self {
      registry,
      files: LocalFileStore,
    }
  }
}

impl<R: MediaRegistry, F: FileStore> Renderer<R, F> {
  /// Create a renderer with a custom file store.
  pub fn with_file_store(registry: R, files: F) -> Self {
    Self { registry, files }
  }

  /// Registry used for lookups.
  pub fn registry(&self) -> &R {
    &self.registry
  }

  /// Render asset `id`.
  ///
  /// Returns `Some("")` when no id (or id `0`) is given and `None` when the asset cannot
  /// be resolved, so callers can tell "nothing requested" from "asset missing".
  pub fn render(&self, id: Option<u64>, options: &RenderOptions) -> Option<String> {
    let Some(id) = id.filter(|id| *id != 0) else {
      return Some(String::new());
    };

    match AssetDescriptor::resolve(&self.registry, id, options.default_size.as_deref()) {
      Ok(asset) => Some(self.render_descriptor(&asset, options)),
      Err(err) => {
        tracing::debug!("{err}");
        None
      }
    }
  }

  /// Render an already resolved descriptor.
  pub fn render_descriptor(&self, asset: &AssetDescriptor, options: &RenderOptions) -> String {
    if asset.is_vector_format() {
      return asset.vector_content(&self.registry, &self.files);
    }

    let sources = markup::sources(&self.registry, asset, &options.sizes, options.escaping);
    markup::picture(asset, &sources, options)
  }
}
