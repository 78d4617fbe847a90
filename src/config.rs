//! Render configuration loader describing default picture options.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::render::{Escaping, RenderOptions};

/// File name searched for by [`RenderConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "picture.config.json";

/// Discoverable render configuration shared by every asset rendered from a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
  /// Size variant used for the fallback `<img>`.
  pub default_size: Option<String>,
  /// Size label to media query, in output order.
  pub sizes: IndexMap<String, String>,
  /// Class names applied to the `<img>`.
  pub classes: Vec<String>,
  /// Pre-formatted attributes appended to the `<img>`.
  pub data_attributes: Vec<String>,
  /// Whether interpolated values are HTML escaped.
  pub escape: bool,
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      default_size: None,
      sizes: IndexMap::new(),
      classes: Vec::new(),
      data_attributes: Vec::new(),
      escape: true,
    }
  }
}

impl RenderConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unparsable file falls back to defaults so rendering always has options.
  pub fn discover(dir: &Path) -> Self {
    Self::from_path(&dir.join(DEFAULT_CONFIG_FILE)).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
  }

  /// Convert the configuration into render options.
  pub fn into_options(self) -> RenderOptions {
    RenderOptions {
      default_size: self.default_size.filter(|size| !size.is_empty()),
      sizes: self.sizes,
      classes: self.classes,
      data_attributes: self.data_attributes,
      escaping: if self.escape {
        Escaping::Minimal
      } else {
        Escaping::Raw
      },
    }
  }
}
