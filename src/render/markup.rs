//! Fragment builders assembling the `<picture>` element.

use indexmap::IndexMap;

use super::{Escaping, RenderOptions};
use crate::asset::AssetDescriptor;
use crate::host::MediaRegistry;

/// Build one `<source>` per size variant, in the order the variants were declared.
///
/// The descriptor's own url is reused for its size so the default rendition is never
/// looked up twice.
pub(super) fn sources<R: MediaRegistry + ?Sized>(
  registry: &R,
  asset: &AssetDescriptor,
  sizes: &IndexMap<String, String>,
  escaping: Escaping,
) -> String {
  let mut sources = String::new();

  for (size, media) in sizes {
    let url = if asset.size() == Some(size.as_str()) {
      Some(asset.url().to_string())
    } else {
      registry.resolve_url(asset.id(), Some(size))
    };

    let url = url.unwrap_or_default();
    if url.is_empty() {
      tracing::debug!("asset {} has no url for size {}", asset.id(), size);
    }

    sources.push_str(&format!(
      r#"<source srcset="{}" media="{}">"#,
      escaping.apply(&url),
      escaping.apply(media)
    ));
  }

  sources
}

/// Render the safelisted attributes, each with a leading space.
pub(super) fn attributes(asset: &AssetDescriptor, escaping: Escaping) -> String {
  asset
    .markup_attributes()
    .iter()
    .map(|(name, value)| format!(r#" {}="{}""#, name, escaping.apply(value)))
    .collect()
}

pub(super) fn class_attribute(classes: &[String], escaping: Escaping) -> String {
  if classes.is_empty() {
    return String::new();
  }

  let joined = classes
    .iter()
    .map(|class| escaping.apply(class).into_owned())
    .collect::<Vec<_>>()
    .join(" ");
  format!(r#"class="{joined}""#)
}

/// Join caller-formatted attributes verbatim.
pub(super) fn data_attributes(attributes: &[String]) -> String {
  attributes.join(" ")
}

/// Wrap the sources and fallback `<img>` into the final `<picture>` block.
pub(super) fn picture(asset: &AssetDescriptor, sources: &str, options: &RenderOptions) -> String {
  let mut img = format!(
    r#"<img src="{}"{}"#,
    options.escaping.apply(asset.url()),
    attributes(asset, options.escaping)
  );

  for extra in [
    class_attribute(&options.classes, options.escaping),
    data_attributes(&options.data_attributes),
  ] {
    if !extra.is_empty() {
      img.push(' ');
      img.push_str(&extra);
    }
  }
  img.push('>');

  format!("<picture>{sources}{img}</picture>")
}
