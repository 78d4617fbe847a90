//! Render a single media library asset to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use indexmap::IndexMap;
use picture_markup::{Escaping, MediaLibrary, RenderConfig, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "render-picture")]
#[command(about = "Render a media asset as inline SVG or responsive <picture> markup")]
#[command(version)]
struct Cli {
  /// Attachment identifier to render
  id: u64,

  /// Media library manifest (JSON, or YAML by extension)
  #[arg(short, long)]
  library: PathBuf,

  /// Render configuration file; defaults to picture.config.json next to the manifest
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Size variant used for the fallback <img>
  #[arg(short, long)]
  size: Option<String>,

  /// Size variant as LABEL=MEDIA_QUERY, appended after configured variants (a configured
  /// label given again moves to the end with the new query)
  #[arg(long = "variant", value_parser = parse_variant)]
  variants: Vec<(String, String)>,

  /// Class name for the <img>
  #[arg(long = "class")]
  classes: Vec<String>,

  /// Pre-formatted attribute for the <img>
  #[arg(long = "data")]
  data_attributes: Vec<String>,

  /// Insert values without HTML escaping
  #[arg(long)]
  raw: bool,
}

fn parse_variant(value: &str) -> Result<(String, String)> {
  let (label, media) = value
    .split_once('=')
    .ok_or_else(|| anyhow!("expected LABEL=MEDIA_QUERY, got `{value}`"))?;
  if label.trim().is_empty() {
    bail!("variant label must not be empty");
  }
  Ok((label.trim().to_string(), media.trim().to_string()))
}

fn append_variants(sizes: &mut IndexMap<String, String>, variants: Vec<(String, String)>) {
  for (label, media) in variants {
    sizes.shift_remove(&label);
    sizes.insert(label, media);
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let library = MediaLibrary::load(&cli.library)
    .with_context(|| format!("failed to load media library {}", cli.library.display()))?;

  let config = match &cli.config {
    Some(path) => RenderConfig::from_path(path)?,
    None => {
      let dir = cli.library.parent().map(PathBuf::from).unwrap_or_default();
      RenderConfig::discover(&dir)
    }
  };

  let mut options = config.into_options();
  if cli.size.is_some() {
    options.default_size = cli.size;
  }
  append_variants(&mut options.sizes, cli.variants);
  options.classes.extend(cli.classes);
  options.data_attributes.extend(cli.data_attributes);
  if cli.raw {
    options.escaping = Escaping::Raw;
  }

  let renderer = Renderer::new(library);
  let markup = renderer
    .render(Some(cli.id), &options)
    .ok_or_else(|| anyhow!("asset {} could not be resolved", cli.id))?;

  println!("{markup}");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_label_and_media_query() {
    let (label, media) = parse_variant(" thumbnail = (max-width: 600px) ").expect("valid variant");
    assert_eq!(label, "thumbnail");
    assert_eq!(media, "(max-width: 600px)");
  }

  #[test]
  fn keeps_equals_signs_inside_media_query() {
    let (label, media) = parse_variant("large=(min-resolution: 2dppx) and (x=y)").expect("valid variant");
    assert_eq!(label, "large");
    assert_eq!(media, "(min-resolution: 2dppx) and (x=y)");
  }

  #[test]
  fn rejects_missing_separator() {
    let err = parse_variant("thumbnail").unwrap_err();
    assert!(err.to_string().contains("expected LABEL=MEDIA_QUERY"));
  }

  #[test]
  fn rejects_empty_label() {
    let err = parse_variant("  =(max-width: 600px)").unwrap_err();
    assert_eq!(err.to_string(), "variant label must not be empty");
  }

  #[test]
  fn flag_variants_land_after_configured_ones() {
    let mut sizes = IndexMap::new();
    sizes.insert("large".to_string(), "(min-width: 1025px)".to_string());
    sizes.insert("medium".to_string(), "(min-width: 601px)".to_string());

    append_variants(&mut sizes, vec![
      ("thumbnail".to_string(), "(max-width: 600px)".to_string()),
      ("large".to_string(), "(min-width: 1200px)".to_string()),
    ]);

    let order: Vec<(&str, &str)> = sizes
      .iter()
      .map(|(label, media)| (label.as_str(), media.as_str()))
      .collect();
    assert_eq!(order, vec![
      ("medium", "(min-width: 601px)"),
      ("thumbnail", "(max-width: 600px)"),
      ("large", "(min-width: 1200px)"),
    ]);
  }
}
