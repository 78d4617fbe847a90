#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod file_type;
pub mod host;
pub mod library;
pub mod render;

pub use asset::{AssetDescriptor, AssetNotFound};
pub use config::RenderConfig;
pub use file_type::FileType;
pub use host::{FileStore, LocalFileStore, MediaRegistry};
pub use library::MediaLibrary;
pub use render::{Escaping, RenderOptions, Renderer};
