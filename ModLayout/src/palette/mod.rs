//! Palette handling: kind dispatch and tree materialization

pub mod dispatch;
pub mod materialize;

pub use dispatch::{PALETTE_SUFFIXES, palette_kind_for};
pub use materialize::{ManifestEntry, Materializer, PaletteOutput};

/// Manifest file written into every palette folder
pub const MANIFEST_FILE_NAME: &str = "palette.txt";
