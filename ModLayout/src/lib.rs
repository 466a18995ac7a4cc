//! # ModLayout
//!
//! Turns a Neverwinter Nights module archive into a folder tree you can
//! browse: every custom palette becomes nested category folders holding the
//! blueprints they list, alongside areas, dialogues, scripts, the faction
//! table and the journal.
//!
//! ## Quick Start
//!
//! ```no_run
//! use modlayout::prelude::*;
//! use std::path::Path;
//!
//! let tools = NwnTools::default();
//! let config = ModLayoutConfig::default();
//! let report = extract_module(
//!     &tools,
//!     &config,
//!     Path::new("mymodule.mod"),
//!     Path::new("dialog.tlk"),
//!     Path::new("out/"),
//! )?;
//! println!("Built {} palettes", report.palettes.len());
//! # Ok::<(), modlayout::Error>(())
//! ```
//!
//! ### Materializing a single palette
//!
//! ```no_run
//! use modlayout::prelude::*;
//! use std::path::Path;
//!
//! let catalog = ResourceCatalog::scan("extracted/")?;
//! let strings = StringTable::read_json("dialog.json")?;
//! let tree = PaletteTree::read_json("creaturepalcus.json")?;
//!
//! let output = Materializer::new(
//!     ResourceKind::Creature,
//!     &catalog,
//!     &strings,
//!     Path::new("out/creature"),
//! )
//! .materialize_all(&tree.entries)?;
//! print!("{}", output.manifest_text());
//! # Ok::<(), modlayout::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `modlayout` command-line binary

pub mod catalog;
pub mod config;
pub mod error;
pub mod formats;
pub mod layout;
pub mod palette;
pub mod tools;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::catalog::ResourceCatalog;
    pub use crate::config::{ModLayoutConfig, ToolConfig};
    pub use crate::error::{Error, Result};
    pub use crate::formats::{PaletteNode, PaletteTree, ResourceKind, StringTable};
    pub use crate::layout::{
        LayoutReport, PaletteSummary, Phase, SkippedPalette, extract_module,
        extract_module_with_progress, organize,
    };
    pub use crate::palette::{ManifestEntry, Materializer, PaletteOutput, palette_kind_for};
    pub use crate::tools::{ModuleTools, NwnTools};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
