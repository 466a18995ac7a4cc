//! File format handlers for module resources
//!
//! The binary GFF and TLK formats are decoded by external converters; these
//! modules read the JSON they emit.

pub mod palette_tree;
pub mod resource_kind;
pub mod string_table;

pub use palette_tree::{PaletteNode, PaletteTree};
pub use resource_kind::ResourceKind;
pub use string_table::StringTable;
