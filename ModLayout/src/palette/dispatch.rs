//! Palette source → resource kind dispatch

use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::ResourceKind;

/// File stem suffix of each custom palette, and the kind it catalogs.
pub const PALETTE_SUFFIXES: [(&str, ResourceKind); 9] = [
    ("creaturepalcus", ResourceKind::Creature),
    ("doorpalcus", ResourceKind::Door),
    ("encounterpalcus", ResourceKind::Encounter),
    ("itempalcus", ResourceKind::Item),
    ("placeablepalcus", ResourceKind::Placeable),
    ("soundpalcus", ResourceKind::Sound),
    ("storepalcus", ResourceKind::Store),
    ("triggerpalcus", ResourceKind::Trigger),
    ("waypointpalcus", ResourceKind::Waypoint),
];

/// Resource kind cataloged by the palette source at `path`.
///
/// Works on either the `.itp` source or its converted `.json`; only the file
/// stem is matched, ignoring ASCII case.
///
/// # Errors
/// Returns [`Error::UnknownPaletteKind`] when no suffix matches.
pub fn palette_kind_for(path: &Path) -> Result<ResourceKind> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    PALETTE_SUFFIXES
        .iter()
        .find(|(suffix, _)| stem.ends_with(*suffix))
        .map(|(_, kind)| *kind)
        .ok_or_else(|| Error::UnknownPaletteKind {
            path: path.to_path_buf(),
        })
}
