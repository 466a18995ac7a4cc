//! Resource kind classification by file extension

use std::fmt;
use std::path::Path;

/// Kind of a module resource, determined solely by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    // Paletteable kinds
    Creature,
    Door,
    Encounter,
    Item,
    Store,
    Placeable,
    Sound,
    Trigger,
    Waypoint,

    // Non-paletteable kinds
    Area,
    AreaHeaderA,
    AreaHeaderB,
    Dialogue,
    Faction,
    PaletteIndex,
    Journal,
    ScriptSource,
    ScriptCompiled,
}

impl ResourceKind {
    /// Every recognized kind, in declaration order.
    pub const ALL: [ResourceKind; 18] = [
        ResourceKind::Creature,
        ResourceKind::Door,
        ResourceKind::Encounter,
        ResourceKind::Item,
        ResourceKind::Store,
        ResourceKind::Placeable,
        ResourceKind::Sound,
        ResourceKind::Trigger,
        ResourceKind::Waypoint,
        ResourceKind::Area,
        ResourceKind::AreaHeaderA,
        ResourceKind::AreaHeaderB,
        ResourceKind::Dialogue,
        ResourceKind::Faction,
        ResourceKind::PaletteIndex,
        ResourceKind::Journal,
        ResourceKind::ScriptSource,
        ResourceKind::ScriptCompiled,
    ];

    /// Classify an extension (without the dot). Matching ignores ASCII case.
    ///
    /// Returns `None` for extensions that are not part of a module.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let kind = match ext.to_ascii_lowercase().as_str() {
            "utc" => ResourceKind::Creature,
            "utd" => ResourceKind::Door,
            "ute" => ResourceKind::Encounter,
            "uti" => ResourceKind::Item,
            "utm" => ResourceKind::Store,
            "utp" => ResourceKind::Placeable,
            "uts" => ResourceKind::Sound,
            "utt" => ResourceKind::Trigger,
            "utw" => ResourceKind::Waypoint,
            "are" => ResourceKind::Area,
            "gic" => ResourceKind::AreaHeaderA,
            "git" => ResourceKind::AreaHeaderB,
            "dlg" => ResourceKind::Dialogue,
            "fac" => ResourceKind::Faction,
            "itp" => ResourceKind::PaletteIndex,
            "jrl" => ResourceKind::Journal,
            "nss" => ResourceKind::ScriptSource,
            "ncs" => ResourceKind::ScriptCompiled,
            _ => return None,
        };
        Some(kind)
    }

    /// Classify a path by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical lowercase extension for this kind.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ResourceKind::Creature => "utc",
            ResourceKind::Door => "utd",
            ResourceKind::Encounter => "ute",
            ResourceKind::Item => "uti",
            ResourceKind::Store => "utm",
            ResourceKind::Placeable => "utp",
            ResourceKind::Sound => "uts",
            ResourceKind::Trigger => "utt",
            ResourceKind::Waypoint => "utw",
            ResourceKind::Area => "are",
            ResourceKind::AreaHeaderA => "gic",
            ResourceKind::AreaHeaderB => "git",
            ResourceKind::Dialogue => "dlg",
            ResourceKind::Faction => "fac",
            ResourceKind::PaletteIndex => "itp",
            ResourceKind::Journal => "jrl",
            ResourceKind::ScriptSource => "nss",
            ResourceKind::ScriptCompiled => "ncs",
        }
    }

    /// Output folder for paletteable kinds, `None` for everything else.
    #[must_use]
    pub fn palette_folder(self) -> Option<&'static str> {
        match self {
            ResourceKind::Creature => Some("creature"),
            ResourceKind::Door => Some("door"),
            ResourceKind::Encounter => Some("encounter"),
            ResourceKind::Item => Some("item"),
            ResourceKind::Store => Some("store"),
            ResourceKind::Placeable => Some("placeable"),
            ResourceKind::Sound => Some("sound"),
            ResourceKind::Trigger => Some("trigger"),
            ResourceKind::Waypoint => Some("waypoint"),
            _ => None,
        }
    }

    /// Whether resources of this kind appear in a palette.
    #[must_use]
    pub fn is_paletteable(self) -> bool {
        self.palette_folder().is_some()
    }

    /// Human-readable name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ResourceKind::Creature => "creature",
            ResourceKind::Door => "door",
            ResourceKind::Encounter => "encounter",
            ResourceKind::Item => "item",
            ResourceKind::Store => "store",
            ResourceKind::Placeable => "placeable",
            ResourceKind::Sound => "sound",
            ResourceKind::Trigger => "trigger",
            ResourceKind::Waypoint => "waypoint",
            ResourceKind::Area => "area",
            ResourceKind::AreaHeaderA => "area header (gic)",
            ResourceKind::AreaHeaderB => "area header (git)",
            ResourceKind::Dialogue => "dialogue",
            ResourceKind::Faction => "faction",
            ResourceKind::PaletteIndex => "palette",
            ResourceKind::Journal => "journal",
            ResourceKind::ScriptSource => "script source",
            ResourceKind::ScriptCompiled => "compiled script",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_round_trips_through_its_extension() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_extension(kind.extension()), Some(kind));
            assert_eq!(
                ResourceKind::from_extension(&kind.extension().to_uppercase()),
                Some(kind)
            );
        }
    }

    #[test]
    fn test_unrecognized_extensions() {
        assert_eq!(ResourceKind::from_extension("ifo"), None);
        assert_eq!(ResourceKind::from_extension(""), None);
        assert_eq!(ResourceKind::from_extension("utcx"), None);
        assert_eq!(ResourceKind::from_path(Path::new("module")), None);
    }

    #[test]
    fn test_from_path_ignores_case() {
        assert_eq!(
            ResourceKind::from_path(Path::new("/tmp/x/Crow01.UTC")),
            Some(ResourceKind::Creature)
        );
        assert_eq!(
            ResourceKind::from_path(Path::new("creaturepalcus.Itp")),
            Some(ResourceKind::PaletteIndex)
        );
    }

    #[test]
    fn test_exactly_nine_paletteable_kinds() {
        let paletteable: Vec<_> = ResourceKind::ALL
            .iter()
            .filter(|k| k.is_paletteable())
            .collect();
        assert_eq!(paletteable.len(), 9);
        assert_eq!(ResourceKind::Store.palette_folder(), Some("store"));
        assert_eq!(ResourceKind::Faction.palette_folder(), None);
    }
}
