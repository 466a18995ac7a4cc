use modlayout::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use walkdir::WalkDir;

/// Stand-in for the nwn_* tools: the "archive" is a directory of loose files
/// and every GFF/TLK source already contains the converter's JSON.
struct FixtureTools;

impl ModuleTools for FixtureTools {
    fn extract_archive(&self, archive: &Path, dest_dir: &Path) -> Result<()> {
        for entry in fs::read_dir(archive)? {
            let entry = entry?;
            fs::copy(entry.path(), dest_dir.join(entry.file_name()))?;
        }
        Ok(())
    }

    fn convert_gff(&self, source: &Path, dest: &Path) -> Result<()> {
        fs::copy(source, dest)?;
        Ok(())
    }

    fn convert_tlk(&self, source: &Path, dest: &Path) -> Result<()> {
        fs::copy(source, dest)?;
        Ok(())
    }
}

const DIALOG_TLK: &str = r#"{"entries": [
    {"id": 5, "text": "Animals"},
    {"id": 6, "text": "Birds"},
    {"id": 7, "text": "Weapons"},
    {"id": 8, "text": "Swords"}
]}"#;

const CREATURE_PALETTE: &str = r#"{"MAIN": {"type": "list", "value": [
    {"STRREF": {"type": "dword", "value": 5}, "ID": {"type": "byte", "value": 0}, "LIST": {"type": "list", "value": [
        {"STRREF": {"type": "dword", "value": 6}, "LIST": {"type": "list", "value": [
            {"RESREF": {"type": "resref", "value": "crow01"}, "NAME": {"type": "cexostring", "value": "Crow"}},
            {"RESREF": {"type": "resref", "value": "missing01"}}
        ]}}
    ]}}
]}}"#;

const ITEM_PALETTE: &str = r#"{"MAIN": [
    {"STRREF": 7, "ID": 1, "LIST": [
        {"STRREF": 8, "ID": 2, "LIST": [{"RESREF": "longsword"}]}
    ]}
]}"#;

struct Module {
    dir: TempDir,
    tlk: PathBuf,
}

fn write_module(files: &[(&str, &str)]) -> Module {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("archive");
    fs::create_dir(&archive).unwrap();
    for (name, contents) in files {
        fs::write(archive.join(name), contents).unwrap();
    }
    let tlk = dir.path().join("dialog.tlk");
    fs::write(&tlk, DIALOG_TLK).unwrap();
    Module { dir, tlk }
}

impl Module {
    fn archive(&self) -> PathBuf {
        self.dir.path().join("archive")
    }
}

fn standard_module() -> Module {
    write_module(&[
        ("creaturepalcus.itp", CREATURE_PALETTE),
        ("itempalcus.itp", ITEM_PALETTE),
        ("crow01.utc", "crow blueprint"),
        ("longsword.uti", "sword blueprint"),
        ("area001.are", "are"),
        ("area001.gic", "gic"),
        ("area001.git", "git"),
        ("intro.dlg", "dlg"),
        ("on_enter.nss", "nss"),
        ("on_enter.ncs", "ncs"),
        ("repute.fac", "factions"),
        ("module.jrl", "journal"),
        ("module.ifo", "ifo"),
    ])
}

/// Relative paths of every file under `root`, sorted.
fn file_set(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

#[test]
fn test_full_layout() {
    let module = standard_module();
    let out = tempdir().unwrap();

    let report = extract_module(
        &FixtureTools,
        &ModLayoutConfig::default(),
        &module.archive(),
        &module.tlk,
        out.path(),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(out.path().join("creature/palette.txt")).unwrap(),
        "5.0 Animals\n6 Animals/Birds\n"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("item/palette.txt")).unwrap(),
        "7.1 Weapons\n8.2 Weapons/Swords\n"
    );
    assert_eq!(
        fs::read(out.path().join("creature/Animals/Birds/crow01.utc")).unwrap(),
        b"crow blueprint"
    );

    assert_eq!(
        file_set(out.path()),
        vec![
            PathBuf::from("areas/area001.are"),
            PathBuf::from("areas/area001.gic"),
            PathBuf::from("areas/area001.git"),
            PathBuf::from("creature/Animals/Birds/crow01.utc"),
            PathBuf::from("creature/palette.txt"),
            PathBuf::from("dlg/intro.dlg"),
            PathBuf::from("item/Weapons/Swords/longsword.uti"),
            PathBuf::from("item/palette.txt"),
            PathBuf::from("module.jrl"),
            PathBuf::from("repute.fac"),
            PathBuf::from("scripts/on_enter.ncs"),
            PathBuf::from("scripts/on_enter.nss"),
        ]
    );

    assert_eq!(report.palettes.len(), 2);
    assert!(report.skipped_palettes.is_empty());
    assert_eq!(report.areas, 3);
    assert_eq!(report.scripts, 2);
    assert!(report.journal);
    assert_eq!(report.resources, 12);
    assert_eq!(report.skipped_resources.len(), 1);
    assert!(report.skipped_resources[0].ends_with("module.ifo"));
    assert!(report.resource_counts.contains(&(ResourceKind::PaletteIndex, 2)));
    assert!(report.kept_scratch.is_none());
    // missing01.utc is referenced but absent
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("missing01.utc"));
}

#[test]
fn test_unknown_palette_is_skipped_and_others_proceed() {
    let module = write_module(&[
        ("mysterypal.itp", ITEM_PALETTE),
        ("itempalcus.itp", ITEM_PALETTE),
        ("longsword.uti", "sword"),
        ("repute.fac", "factions"),
    ]);
    let out = tempdir().unwrap();

    let report = extract_module(
        &FixtureTools,
        &ModLayoutConfig::default(),
        &module.archive(),
        &module.tlk,
        out.path(),
    )
    .unwrap();

    assert_eq!(report.palettes.len(), 1);
    assert_eq!(report.palettes[0].kind, ResourceKind::Item);
    assert_eq!(report.skipped_palettes.len(), 1);
    assert!(report.skipped_palettes[0].source.ends_with("mysterypal.itp"));
    assert!(out.path().join("item/palette.txt").exists());
    assert!(!report.journal);
    assert!(!out.path().join("module.jrl").exists());
}

#[test]
fn test_malformed_palette_is_skipped() {
    let module = write_module(&[
        ("doorpalcus.itp", "this is not json"),
        ("storepalcus.itp", r#"{"MAIN": [{"ID": 1}]}"#),
        ("itempalcus.itp", ITEM_PALETTE),
        ("repute.fac", "factions"),
    ]);
    let out = tempdir().unwrap();

    let report = extract_module(
        &FixtureTools,
        &ModLayoutConfig::default(),
        &module.archive(),
        &module.tlk,
        out.path(),
    )
    .unwrap();

    assert_eq!(report.skipped_palettes.len(), 2);
    assert_eq!(report.palettes.len(), 1);
    assert!(!out.path().join("door/palette.txt").exists());
    assert!(!out.path().join("store/palette.txt").exists());
}

#[test]
fn test_missing_string_is_fatal() {
    let module = write_module(&[
        ("creaturepalcus.itp", r#"{"MAIN": [{"STRREF": 5, "LIST": [{"STRREF": 99}]}]}"#),
        ("repute.fac", "factions"),
    ]);
    let out = tempdir().unwrap();

    let err = extract_module(
        &FixtureTools,
        &ModLayoutConfig::default(),
        &module.archive(),
        &module.tlk,
        out.path(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingStringTableEntry { strref: 99 }));
    assert_eq!(err.exit_code(), 4);
    assert!(out.path().join("creature/Animals").is_dir());
    assert!(!out.path().join("creature/palette.txt").exists());
}

#[test]
fn test_unreadable_string_table_fails_on_first_lookup() {
    let module = standard_module();
    let out = tempdir().unwrap();

    let err = extract_module(
        &FixtureTools,
        &ModLayoutConfig::default(),
        &module.archive(),
        &module.dir.path().join("no-such.tlk"),
        out.path(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingStringTableEntry { .. }));
}

#[test]
fn test_missing_faction_is_fatal() {
    let module = write_module(&[("itempalcus.itp", ITEM_PALETTE)]);
    let out = tempdir().unwrap();

    let err = extract_module(
        &FixtureTools,
        &ModLayoutConfig::default(),
        &module.archive(),
        &module.tlk,
        out.path(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::RequiredResourceAbsent {
            kind: ResourceKind::Faction
        }
    ));
}

#[test]
fn test_repeat_runs_are_deterministic() {
    let module = standard_module();
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();

    for out in [&first, &second] {
        extract_module(
            &FixtureTools,
            &ModLayoutConfig::default(),
            &module.archive(),
            &module.tlk,
            out.path(),
        )
        .unwrap();
    }

    assert_eq!(file_set(first.path()), file_set(second.path()));
    for manifest in ["creature/palette.txt", "item/palette.txt"] {
        assert_eq!(
            fs::read_to_string(first.path().join(manifest)).unwrap(),
            fs::read_to_string(second.path().join(manifest)).unwrap()
        );
    }
}

#[test]
fn test_organize_from_existing_catalog() {
    let module = standard_module();
    let scratch = tempdir().unwrap();
    let out = tempdir().unwrap();

    let catalog = ResourceCatalog::scan(module.archive()).unwrap();
    let strings = StringTable::parse_json(DIALOG_TLK).unwrap();
    assert_eq!(catalog.skipped().len(), 1);

    let report = organize(&FixtureTools, &catalog, &strings, out.path(), scratch.path()).unwrap();

    let creature = report
        .palettes
        .iter()
        .find(|p| p.kind == ResourceKind::Creature)
        .unwrap();
    assert_eq!(creature.entries, 2);
    assert_eq!(creature.copied, 1);
    assert_eq!(creature.folder, out.path().join("creature"));
    assert!(scratch.path().join("creaturepalcus.json").exists());
}

#[test]
fn test_scratch_in_working_directory_keeps_user_files() {
    let module = standard_module();
    let out = tempdir().unwrap();
    let config = ModLayoutConfig {
        scratch_dir: Some(module.dir.path().to_path_buf()),
        keep_scratch: true,
        ..ModLayoutConfig::default()
    };

    let report = extract_module(
        &FixtureTools,
        &config,
        &module.archive(),
        &module.tlk,
        out.path(),
    )
    .unwrap();

    let kept = report.kept_scratch.unwrap();
    assert!(kept.starts_with(module.dir.path()));
    assert!(kept.join("resources/repute.fac").exists());
    assert!(module.archive().join("repute.fac").exists());
    assert!(module.tlk.exists());
}

#[test]
fn test_progress_reports_every_phase_in_order() {
    let module = standard_module();
    let out = tempdir().unwrap();
    let mut phases = Vec::new();

    extract_module_with_progress(
        &FixtureTools,
        &ModLayoutConfig::default(),
        &module.archive(),
        &module.tlk,
        out.path(),
        |phase| phases.push(phase),
    )
    .unwrap();

    assert_eq!(phases, Phase::ALL.to_vec());
}
