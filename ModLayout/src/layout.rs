//! Module output layout
//!
//! Organizes an extracted module into:
//!
//! ```text
//! output/
//!   creature/            one folder per custom palette
//!     Animals/Birds/crow01.utc
//!     palette.txt
//!   item/ ...
//!   areas/               .are, .gic, .git
//!   dlg/                 .dlg
//!   scripts/             .ncs, .nss
//!   repute.fac
//!   module.jrl           (only when the module has a journal)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::catalog::ResourceCatalog;
use crate::config::ModLayoutConfig;
use crate::error::{Error, Result};
use crate::formats::{ResourceKind, StringTable};
use crate::palette::{MANIFEST_FILE_NAME, Materializer, palette_kind_for};
use crate::tools::{ModuleTools, load_palette, load_string_table};

/// Folder receiving area resources
pub const AREAS_DIR: &str = "areas";
/// Folder receiving dialogue trees
pub const DIALOGUE_DIR: &str = "dlg";
/// Folder receiving script sources and compiled scripts
pub const SCRIPTS_DIR: &str = "scripts";
/// Destination of the module's faction table
pub const FACTION_FILE_NAME: &str = "repute.fac";
/// Destination of the module's journal
pub const JOURNAL_FILE_NAME: &str = "module.jrl";

const AREA_KINDS: [ResourceKind; 3] = [
    ResourceKind::Area,
    ResourceKind::AreaHeaderA,
    ResourceKind::AreaHeaderB,
];
const SCRIPT_KINDS: [ResourceKind; 2] = [ResourceKind::ScriptCompiled, ResourceKind::ScriptSource];

/// Summary of one materialized palette
#[derive(Debug, Clone)]
pub struct PaletteSummary {
    pub kind: ResourceKind,
    /// The `.itp` the palette came from
    pub source: PathBuf,
    /// Output folder of the palette
    pub folder: PathBuf,
    /// Lines written to `palette.txt`
    pub entries: usize,
    /// Blueprints copied into the folder
    pub copied: usize,
}

/// A palette source that was skipped without aborting the run
#[derive(Debug, Clone)]
pub struct SkippedPalette {
    pub source: PathBuf,
    pub reason: String,
}

/// Result of a layout run
#[derive(Debug, Clone, Default)]
pub struct LayoutReport {
    pub palettes: Vec<PaletteSummary>,
    pub skipped_palettes: Vec<SkippedPalette>,
    pub areas: usize,
    pub dialogues: usize,
    pub scripts: usize,
    pub journal: bool,
    /// Classified resources in the catalog
    pub resources: usize,
    /// Per-kind resource counts, omitting empty kinds
    pub resource_counts: Vec<(ResourceKind, usize)>,
    /// Extracted files whose extension matched no kind
    pub skipped_resources: Vec<PathBuf>,
    /// Scratch directory left in place by `keep_scratch`
    pub kept_scratch: Option<PathBuf>,
    /// Warnings encountered during processing
    pub warnings: Vec<String>,
}

/// Phases of a full run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Extracting,
    Cataloging,
    LoadingStrings,
    Organizing,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Extracting,
        Phase::Cataloging,
        Phase::LoadingStrings,
        Phase::Organizing,
    ];

    /// 1-based position in [`Phase::ALL`]
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Extracting => "Extracting module...",
            Phase::Cataloging => "Cataloging resources...",
            Phase::LoadingStrings => "Loading string table...",
            Phase::Organizing => "Building palettes and copying files...",
        }
    }
}

/// Lay out an already-extracted module under `output_root`.
///
/// Palette sources whose kind is unknown, whose conversion fails, or whose
/// tree is malformed are skipped with a warning. Missing string-table
/// entries, copy failures and a missing faction table abort the run.
pub fn organize<T: ModuleTools + ?Sized>(
    tools: &T,
    catalog: &ResourceCatalog,
    strings: &StringTable,
    output_root: &Path,
    scratch: &Path,
) -> Result<LayoutReport> {
    fs::create_dir_all(output_root)?;
    fs::create_dir_all(scratch)?;
    tracing::info!(
        "Organizing {} into {}",
        catalog.root().display(),
        output_root.display()
    );

    let mut report = LayoutReport {
        resources: catalog.len(),
        resource_counts: catalog.counts(),
        skipped_resources: catalog.skipped().to_vec(),
        ..LayoutReport::default()
    };

    for itp in catalog.files(ResourceKind::PaletteIndex) {
        match build_palette(tools, itp, catalog, strings, output_root, scratch) {
            Ok((summary, warnings)) => {
                tracing::info!(
                    "Built {} palette: {} categories, {} blueprints",
                    summary.kind,
                    summary.entries,
                    summary.copied
                );
                report.palettes.push(summary);
                report.warnings.extend(warnings);
            }
            Err(
                e @ (Error::UnknownPaletteKind { .. }
                | Error::ExternalToolFailure { .. }
                | Error::InvalidPaletteTree { .. }
                | Error::JsonError(_)),
            ) => {
                let reason = e.to_string();
                tracing::warn!("Skipping palette {}: {reason}", itp.display());
                report
                    .warnings
                    .push(format!("Skipped palette {}: {reason}", itp.display()));
                report.skipped_palettes.push(SkippedPalette {
                    source: itp.clone(),
                    reason,
                });
            }
            Err(e) => return Err(e),
        }
    }

    copy_loose_files(catalog, output_root, &mut report)?;
    Ok(report)
}

fn build_palette<T: ModuleTools + ?Sized>(
    tools: &T,
    itp: &Path,
    catalog: &ResourceCatalog,
    strings: &StringTable,
    output_root: &Path,
    scratch: &Path,
) -> Result<(PaletteSummary, Vec<String>)> {
    let kind = palette_kind_for(itp)?;
    let Some(folder_name) = kind.palette_folder() else {
        return Err(Error::UnknownPaletteKind {
            path: itp.to_path_buf(),
        });
    };

    let tree = load_palette(tools, itp, scratch)?;

    let folder = output_root.join(folder_name);
    fs::create_dir_all(&folder)?;

    let output = Materializer::new(kind, catalog, strings, &folder).materialize_all(&tree.entries)?;
    fs::write(folder.join(MANIFEST_FILE_NAME), output.manifest_text())?;

    let summary = PaletteSummary {
        kind,
        source: itp.to_path_buf(),
        folder,
        entries: output.entries.len(),
        copied: output.copied.len(),
    };
    Ok((summary, output.warnings))
}

fn copy_loose_files(
    catalog: &ResourceCatalog,
    output_root: &Path,
    report: &mut LayoutReport,
) -> Result<()> {
    report.areas = copy_kinds_into(catalog, &AREA_KINDS, &output_root.join(AREAS_DIR))?;
    report.dialogues = copy_kinds_into(
        catalog,
        &[ResourceKind::Dialogue],
        &output_root.join(DIALOGUE_DIR),
    )?;
    report.scripts = copy_kinds_into(catalog, &SCRIPT_KINDS, &output_root.join(SCRIPTS_DIR))?;

    // Every module has exactly one faction table.
    let faction = catalog
        .first(ResourceKind::Faction)
        .ok_or(Error::RequiredResourceAbsent {
            kind: ResourceKind::Faction,
        })?;
    copy_file(faction, &output_root.join(FACTION_FILE_NAME))?;

    if let Some(journal) = catalog.first(ResourceKind::Journal) {
        copy_file(journal, &output_root.join(JOURNAL_FILE_NAME))?;
        report.journal = true;
    }

    Ok(())
}

/// Copy every file of `kinds` into `dir` under its own name.
fn copy_kinds_into(catalog: &ResourceCatalog, kinds: &[ResourceKind], dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)?;

    let mut count = 0;
    for kind in kinds {
        for file in catalog.files(*kind) {
            let Some(name) = file.file_name() else {
                continue;
            };
            copy_file(file, &dir.join(name))?;
            count += 1;
        }
    }

    tracing::debug!("Copied {count} files into {}", dir.display());
    Ok(count)
}

fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination).map_err(|e| Error::FileCopyFailure {
        source_path: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Scratch space for extracted resources and converter output
///
/// Always a fresh `modlayout*` directory created inside the configured
/// scratch directory (or the system temp directory), so nothing already in
/// that directory is touched. Removed on drop unless `keep_scratch` is set.
pub struct ScratchSpace {
    root: PathBuf,
    _temp: Option<TempDir>,
}

impl ScratchSpace {
    pub fn prepare(config: &ModLayoutConfig) -> Result<Self> {
        let parent = config
            .scratch_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        fs::create_dir_all(&parent)?;

        let temp = tempfile::Builder::new().prefix("modlayout").tempdir_in(&parent)?;
        let scratch = if config.keep_scratch {
            Self {
                root: temp.keep(),
                _temp: None,
            }
        } else {
            Self {
                root: temp.path().to_path_buf(),
                _temp: Some(temp),
            }
        };

        fs::create_dir_all(scratch.resources_dir())?;
        fs::create_dir_all(scratch.converted_dir())?;
        Ok(scratch)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Where the archive is extracted
    pub fn resources_dir(&self) -> PathBuf {
        self.root.join("resources")
    }

    /// Where converter JSON is written
    pub fn converted_dir(&self) -> PathBuf {
        self.root.join("converted")
    }
}

/// Full run: extract `archive`, load `tlk`, and lay the module out in `output_root`.
pub fn extract_module<T: ModuleTools + ?Sized>(
    tools: &T,
    config: &ModLayoutConfig,
    archive: &Path,
    tlk: &Path,
    output_root: &Path,
) -> Result<LayoutReport> {
    extract_module_with_progress(tools, config, archive, tlk, output_root, |_| {})
}

/// [`extract_module`], calling `on_phase` as each [`Phase`] begins.
pub fn extract_module_with_progress<T, F>(
    tools: &T,
    config: &ModLayoutConfig,
    archive: &Path,
    tlk: &Path,
    output_root: &Path,
    mut on_phase: F,
) -> Result<LayoutReport>
where
    T: ModuleTools + ?Sized,
    F: FnMut(Phase),
{
    let scratch = ScratchSpace::prepare(config)?;
    tracing::info!("Using scratch path {}", scratch.path().display());

    on_phase(Phase::Extracting);
    let resources = scratch.resources_dir();
    tools.extract_archive(archive, &resources)?;

    on_phase(Phase::Cataloging);
    let catalog = ResourceCatalog::scan(&resources)?;

    on_phase(Phase::LoadingStrings);
    let strings = load_string_table(tools, tlk, &scratch.converted_dir());

    on_phase(Phase::Organizing);
    let mut report = organize(tools, &catalog, &strings, output_root, &scratch.converted_dir())?;
    if config.keep_scratch {
        report.kept_scratch = Some(scratch.path().to_path_buf());
    }
    Ok(report)
}
