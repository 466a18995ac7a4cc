//! External converters from the neverwinter.nim tool suite
//!
//! Archive extraction and GFF/TLK decoding are delegated to `nwn_erf`,
//! `nwn_gff` and `nwn_tlk`. [`ModuleTools`] is the seam: the layout code only
//! talks to the trait, and tests substitute their own implementation.

use std::path::Path;
use std::process::Command;

use crate::config::ToolConfig;
use crate::error::{Error, Result};
use crate::formats::{PaletteTree, StringTable};

/// Operations provided by external tools
pub trait ModuleTools {
    /// Extract every resource of `archive` as loose files into `dest_dir`.
    fn extract_archive(&self, archive: &Path, dest_dir: &Path) -> Result<()>;

    /// Convert a binary GFF file (e.g. an `.itp` palette) to GFF JSON at `dest`.
    fn convert_gff(&self, source: &Path, dest: &Path) -> Result<()>;

    /// Convert a binary `.tlk` string table to TLK JSON at `dest`.
    fn convert_tlk(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// [`ModuleTools`] backed by the neverwinter.nim executables
#[derive(Debug, Clone)]
pub struct NwnTools {
    erf: String,
    gff: String,
    tlk: String,
}

impl Default for NwnTools {
    fn default() -> Self {
        Self::new(&ToolConfig::default())
    }
}

impl NwnTools {
    /// Create a backend using the program names in `config`
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            erf: config.erf.clone(),
            gff: config.gff.clone(),
            tlk: config.tlk.clone(),
        }
    }

    fn run(command: &mut Command, tool: &str, input: &Path) -> Result<()> {
        tracing::debug!("Running {command:?}");

        let output = command.output().map_err(|source| Error::ExternalToolSpawn {
            tool: tool.to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!("{tool} stderr: {}", stderr.trim());
            return Err(Error::ExternalToolFailure {
                tool: tool.to_string(),
                input: input.to_path_buf(),
                status: output.status,
            });
        }
        Ok(())
    }
}

impl ModuleTools for NwnTools {
    fn extract_archive(&self, archive: &Path, dest_dir: &Path) -> Result<()> {
        // nwn_erf extracts into its working directory, so the archive path
        // must survive the change of directory.
        let archive = std::path::absolute(archive)?;
        Self::run(
            Command::new(&self.erf)
                .arg("-x")
                .arg("-f")
                .arg(&archive)
                .current_dir(dest_dir),
            &self.erf,
            &archive,
        )
    }

    fn convert_gff(&self, source: &Path, dest: &Path) -> Result<()> {
        Self::run(
            Command::new(&self.gff).arg("-i").arg(source).arg("-o").arg(dest),
            &self.gff,
            source,
        )
    }

    fn convert_tlk(&self, source: &Path, dest: &Path) -> Result<()> {
        Self::run(
            Command::new(&self.tlk).arg("-i").arg(source).arg("-o").arg(dest),
            &self.tlk,
            source,
        )
    }
}

/// Convert and load the string table.
///
/// A failed conversion is not fatal: the table comes back empty and any
/// later STRREF lookup fails instead.
pub fn load_string_table<T: ModuleTools + ?Sized>(
    tools: &T,
    tlk: &Path,
    scratch: &Path,
) -> StringTable {
    let json_path = scratch.join("dialog.tlk.json");

    let loaded = tools
        .convert_tlk(tlk, &json_path)
        .and_then(|()| StringTable::read_json(&json_path));

    match loaded {
        Ok(table) => {
            tracing::info!("Loaded {} strings from {}", table.len(), tlk.display());
            table
        }
        Err(e) => {
            tracing::warn!("Failed to load string table {}: {e}", tlk.display());
            StringTable::new()
        }
    }
}

/// Convert one palette source into scratch space and parse it.
pub fn load_palette<T: ModuleTools + ?Sized>(
    tools: &T,
    itp: &Path,
    scratch: &Path,
) -> Result<PaletteTree> {
    let stem = itp.file_stem().unwrap_or(itp.as_os_str());
    let json_path = scratch.join(stem).with_extension("json");

    tools.convert_gff(itp, &json_path)?;
    PaletteTree::read_json(&json_path)
}
