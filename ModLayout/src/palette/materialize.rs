//! Palette tree materialization
//!
//! Walks a [`PaletteNode`] tree in pre-order. Category nodes become nested
//! directories named after their string-table text and contribute one
//! manifest line each; leaf nodes copy the blueprint they reference into the
//! directory of their parent category.
//!
//! Each call returns its own [`PaletteOutput`] and the caller appends it, so
//! output order is exactly the left-to-right order of the source tree.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::ResourceCatalog;
use crate::error::{Error, Result};
use crate::formats::{PaletteNode, ResourceKind, StringTable};

/// One `palette.txt` line: `<strref>[.<id>] <cumulative path>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub strref: u32,
    pub id: Option<u32>,
    /// `/`-joined category texts from the palette root down to this node
    pub path: String,
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}.{id} {}", self.strref, self.path),
            None => write!(f, "{} {}", self.strref, self.path),
        }
    }
}

/// Everything produced by materializing one subtree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteOutput {
    /// Manifest lines in pre-order
    pub entries: Vec<ManifestEntry>,
    /// Destination of every copied blueprint, in copy order
    pub copied: Vec<PathBuf>,
    /// Non-fatal problems (missing blueprints, overwritten files)
    pub warnings: Vec<String>,
}

impl PaletteOutput {
    /// Append the output of a later sibling or child.
    pub fn append(&mut self, other: PaletteOutput) {
        self.entries.extend(other.entries);
        self.copied.extend(other.copied);
        self.warnings.extend(other.warnings);
    }

    /// `palette.txt` contents: one line per entry, each newline-terminated.
    pub fn manifest_text(&self) -> String {
        self.entries.iter().map(|entry| format!("{entry}\n")).collect()
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

/// Materializes palette trees of one kind into `output_root`.
///
/// Category text is joined into paths verbatim: a `/` in the text nests
/// another directory level and a `..` label resolves above `output_root`.
pub struct Materializer<'a> {
    kind: ResourceKind,
    catalog: &'a ResourceCatalog,
    strings: &'a StringTable,
    output_root: &'a Path,
}

impl<'a> Materializer<'a> {
    pub fn new(
        kind: ResourceKind,
        catalog: &'a ResourceCatalog,
        strings: &'a StringTable,
        output_root: &'a Path,
    ) -> Self {
        Self {
            kind,
            catalog,
            strings,
            output_root,
        }
    }

    /// Materialize one top-level palette entry.
    ///
    /// # Errors
    /// [`Error::MissingStringTableEntry`] if a category's STRREF is not in the
    /// string table, [`Error::FileCopyFailure`] if a blueprint cannot be copied,
    /// [`Error::Io`] if a category directory cannot be created. Missing
    /// blueprints are warnings, not errors.
    pub fn materialize(&self, node: &PaletteNode) -> Result<PaletteOutput> {
        self.visit(node, "")
    }

    /// Materialize top-level entries in order and concatenate their output.
    pub fn materialize_all(&self, nodes: &[PaletteNode]) -> Result<PaletteOutput> {
        let mut output = PaletteOutput::default();
        for node in nodes {
            output.append(self.materialize(node)?);
        }
        Ok(output)
    }

    fn visit(&self, node: &PaletteNode, parent: &str) -> Result<PaletteOutput> {
        match node {
            PaletteNode::Leaf { resref } => self.copy_blueprint(resref, parent),
            PaletteNode::Category {
                strref,
                id,
                children,
            } => {
                let text = self.strings.resolve(*strref)?;
                let path = if parent.is_empty() {
                    text.to_string()
                } else {
                    format!("{parent}/{text}")
                };

                // Siblings resolving to the same text share this directory.
                fs::create_dir_all(self.output_root.join(&path))?;
                tracing::debug!("Category {strref} -> {path}");

                let mut output = PaletteOutput::default();
                output.entries.push(ManifestEntry {
                    strref: *strref,
                    id: *id,
                    path: path.clone(),
                });

                for child in children {
                    output.append(self.visit(child, &path)?);
                }
                Ok(output)
            }
        }
    }

    fn copy_blueprint(&self, resref: &str, dir: &str) -> Result<PaletteOutput> {
        let mut output = PaletteOutput::default();
        let file_name = format!("{resref}.{}", self.kind.extension());

        let Some(source) = self.catalog.find(self.kind, &file_name) else {
            output.warn(format!(
                "Failed to find {file_name} when constructing the {} palette",
                self.kind
            ));
            return Ok(output);
        };

        let destination = self.output_root.join(dir).join(&file_name);
        if destination.exists() {
            output.warn(format!(
                "Resource {} already exists, replacing it",
                destination.display()
            ));
        }

        fs::copy(source, &destination).map_err(|source_err| Error::FileCopyFailure {
            source_path: source.to_path_buf(),
            destination: destination.clone(),
            source: source_err,
        })?;

        output.copied.push(destination);
        Ok(output)
    }
}
