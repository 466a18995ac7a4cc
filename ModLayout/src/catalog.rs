//! Resource catalog of an extracted module
//!
//! Built once from a flat directory scan; every file lands in exactly one
//! bucket, chosen by its extension. The catalog is the single source of truth
//! for which resources exist; nothing re-scans the filesystem afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::formats::ResourceKind;

/// Resources of a module grouped by kind
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    root: PathBuf,
    resources: HashMap<ResourceKind, Vec<PathBuf>>,
    skipped: Vec<PathBuf>,
}

impl ResourceCatalog {
    /// Scan the files directly inside `dir` (subdirectories are ignored).
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        let catalog = Self::from_files(dir, files);
        tracing::info!(
            "Cataloged {} resources in {} ({} skipped)",
            catalog.len(),
            dir.display(),
            catalog.skipped.len()
        );
        Ok(catalog)
    }

    /// Build a catalog from an explicit file list rooted at `root`.
    pub fn from_files<I>(root: impl Into<PathBuf>, files: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut resources: HashMap<ResourceKind, Vec<PathBuf>> = HashMap::new();
        let mut skipped = Vec::new();

        for file in files {
            match ResourceKind::from_path(&file) {
                Some(kind) => resources.entry(kind).or_default().push(file),
                None => {
                    tracing::info!("Skipping unrecognized resource {}", file.display());
                    skipped.push(file);
                }
            }
        }

        for bucket in resources.values_mut() {
            bucket.sort();
            bucket.dedup();
        }
        skipped.sort();

        Self {
            root: root.into(),
            resources,
            skipped,
        }
    }

    /// Directory the catalog was built from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All files of `kind`, sorted by path
    pub fn files(&self, kind: ResourceKind) -> &[PathBuf] {
        self.resources.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// First file of `kind` in path order
    pub fn first(&self, kind: ResourceKind) -> Option<&Path> {
        self.files(kind).first().map(PathBuf::as_path)
    }

    /// Look up `file_name` in the `kind` bucket by exact path.
    pub fn find(&self, kind: ResourceKind, file_name: &str) -> Option<&Path> {
        let expected = self.root.join(file_name);
        self.files(kind)
            .iter()
            .find(|path| **path == expected)
            .map(PathBuf::as_path)
    }

    /// Files whose extension matched no kind
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Per-kind counts in kind order, omitting empty kinds
    pub fn counts(&self) -> Vec<(ResourceKind, usize)> {
        ResourceKind::ALL
            .iter()
            .map(|kind| (*kind, self.files(*kind).len()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Number of classified files
    pub fn len(&self) -> usize {
        self.resources.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
