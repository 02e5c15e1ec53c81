use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ScanError;

/// File-name suffix of the point-cloud files we look for (matched case-insensitively).
pub const POINT_CLOUD_SUFFIX: &str = ".csv";

// ---------------------------------------------------------------------------
// CatalogEntry
// ---------------------------------------------------------------------------

/// One discovered file: where it is, and how to show it relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
}

impl CatalogEntry {
    /// List label for the entry at zero-based `index`, e.g. `"3. plot_a/tree_02.csv"`.
    pub fn display_label(&self, index: usize) -> String {
        format!("{}. {}", index + 1, self.relative.display())
    }
}

// ---------------------------------------------------------------------------
// FileCatalog
// ---------------------------------------------------------------------------

/// Ordered list of point-cloud files found under one root directory.
///
/// A catalog is never updated incrementally: a new scan produces a new
/// catalog that replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    root: Option<PathBuf>,
    entries: Vec<CatalogEntry>,
}

impl FileCatalog {
    /// Walk `root` and every subdirectory collecting point-cloud files.
    ///
    /// Order is depth-first with siblings sorted by file name, so repeated
    /// scans of an unchanged tree list files identically. Subdirectories that
    /// cannot be read are logged and skipped; only an unreadable root fails.
    pub fn scan(root: &Path) -> Result<Self, ScanError> {
        std::fs::read_dir(root).map_err(|source| ScanError {
            path: root.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable path during scan: {e}");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy();
            if !entry.path().is_file() || !is_point_cloud_name(&name) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            entries.push(CatalogEntry {
                path: entry.into_path(),
                relative,
            });
        }

        log::info!("Found {} point-cloud files under {}", entries.len(), root.display());
        Ok(FileCatalog {
            root: Some(root.to_path_buf()),
            entries,
        })
    }

    /// Root of the last successful scan.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_point_cloud_name(name: &str) -> bool {
    name.to_lowercase().ends_with(POINT_CLOUD_SUFFIX)
}
