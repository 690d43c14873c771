use crate::ports::outbound::{SbomReader, SbomScan};
use crate::sbom_diff::domain::RawSbom;
use crate::shared::error::SbomError;
use crate::shared::security::{check_source_file, MAX_SBOM_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// SbomDirectoryReader adapter for collecting SBOM files from disk
///
/// Walks a directory tree recursively and reads every regular file whose
/// name ends with the configured suffix. Files are returned in path order
/// and identified by their bare file name, which carries the variant prefix.
pub struct SbomDirectoryReader {
    max_file_size: u64,
}

impl SbomDirectoryReader {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_SBOM_SIZE,
        }
    }

    /// Overrides the per-file size limit
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    fn collect_paths(&self, dir: &Path, suffix: &str, paths: &mut Vec<PathBuf>) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| SbomError::FileReadError {
            path: dir.to_path_buf(),
            details: e.to_string(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| SbomError::FileReadError {
                path: dir.to_path_buf(),
                details: e.to_string(),
            })?;
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            // Symlinked directories are not followed
            if file_type.is_dir() {
                self.collect_paths(&path, suffix, paths)?;
            } else if has_suffix(&path, suffix) {
                paths.push(path);
            }
        }
        Ok(())
    }

    fn read_one(&self, path: &Path) -> Option<RawSbom> {
        let identifier = path.file_name()?.to_string_lossy().into_owned();

        if let Err(e) = check_source_file(path, self.max_file_size) {
            tracing::warn!(path = %path.display(), error = %e, "skipping SBOM file");
            return None;
        }

        match fs::read(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), bytes = content.len(), "read SBOM file");
                Some(RawSbom::new(identifier, content))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read SBOM file");
                None
            }
        }
    }
}

impl Default for SbomDirectoryReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomReader for SbomDirectoryReader {
    fn read_sboms(&self, root: &Path, suffix: &str) -> Result<SbomScan> {
        if !root.exists() {
            return Ok(SbomScan::MissingRoot);
        }
        if !root.is_dir() {
            return Err(SbomError::FileReadError {
                path: root.to_path_buf(),
                details: "Not a directory".to_string(),
            }
            .into());
        }

        let mut paths = Vec::new();
        self.collect_paths(root, suffix, &mut paths)?;
        paths.sort();

        let documents: Vec<RawSbom> = paths.iter().filter_map(|p| self.read_one(p)).collect();
        tracing::debug!(
            root = %root.display(),
            found = paths.len(),
            read = documents.len(),
            "scanned SBOM directory"
        );
        Ok(SbomScan::Found(documents))
    }
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(suffix))
        .unwrap_or(false)
}
