use super::DiffSettings;
use std::path::PathBuf;

/// Where the previous (baseline) SBOMs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousSource {
    /// SBOM files below a local directory
    Directory(PathBuf),
    /// Assets of the latest published release
    LatestRelease,
}

/// ChangelogRequest - request DTO for the changelog use case
#[derive(Debug, Clone)]
pub struct ChangelogRequest {
    /// Directory holding the SBOMs of the current build
    pub current_root: PathBuf,
    pub previous: PreviousSource,
    pub settings: DiffSettings,
}

impl ChangelogRequest {
    pub fn new(current_root: PathBuf, previous: PreviousSource, settings: DiffSettings) -> Self {
        Self {
            current_root,
            previous,
            settings,
        }
    }
}

/// DetectRequest - request DTO for lightweight change detection
///
/// Both sides are read from directories and every SBOM entry counts,
/// regardless of its package-manager references.
#[derive(Debug, Clone)]
pub struct DetectRequest {
    pub current_root: PathBuf,
    pub previous_root: PathBuf,
    pub settings: DiffSettings,
}

impl DetectRequest {
    pub fn new(current_root: PathBuf, previous_root: PathBuf, settings: DiffSettings) -> Self {
        Self {
            current_root,
            previous_root,
            settings,
        }
    }
}
