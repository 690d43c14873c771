use crate::sbom_diff::domain::RawSbom;
use crate::shared::Result;
use std::path::Path;

/// Outcome of scanning a directory for SBOM files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SbomScan {
    /// The root exists; holds every matching file (possibly none)
    Found(Vec<RawSbom>),
    /// The root does not exist
    MissingRoot,
}

impl SbomScan {
    /// Returns the documents, treating a missing root as zero documents
    pub fn into_documents(self) -> Vec<RawSbom> {
        match self {
            SbomScan::Found(documents) => documents,
            SbomScan::MissingRoot => Vec::new(),
        }
    }
}

/// SbomReader port for collecting SBOM files below a directory
///
/// This port abstracts the file system walk that locates SBOMs produced
/// by the build (or downloaded from a previous build).
pub trait SbomReader {
    /// Reads every file below `root` whose name ends with `suffix`
    ///
    /// # Arguments
    /// * `root` - Directory to walk recursively
    /// * `suffix` - File name suffix to match (e.g. `.json`)
    ///
    /// # Returns
    /// `SbomScan::MissingRoot` if `root` does not exist, otherwise the matching
    /// files with their bare file names as identifiers, in path order.
    ///
    /// # Errors
    /// Returns an error if the root exists but cannot be listed.
    /// Individual unreadable files are skipped, not reported as errors.
    fn read_sboms(&self, root: &Path, suffix: &str) -> Result<SbomScan>;
}
