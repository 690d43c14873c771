use std::collections::HashMap;
use std::path::{Path, PathBuf};
use sbom_changelog::prelude::*;

/// Mock SbomReader for testing, keyed by directory
pub struct MockSbomReader {
    pub directories: HashMap<PathBuf, Vec<RawSbom>>,
    pub should_fail: bool,
}

impl MockSbomReader {
    pub fn new() -> Self {
        Self {
            directories: HashMap::new(),
            should_fail: false,
        }
    }

    pub fn with_directory(mut self, root: &str, sboms: Vec<RawSbom>) -> Self {
        self.directories.insert(PathBuf::from(root), sboms);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            directories: HashMap::new(),
            should_fail: true,
        }
    }
}

impl Default for MockSbomReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomReader for MockSbomReader {
    fn read_sboms(&self, root: &Path, _suffix: &str) -> Result<SbomScan> {
        if self.should_fail {
            anyhow::bail!("Mock SBOM directory read failure");
        }
        Ok(match self.directories.get(root) {
            Some(sboms) => SbomScan::Found(sboms.clone()),
            None => SbomScan::MissingRoot,
        })
    }
}
