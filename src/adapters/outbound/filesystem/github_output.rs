use crate::ports::outbound::ChangeSignalWriter;
use crate::shared::error::SbomError;
use crate::shared::security::check_output_path;
use crate::shared::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Default output key for the change signal
pub const DEFAULT_OUTPUT_KEY: &str = "sbom-changes";

/// GitHubOutputWriter adapter for publishing the change signal to a CI step
///
/// Appends one `key=true|false` line to the file GitHub Actions exposes
/// through `GITHUB_OUTPUT`. Existing lines are preserved.
pub struct GitHubOutputWriter {
    path: PathBuf,
    key: String,
}

impl GitHubOutputWriter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            key: DEFAULT_OUTPUT_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

impl ChangeSignalWriter for GitHubOutputWriter {
    fn write_signal(&self, changed: bool) -> Result<()> {
        check_output_path(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SbomError::FileWriteError {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        writeln!(file, "{}={}", self.key, changed).map_err(|e| SbomError::FileWriteError {
            path: self.path.clone(),
            details: e.to_string(),
        })?;

        tracing::debug!(path = %self.path.display(), key = %self.key, changed, "wrote change signal");
        Ok(())
    }
}
