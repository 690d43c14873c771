use super::document_normalizer::CandidatePackage;
use crate::shared::Result;

/// Maximum length of a locator prefix
const MAX_PREFIX_LENGTH: usize = 255;

/// PackageFilter - decides which normalized candidates are tracked for diffing
///
/// `Tracked` keeps only candidates installed from the distribution's package
/// repository, identified by a package-manager locator starting with the
/// configured prefix (e.g. `pkg:apk/wolfi/`). `All` keeps every candidate and
/// is used for lightweight change detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageFilter {
    Tracked { locator_prefix: String },
    All,
}

impl PackageFilter {
    /// Creates a registry-aware filter
    ///
    /// # Errors
    /// - Empty prefix
    /// - Prefix longer than 255 bytes
    /// - Prefix that is not a purl (`pkg:`)
    pub fn tracked(locator_prefix: impl Into<String>) -> Result<Self> {
        let locator_prefix = locator_prefix.into();
        validate_prefix(&locator_prefix)?;
        Ok(PackageFilter::Tracked { locator_prefix })
    }

    pub fn all() -> Self {
        PackageFilter::All
    }

    /// Returns true if the candidate should be retained
    pub fn retains(&self, candidate: &CandidatePackage) -> bool {
        match self {
            PackageFilter::All => true,
            PackageFilter::Tracked { locator_prefix } => candidate
                .locators
                .iter()
                .any(|locator| locator.starts_with(locator_prefix.as_str())),
        }
    }

    /// Filters candidates, preserving their order
    pub fn filter_candidates(&self, candidates: Vec<CandidatePackage>) -> Vec<CandidatePackage> {
        candidates.into_iter().filter(|c| self.retains(c)).collect()
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.trim().is_empty() {
        anyhow::bail!("Locator prefix cannot be empty");
    }

    if prefix.len() > MAX_PREFIX_LENGTH {
        anyhow::bail!(
            "Locator prefix is too long ({} bytes). Maximum allowed: {} bytes",
            prefix.len(),
            MAX_PREFIX_LENGTH
        );
    }

    if !prefix.starts_with("pkg:") {
        anyhow::bail!(
            "Locator prefix '{}' is not a package URL. Expected something like 'pkg:apk/wolfi/'",
            prefix
        );
    }

    Ok(())
}
