use crate::sbom_diff::domain::RawSbom;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The most recent published release and the SBOM assets attached to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRelease {
    pub tag_name: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Downloaded SBOM assets, identified by asset name
    pub sboms: Vec<RawSbom>,
    /// Asset names that matched but could not be downloaded
    pub failed_assets: Vec<String>,
}

/// ReleaseRepository port for fetching the previous release's SBOMs
///
/// This port abstracts the release-hosting API (e.g. GitHub releases).
#[async_trait]
pub trait ReleaseRepository: Send + Sync {
    /// Fetches the latest published release and its SBOM assets
    ///
    /// # Returns
    /// `Ok(None)` when the repository has no published release yet.
    ///
    /// # Errors
    /// Returns an error if the release lookup itself fails (network error,
    /// authentication failure, unexpected status). Failures downloading
    /// individual assets are reported in `failed_assets` instead.
    async fn fetch_latest_release(&self) -> Result<Option<PublishedRelease>>;
}
