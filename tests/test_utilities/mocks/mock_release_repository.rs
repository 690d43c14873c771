use sbom_changelog::prelude::*;

/// Mock ReleaseRepository for testing
pub struct MockReleaseRepository {
    pub release: Option<PublishedRelease>,
    pub should_fail: bool,
}

impl MockReleaseRepository {
    /// A repository without any published release
    pub fn without_release() -> Self {
        Self {
            release: None,
            should_fail: false,
        }
    }

    pub fn with_release(tag_name: &str, sboms: Vec<RawSbom>) -> Self {
        Self {
            release: Some(PublishedRelease {
                tag_name: tag_name.to_string(),
                published_at: None,
                sboms,
                failed_assets: Vec::new(),
            }),
            should_fail: false,
        }
    }

    pub fn with_failed_asset(mut self, asset: &str) -> Self {
        if let Some(release) = self.release.as_mut() {
            release.failed_assets.push(asset.to_string());
        }
        self
    }

    pub fn with_failure() -> Self {
        Self {
            release: None,
            should_fail: true,
        }
    }
}

#[async_trait::async_trait]
impl ReleaseRepository for MockReleaseRepository {
    async fn fetch_latest_release(&self) -> Result<Option<PublishedRelease>> {
        if self.should_fail {
            anyhow::bail!("Mock release lookup failure");
        }
        Ok(self.release.clone())
    }
}
