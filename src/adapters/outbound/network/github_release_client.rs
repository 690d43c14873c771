use crate::ports::outbound::{PublishedRelease, ReleaseRepository};
use crate::sbom_diff::domain::RawSbom;
use crate::shared::error::SbomError;
use crate::shared::security::MAX_SBOM_SIZE;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default asset name marker; matching is case-insensitive
pub const DEFAULT_ASSET_MARKER: &str = "sbom";

/// Maximum number of asset downloads in flight
const MAX_CONCURRENT_DOWNLOADS: usize = 4;

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReleaseAsset {
    name: String,
    browser_download_url: String,
}

/// GitHubReleaseClient adapter for fetching SBOM assets of the latest release
///
/// This adapter implements the ReleaseRepository port using the GitHub REST API.
/// A repository without any published release yields `None`; failures while
/// downloading individual assets are collected instead of aborting the lookup.
pub struct GitHubReleaseClient {
    client: reqwest::Client,
    api_base: String,
    owner: String,
    name: String,
    token: Option<String>,
    asset_marker: String,
    file_suffix: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl GitHubReleaseClient {
    /// Creates a client for an `owner/name` repository slug
    ///
    /// # Errors
    /// - The slug is not of the form `owner/name`
    /// - The HTTP client cannot be built
    pub fn new(repository: &str, token: Option<String>) -> Result<Self> {
        let (owner, name) = Self::validate_repository(repository)?;

        let user_agent = format!("sbom-changelog/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            owner,
            name,
            token: token.filter(|t| !t.trim().is_empty()),
            asset_marker: DEFAULT_ASSET_MARKER.to_string(),
            file_suffix: ".json".to_string(),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Sets which release assets are treated as SBOMs
    pub fn with_asset_filter(
        mut self,
        asset_marker: impl Into<String>,
        file_suffix: impl Into<String>,
    ) -> Self {
        self.asset_marker = asset_marker.into().to_lowercase();
        self.file_suffix = file_suffix.into();
        self
    }

    /// Points the client at a different API host (e.g. GitHub Enterprise)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Validates an `owner/name` slug and splits it
    fn validate_repository(repository: &str) -> Result<(String, String)> {
        let invalid = |reason: &str| SbomError::Validation {
            message: format!(
                "Invalid repository '{}': {}. Expected 'owner/name'",
                repository, reason
            ),
        };

        let (owner, name) = repository
            .split_once('/')
            .ok_or_else(|| invalid("missing '/'"))?;

        for part in [owner, name] {
            if part.is_empty() {
                return Err(invalid("empty owner or name").into());
            }
            if part == "." || part == ".." {
                return Err(invalid("relative path segment").into());
            }
            if !part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            {
                return Err(invalid("unsupported characters").into());
            }
        }

        Ok((owner.to_string(), name.to_string()))
    }

    fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base,
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.name)
        )
    }

    fn is_sbom_asset(&self, asset_name: &str) -> bool {
        asset_name.to_lowercase().contains(&self.asset_marker)
            && asset_name.ends_with(&self.file_suffix)
    }

    fn request(&self, url: &str, accept: &'static str) -> reqwest::RequestBuilder {
        let builder = self.client.get(url).header(ACCEPT, accept);
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("token {}", token)),
            None => builder,
        }
    }

    /// Sends a GET request, retrying network errors and server errors
    async fn get_with_retry(&self, url: &str, accept: &'static str) -> Result<reqwest::Response> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.request(url, accept).send().await {
                Ok(response) if response.status().is_server_error() => {
                    last_error = Some(anyhow::anyhow!(
                        "server returned status {}",
                        response.status()
                    ));
                }
                Ok(response) => return Ok(response),
                Err(e) => last_error = Some(e.into()),
            }

            if attempt < self.max_retries {
                tracing::debug!(url, attempt, "request failed, retrying");
                tokio::time::sleep(self.retry_delay * attempt).await;
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no request attempted for {}", url)))
    }

    async fn fetch_release(&self) -> Result<Option<Release>> {
        let url = self.latest_release_url();
        let lookup_failed = |details: String| SbomError::ReleaseLookupFailed {
            url: url.clone(),
            details,
        };

        let response = self
            .get_with_retry(&url, "application/vnd.github+json")
            .await
            .map_err(|e| lookup_failed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(url = %url, "no published release");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(lookup_failed(format!("GitHub API returned status code {}", status)).into());
        }

        let release: Release = response
            .json()
            .await
            .map_err(|e| lookup_failed(format!("Invalid release payload: {}", e)))?;
        Ok(Some(release))
    }

    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<Vec<u8>> {
        let response = self
            .get_with_retry(&asset.browser_download_url, "application/octet-stream")
            .await?
            .error_for_status()?;

        if let Some(length) = response.content_length() {
            if length > MAX_SBOM_SIZE {
                anyhow::bail!(
                    "asset is too large ({} bytes). Maximum allowed size is {} bytes",
                    length,
                    MAX_SBOM_SIZE
                );
            }
        }

        let bytes = response.bytes().await?;
        if bytes.len() as u64 > MAX_SBOM_SIZE {
            anyhow::bail!("asset exceeds {} bytes", MAX_SBOM_SIZE);
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ReleaseRepository for GitHubReleaseClient {
    async fn fetch_latest_release(&self) -> Result<Option<PublishedRelease>> {
        let Some(release) = self.fetch_release().await? else {
            return Ok(None);
        };

        let selected: Vec<ReleaseAsset> = release
            .assets
            .iter()
            .filter(|asset| self.is_sbom_asset(&asset.name))
            .cloned()
            .collect();
        tracing::debug!(
            tag = %release.tag_name,
            assets = release.assets.len(),
            selected = selected.len(),
            "selected SBOM assets"
        );

        let results: Vec<(String, Result<Vec<u8>>)> = stream::iter(selected)
            .map(|asset| async move {
                let result = self.download_asset(&asset).await;
                (asset.name, result)
            })
            .buffer_unordered(MAX_CONCURRENT_DOWNLOADS)
            .collect()
            .await;

        let mut sboms = Vec::new();
        let mut failed_assets = Vec::new();
        for (name, result) in results {
            match result {
                Ok(content) => sboms.push(RawSbom::new(name, content)),
                Err(e) => {
                    tracing::warn!(asset = %name, error = %e, "failed to download release asset");
                    failed_assets.push(name);
                }
            }
        }
        sboms.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        failed_assets.sort();

        Ok(Some(PublishedRelease {
            tag_name: release.tag_name,
            published_at: release.published_at,
            sboms,
            failed_assets,
        }))
    }
}
