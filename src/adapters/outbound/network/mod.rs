/// Network adapters for external API calls
mod github_release_client;

pub use github_release_client::{GitHubReleaseClient, DEFAULT_ASSET_MARKER};
