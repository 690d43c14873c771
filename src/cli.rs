use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Compare SBOM snapshots between releases and generate package changelogs
#[derive(Parser, Debug)]
#[command(name = "sbom-changelog")]
#[command(version)]
#[command(about = "Compare SBOM snapshots between releases and generate package changelogs", long_about = None)]
pub struct Args {
    /// Emit debug diagnostics on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare the current SBOMs against the previous release and write a changelog
    Changelog(ChangelogArgs),
    /// Report whether any package version changed between two SBOM directories
    Detect(DetectArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ChangelogArgs {
    /// Directory holding the SBOMs of the current build
    #[arg(long, default_value = "sbom-output")]
    pub current_dir: PathBuf,

    /// Directory holding the previous SBOMs (defaults to the latest GitHub release)
    #[arg(long)]
    pub previous_dir: Option<PathBuf>,

    /// Repository as owner/name, used to look up the latest release
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Token used to authenticate against the GitHub API
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise Server)
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Path of the markdown changelog
    #[arg(long, default_value = "sbom-changelog.md")]
    pub changelog_output: PathBuf,

    /// Path of the machine-readable change record
    #[arg(long, default_value = "sbom-changes.json")]
    pub changes_output: PathBuf,

    /// File to append the change signal to (GitHub Actions step output)
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// Path to config file (defaults to ./sbom-changelog.config.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only treat a variant as new when no previous SBOM exists for it
    #[arg(long)]
    pub strict_absence: bool,

    /// Package-manager locator prefix of tracked packages (e.g. pkg:apk/wolfi/)
    #[arg(long, value_name = "PREFIX")]
    pub locator_prefix: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct DetectArgs {
    /// Directory holding the SBOMs of the current build
    #[arg(long, default_value = "sbom-output")]
    pub current_dir: PathBuf,

    /// Directory holding the previous SBOMs
    #[arg(long, default_value = "previous-sbom")]
    pub previous_dir: PathBuf,

    /// File to append the change signal to (GitHub Actions step output)
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// Path to config file (defaults to ./sbom-changelog.config.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
