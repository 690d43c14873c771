mod cli;

use cli::{Args, ChangelogArgs, Command, DetectArgs};
use sbom_changelog::adapters::outbound::console::StderrProgressReporter;
use sbom_changelog::adapters::outbound::filesystem::{
    FileSystemWriter, GitHubOutputWriter, SbomDirectoryReader, StdoutPresenter,
    DEFAULT_OUTPUT_KEY,
};
use sbom_changelog::adapters::outbound::formatters::{
    JsonChangeFormatter, MarkdownChangelogFormatter,
};
use sbom_changelog::adapters::outbound::network::{GitHubReleaseClient, DEFAULT_ASSET_MARKER};
use sbom_changelog::application::dto::{
    ChangelogRequest, DetectRequest, DiffSettings, PreviousSource,
};
use sbom_changelog::application::use_cases::{DetectChangesUseCase, GenerateChangelogUseCase};
use sbom_changelog::config::{discover_config, load_config_from_path, ConfigFile};
use sbom_changelog::ports::outbound::{ChangeReportFormatter, ChangeSignalWriter, OutputPresenter};
use sbom_changelog::sbom_diff::services::AbsencePolicy;
use sbom_changelog::shared::error::{ExitCode, SbomError};
use sbom_changelog::shared::Result;
use std::path::{Path, PathBuf};
use std::process;

const PREVIEW_RULE_WIDTH: usize = 50;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Changelog(changelog) => run_changelog(changelog).await,
        Command::Detect(detect) => run_detect(detect),
    }
}

async fn run_changelog(args: ChangelogArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let settings = build_settings(&config, args.locator_prefix.clone(), args.strict_absence)?;

    // Resolve the baseline before touching any output
    let (previous, release_repository) = match &args.previous_dir {
        Some(dir) => (PreviousSource::Directory(dir.clone()), None),
        None => {
            let repository = require_setting(
                args.repository.as_deref(),
                "GITHUB_REPOSITORY",
                "Pass --repository owner/name, set GITHUB_REPOSITORY, or compare against --previous-dir",
            )?;
            let token = require_setting(
                args.token.as_deref(),
                "GH_TOKEN",
                "Pass --token or set GH_TOKEN to a token that can read releases",
            )?;
            let marker = config
                .asset_marker
                .clone()
                .unwrap_or_else(|| DEFAULT_ASSET_MARKER.to_string());
            let mut client = GitHubReleaseClient::new(repository, Some(token.to_string()))?
                .with_asset_filter(marker, settings.file_suffix.clone());
            if let Some(api_url) = args.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
                client = client.with_api_base(api_url);
            }
            (PreviousSource::LatestRelease, Some(client))
        }
    };

    let catalog = settings.catalog.clone();
    let use_case = GenerateChangelogUseCase::new(
        SbomDirectoryReader::new(),
        release_repository,
        StderrProgressReporter::new(),
    );
    let request = ChangelogRequest::new(args.current_dir.clone(), previous, settings);
    let response = use_case.execute(request).await?;

    let changelog = MarkdownChangelogFormatter::new(catalog).format(&response.report)?;
    let changes = JsonChangeFormatter::new().format(&response.report)?;

    FileSystemWriter::new(args.changelog_output.clone()).present(&changelog)?;
    FileSystemWriter::new(args.changes_output.clone()).present(&changes)?;
    eprintln!("✅ Changelog written to: {}", args.changelog_output.display());
    eprintln!("✅ Change record written to: {}", args.changes_output.display());
    if let Some(tag) = &response.previous_release {
        eprintln!("📌 Compared against release: {}", tag);
    }

    if let Some(path) = non_empty_path(args.github_output) {
        signal_writer(path, &config).write_signal(response.has_changes())?;
    }

    let rule = "=".repeat(PREVIEW_RULE_WIDTH);
    eprintln!("\nChangelog Preview:\n{}", rule);
    eprint!("{}", changelog);
    eprintln!("{}", rule);

    Ok(())
}

fn run_detect(args: DetectArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let settings = build_settings(&config, None, false)?;

    let use_case = DetectChangesUseCase::new(SbomDirectoryReader::new(), StderrProgressReporter::new());
    let request = DetectRequest::new(args.current_dir, args.previous_dir, settings);
    let response = use_case.execute(request)?;

    match non_empty_path(args.github_output) {
        Some(path) => signal_writer(path, &config).write_signal(response.changed)?,
        None => StdoutPresenter::new().present(&format!(
            "{}={}\n",
            output_key(&config),
            response.changed
        ))?,
    }

    Ok(())
}

/// Loads the explicit config file, or the one in the working directory if present
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => Ok(discover_config(Path::new("."))?.unwrap_or_default()),
    }
}

/// Merges config file values and CLI overrides into comparison settings
fn build_settings(
    config: &ConfigFile,
    locator_prefix: Option<String>,
    strict_absence: bool,
) -> Result<DiffSettings> {
    let mut settings = DiffSettings::default();

    if let Some(catalog) = config.catalog()? {
        settings.catalog = catalog;
    }
    if let Some(prefix) = locator_prefix.or_else(|| config.locator_prefix.clone()) {
        settings.locator_prefix = prefix;
    }
    if let Some(suffix) = &config.file_suffix {
        settings.file_suffix = suffix.clone();
    }
    settings.absence_policy =
        AbsencePolicy::from_strict_flag(strict_absence || config.strict_absence.unwrap_or(false));

    Ok(settings)
}

fn require_setting<'a>(value: Option<&'a str>, name: &str, suggestion: &str) -> Result<&'a str> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => Err(SbomError::MissingConfiguration {
            name: name.to_string(),
            suggestion: suggestion.to_string(),
        }
        .into()),
    }
}

fn non_empty_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

fn output_key(config: &ConfigFile) -> &str {
    config.output_key.as_deref().unwrap_or(DEFAULT_OUTPUT_KEY)
}

fn signal_writer(path: PathBuf, config: &ConfigFile) -> GitHubOutputWriter {
    GitHubOutputWriter::new(path).with_key(output_key(config))
}
