use crate::application::dto::{ChangelogRequest, ChangelogResponse, PreviousSource};
use crate::ports::outbound::{ProgressReporter, ReleaseRepository, SbomReader, SbomScan};
use crate::sbom_diff::domain::{RawSbom, VariantCatalog};
use crate::sbom_diff::services::{Aggregation, Differ, PackageFilter, VariantAggregator};
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::path::Path;

/// GenerateChangelogUseCase - Core use case for SBOM changelog generation
///
/// This use case orchestrates the comparison workflow using
/// generic dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `SR` - SbomReader implementation
/// * `RR` - ReleaseRepository implementation (only needed for `PreviousSource::LatestRelease`)
/// * `PR` - ProgressReporter implementation
pub struct GenerateChangelogUseCase<SR, RR, PR> {
    sbom_reader: SR,
    release_repository: Option<RR>,
    progress_reporter: PR,
}

impl<SR, RR, PR> GenerateChangelogUseCase<SR, RR, PR>
where
    SR: SbomReader,
    RR: ReleaseRepository,
    PR: ProgressReporter,
{
    /// Creates a new GenerateChangelogUseCase with injected dependencies
    pub fn new(sbom_reader: SR, release_repository: Option<RR>, progress_reporter: PR) -> Self {
        Self {
            sbom_reader,
            release_repository,
            progress_reporter,
        }
    }

    /// Executes the changelog use case
    ///
    /// # Returns
    /// ChangelogResponse containing one diff per configured variant
    ///
    /// # Errors
    /// - The primary variant has no current packages
    /// - The previous source is the latest release but no release repository was injected
    /// - The release lookup fails
    pub async fn execute(&self, request: ChangelogRequest) -> Result<ChangelogResponse> {
        let settings = &request.settings;
        let filter = PackageFilter::tracked(settings.locator_prefix.as_str())?;
        let aggregator = VariantAggregator::new(&settings.catalog, &filter);

        // Step 1: Collect current SBOMs
        let current = self.load_current(&request, &aggregator)?;

        // Step 2: A changelog without current packages for the primary variant is meaningless
        Self::ensure_primary_packages(&settings.catalog, &current, &request.current_root)?;

        // Step 3: Collect the baseline
        let (previous, previous_release) = self.load_previous(&request, &aggregator).await?;

        // Step 4: Diff every variant
        let report = Differ::diff_all(
            &settings.catalog,
            &previous,
            &current,
            settings.absence_policy,
        );

        self.progress_reporter.report_completion(&format!(
            "✅ SBOM comparison complete: {}",
            if report.has_changes() {
                "changes detected"
            } else {
                "no package changes"
            }
        ));

        Ok(ChangelogResponse::new(report, previous_release))
    }

    /// Reads and aggregates the current build's SBOMs
    fn load_current(
        &self,
        request: &ChangelogRequest,
        aggregator: &VariantAggregator<'_>,
    ) -> Result<Aggregation> {
        self.progress_reporter.report(&format!(
            "📖 Loading current SBOMs from: {}",
            request.current_root.display()
        ));

        let documents = self.read_directory(&request.current_root, &request.settings.file_suffix)?;
        let aggregation = self.aggregate(aggregator, &documents);

        self.progress_reporter.report(&format!(
            "✅ Detected {} tracked package(s) in {} SBOM(s)",
            aggregation.package_count(),
            documents.len()
        ));
        Ok(aggregation)
    }

    /// Reads and aggregates the baseline SBOMs
    ///
    /// # Returns
    /// Tuple of (aggregation, tag of the release used as baseline)
    async fn load_previous(
        &self,
        request: &ChangelogRequest,
        aggregator: &VariantAggregator<'_>,
    ) -> Result<(Aggregation, Option<String>)> {
        match &request.previous {
            PreviousSource::Directory(root) => {
                self.progress_reporter.report(&format!(
                    "📖 Loading previous SBOMs from: {}",
                    root.display()
                ));
                let documents = self.read_directory(root, &request.settings.file_suffix)?;
                Ok((self.aggregate(aggregator, &documents), None))
            }
            PreviousSource::LatestRelease => {
                let Some(repository) = &self.release_repository else {
                    return Err(SbomError::MissingConfiguration {
                        name: "release repository".to_string(),
                        suggestion: "Pass --previous-dir or configure the repository and token"
                            .to_string(),
                    }
                    .into());
                };

                self.progress_reporter
                    .report("🔍 Looking up the latest published release...");

                match repository.fetch_latest_release().await? {
                    None => {
                        self.progress_reporter
                            .report("ℹ️  No previous release found. Treating this as the initial release.");
                        Ok((Aggregation::absent(&request.settings.catalog), None))
                    }
                    Some(release) => {
                        let published = release
                            .published_at
                            .map(|at| format!(" (published {})", at.format("%Y-%m-%d")))
                            .unwrap_or_default();
                        self.progress_reporter.report(&format!(
                            "✅ Found previous release: {}{} with {} SBOM asset(s)",
                            release.tag_name,
                            published,
                            release.sboms.len()
                        ));
                        for asset in &release.failed_assets {
                            self.progress_reporter.report_warning(&format!(
                                "⚠️  Warning: Could not download asset {}",
                                asset
                            ));
                        }
                        Ok((self.aggregate(aggregator, &release.sboms), Some(release.tag_name)))
                    }
                }
            }
        }
    }

    /// Lists SBOM files, treating a missing directory as empty
    fn read_directory(&self, root: &Path, suffix: &str) -> Result<Vec<RawSbom>> {
        match self.sbom_reader.read_sboms(root, suffix)? {
            SbomScan::Found(documents) => Ok(documents),
            SbomScan::MissingRoot => {
                self.progress_reporter.report_warning(&format!(
                    "⚠️  Warning: Directory not found: {}",
                    root.display()
                ));
                Ok(Vec::new())
            }
        }
    }

    /// Aggregates documents, reporting progress per source and the sources that were skipped
    fn aggregate(&self, aggregator: &VariantAggregator<'_>, documents: &[RawSbom]) -> Aggregation {
        let aggregation =
            aggregator.aggregate_with_progress(documents, |current, total, identifier| {
                self.progress_reporter
                    .report_progress(current, total, Some(identifier))
            });

        for skipped in &aggregation.skipped {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Warning: Could not decode JSON from {}: {}",
                skipped.identifier, skipped.reason
            ));
        }
        for identifier in &aggregation.unclassified {
            self.progress_reporter.report(&format!(
                "   - Ignoring {} (no matching variant prefix)",
                identifier
            ));
        }

        aggregation
    }

    fn ensure_primary_packages(
        catalog: &VariantCatalog,
        current: &Aggregation,
        current_root: &Path,
    ) -> Result<()> {
        let primary = catalog.primary();
        let has_packages = current
            .snapshot(primary.name())
            .map(|s| !s.packages.is_empty())
            .unwrap_or(false);

        if !has_packages {
            return Err(SbomError::NoCurrentPackages {
                variant: primary.name().to_string(),
                path: current_root.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }
}
