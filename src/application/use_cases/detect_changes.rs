use crate::application::dto::{DetectRequest, DetectResponse};
use crate::ports::outbound::{ProgressReporter, SbomReader, SbomScan};
use crate::sbom_diff::services::{Aggregation, Differ, PackageFilter, VariantAggregator};
use crate::shared::Result;
use std::path::Path;

/// DetectChangesUseCase - decides whether a build changed any package versions
///
/// Unlike the changelog, detection looks at every SBOM entry regardless of
/// its package-manager references, so it also catches changes to software
/// that was not installed from the distribution repository.
pub struct DetectChangesUseCase<SR, PR> {
    sbom_reader: SR,
    progress_reporter: PR,
}

impl<SR, PR> DetectChangesUseCase<SR, PR>
where
    SR: SbomReader,
    PR: ProgressReporter,
{
    pub fn new(sbom_reader: SR, progress_reporter: PR) -> Self {
        Self {
            sbom_reader,
            progress_reporter,
        }
    }

    /// Compares the two directories
    ///
    /// A missing previous directory means every variant is a first release,
    /// which counts as a change whenever the current side has packages.
    pub fn execute(&self, request: DetectRequest) -> Result<DetectResponse> {
        let settings = &request.settings;
        let filter = PackageFilter::all();
        let aggregator = VariantAggregator::new(&settings.catalog, &filter);

        let current = self.load(&aggregator, &request.current_root, &settings.file_suffix)?;
        let previous = self.load(&aggregator, &request.previous_root, &settings.file_suffix)?;

        let report = Differ::diff_all(
            &settings.catalog,
            &previous,
            &current,
            settings.absence_policy,
        );

        for (name, diff) in report.iter() {
            if diff.has_changes() {
                self.progress_reporter.report(&format!(
                    "   - {}: {} added, {} removed, {} updated",
                    settings.catalog.title_for(name),
                    diff.added.len(),
                    diff.removed.len(),
                    diff.updated.len()
                ));
            }
        }

        let response = DetectResponse::new(report);
        self.progress_reporter.report_completion(if response.changed {
            "✅ Package changes detected"
        } else {
            "✅ No package changes detected"
        });
        Ok(response)
    }

    fn load(
        &self,
        aggregator: &VariantAggregator<'_>,
        root: &Path,
        suffix: &str,
    ) -> Result<Aggregation> {
        let documents = match self.sbom_reader.read_sboms(root, suffix)? {
            SbomScan::Found(documents) => documents,
            SbomScan::MissingRoot => {
                self.progress_reporter.report_warning(&format!(
                    "⚠️  Warning: Directory not found: {}",
                    root.display()
                ));
                Vec::new()
            }
        };

        let aggregation =
            aggregator.aggregate_with_progress(&documents, |current, total, identifier| {
                self.progress_reporter
                    .report_progress(current, total, Some(identifier))
            });
        for skipped in &aggregation.skipped {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Warning: Could not decode JSON from {}: {}",
                skipped.identifier, skipped.reason
            ));
        }
        Ok(aggregation)
    }
}
