use crate::sbom_diff::domain::ChangeReport;

/// ChangelogResponse - response DTO from the changelog use case
///
/// Adapters format the report into the markdown changelog and the
/// machine-readable change record.
#[derive(Debug, Clone)]
pub struct ChangelogResponse {
    pub report: ChangeReport,
    /// Tag of the release the comparison was made against, if any
    pub previous_release: Option<String>,
}

impl ChangelogResponse {
    pub fn new(report: ChangeReport, previous_release: Option<String>) -> Self {
        Self {
            report,
            previous_release,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.report.has_changes()
    }
}

/// DetectResponse - response DTO from lightweight change detection
#[derive(Debug, Clone)]
pub struct DetectResponse {
    pub report: ChangeReport,
    pub changed: bool,
}

impl DetectResponse {
    pub fn new(report: ChangeReport) -> Self {
        let changed = report.has_changes();
        Self { report, changed }
    }
}
