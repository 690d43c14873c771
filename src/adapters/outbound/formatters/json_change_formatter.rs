use crate::ports::outbound::ChangeReportFormatter;
use crate::sbom_diff::domain::ChangeReport;
use crate::shared::Result;
use anyhow::Context;

/// JsonChangeFormatter adapter for the machine-readable change record
///
/// Emits an object keyed by variant name in report order. Package lists are
/// arrays of arrays (`[name, version, license]`, `[name, version]`,
/// `[name, old_version, new_version]`) so downstream automation can consume
/// the record without knowing field names.
pub struct JsonChangeFormatter;

impl JsonChangeFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Reconstructs a report from a record written by `format`
    pub fn decode(&self, content: &str) -> Result<ChangeReport> {
        serde_json::from_str(content).context("Failed to decode change record")
    }
}

impl Default for JsonChangeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeReportFormatter for JsonChangeFormatter {
    fn format(&self, report: &ChangeReport) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize change record")
    }
}
