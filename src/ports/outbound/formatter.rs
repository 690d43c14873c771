use crate::sbom_diff::domain::ChangeReport;
use crate::shared::Result;

/// ChangeReportFormatter port for rendering a change report
///
/// This port abstracts the output format (markdown changelog, JSON record).
pub trait ChangeReportFormatter {
    /// Formats the change report
    ///
    /// # Arguments
    /// * `report` - One diff per configured variant, in declared order
    ///
    /// # Returns
    /// Formatted content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &ChangeReport) -> Result<String>;
}
