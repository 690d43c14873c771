use crate::ports::outbound::ChangeReportFormatter;
use crate::sbom_diff::domain::{ChangeReport, VariantCatalog, VariantDiff};
use crate::shared::Result;

/// MarkdownChangelogFormatter adapter for rendering release-note changelogs
///
/// This adapter implements the ChangeReportFormatter port. Variant headings
/// use the titles of the configured catalog, falling back to the variant
/// name for variants the catalog does not know.
///
/// Output is a sequence of blocks separated by blank lines and ends with a
/// single newline. The same report always renders to the same bytes.
pub struct MarkdownChangelogFormatter {
    catalog: VariantCatalog,
}

impl MarkdownChangelogFormatter {
    pub fn new(catalog: VariantCatalog) -> Self {
        Self { catalog }
    }
}

impl Default for MarkdownChangelogFormatter {
    fn default() -> Self {
        Self::new(VariantCatalog::standard())
    }
}

/// Helper methods for rendering sections
impl MarkdownChangelogFormatter {
    fn title<'a>(&'a self, variant: &'a str) -> &'a str {
        self.catalog.title_for(variant)
    }

    fn render_initial_release(&self, report: &ChangeReport) -> Vec<String> {
        let mut lines = vec!["### 🎉 Initial Release".to_string(), String::new()];
        for (variant, diff) in report.iter() {
            lines.push(format!(
                "- **{}**: {} packages",
                self.title(variant),
                diff.total_packages
            ));
        }
        vec![lines.join("\n")]
    }

    fn render_variant(&self, variant: &str, diff: &VariantDiff) -> String {
        let mut blocks = vec![format!("#### {}", self.title(variant))];

        if !diff.has_changes() {
            blocks.push("No changes".to_string());
            return blocks.join("\n\n");
        }

        if !diff.updated.is_empty() {
            let mut lines = vec![format!("**🔄 Updated ({} packages)**", diff.updated.len())];
            lines.extend(diff.updated.iter().map(|p| {
                format!("- `{}`: {} → {}", p.name, p.old_version, p.new_version)
            }));
            blocks.push(lines.join("\n"));
        }

        if !diff.added.is_empty() {
            let mut lines = vec![format!("**➕ Added ({} packages)**", diff.added.len())];
            lines.extend(
                diff.added
                    .iter()
                    .map(|p| format!("- `{}` v{} (License: {})", p.name, p.version, p.license)),
            );
            blocks.push(lines.join("\n"));
        }

        if !diff.removed.is_empty() {
            let mut lines = vec![format!("**➖ Removed ({} packages)**", diff.removed.len())];
            lines.extend(
                diff.removed
                    .iter()
                    .map(|p| format!("- `{}` v{}", p.name, p.version)),
            );
            blocks.push(lines.join("\n"));
        }

        blocks.join("\n\n")
    }

    fn render_summary(&self, report: &ChangeReport) -> String {
        let mut lines = vec!["### 📊 Summary".to_string(), String::new()];
        for (variant, diff) in report.iter() {
            lines.push(format!(
                "- **{}**: {} total packages",
                self.title(variant),
                diff.total_packages
            ));
        }
        lines.join("\n")
    }
}

impl ChangeReportFormatter for MarkdownChangelogFormatter {
    fn format(&self, report: &ChangeReport) -> Result<String> {
        let sections = if report.is_initial_release() {
            self.render_initial_release(report)
        } else if !report.has_changes() {
            vec![
                "### 📦 Package Changes".to_string(),
                "ℹ️ **No package changes detected** (metadata or rebuild only)".to_string(),
            ]
        } else {
            let mut sections = vec!["### 📦 Package Changes".to_string()];
            sections.extend(
                report
                    .iter()
                    .map(|(variant, diff)| self.render_variant(variant, diff)),
            );
            sections.push(self.render_summary(report));
            sections
        };

        let mut output = sections.join("\n\n");
        output.push('\n');
        Ok(output)
    }
}
