/// Formatter adapters for the changelog and the change record
mod json_change_formatter;
mod markdown_changelog_formatter;

pub use json_change_formatter::JsonChangeFormatter;
pub use markdown_changelog_formatter::MarkdownChangelogFormatter;
