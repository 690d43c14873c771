use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - changelog or change signal produced
    Success = 0,
    /// Application error (missing configuration, no current packages, API error, file I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for SBOM comparison.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum SbomError {
    /// A single SBOM could not be parsed. Never fatal: the source is skipped.
    #[error("Malformed SBOM document: {details}")]
    MalformedDocument { details: String },

    #[error("Missing required configuration: {name}\n\n💡 Hint: {suggestion}")]
    MissingConfiguration { name: String, suggestion: String },

    #[error("No current packages found for the '{variant}' variant under {path}\n\n💡 Hint: Please verify that the SBOM files exist and carry package-manager references matching the configured locator prefix")]
    NoCurrentPackages { variant: String, path: PathBuf },

    #[error("Failed to look up the latest release: {url}\nDetails: {details}\n\n💡 Hint: Please verify the repository name and that the token can read releases")]
    ReleaseLookupFailed { url: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
