//! sbom-changelog - SBOM comparison and changelog tool for container image variants
//!
//! This library compares the SBOMs of a current build against those of a
//! previous release and renders a package changelog plus a machine-readable
//! change record, following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_diff`): Pure normalization, aggregation and diffing logic
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_changelog::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create use case with injected adapters
//! let use_case = DetectChangesUseCase::new(
//!     SbomDirectoryReader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let request = DetectRequest::new(
//!     PathBuf::from("sbom-output"),
//!     PathBuf::from("previous-sbom"),
//!     DiffSettings::default(),
//! );
//! let response = use_case.execute(request)?;
//!
//! // Format output
//! let formatter = MarkdownChangelogFormatter::default();
//! println!("{}", formatter.format(&response.report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod sbom_diff;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, GitHubOutputWriter, SbomDirectoryReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonChangeFormatter, MarkdownChangelogFormatter,
    };
    pub use crate::adapters::outbound::network::GitHubReleaseClient;
    pub use crate::application::dto::{
        ChangelogRequest, ChangelogResponse, DetectRequest, DetectResponse, DiffSettings,
        PreviousSource,
    };
    pub use crate::application::use_cases::{DetectChangesUseCase, GenerateChangelogUseCase};
    pub use crate::ports::outbound::{
        ChangeReportFormatter, ChangeSignalWriter, OutputPresenter, ProgressReporter,
        PublishedRelease, ReleaseRepository, SbomReader, SbomScan,
    };
    pub use crate::sbom_diff::domain::{
        AddedPackage, ChangeReport, PackageMap, PackageRecord, RawSbom, RemovedPackage,
        SbomDocument, UpdatedPackage, VariantCatalog, VariantDiff, VariantSpec,
    };
    pub use crate::sbom_diff::services::{
        AbsencePolicy, Aggregation, Differ, DocumentNormalizer, PackageFilter, VariantAggregator,
        VariantSnapshot,
    };
    pub use crate::shared::error::SbomError;
    pub use crate::shared::Result;
}
