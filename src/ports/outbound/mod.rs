/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, release API, CI, console).
pub mod change_signal;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod release_repository;
pub mod sbom_reader;

pub use change_signal::ChangeSignalWriter;
pub use formatter::ChangeReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use release_repository::{PublishedRelease, ReleaseRepository};
pub use sbom_reader::{SbomReader, SbomScan};
