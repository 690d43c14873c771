/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_release_repository;
mod mock_sbom_reader;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_release_repository::MockReleaseRepository;
pub use mock_sbom_reader::MockSbomReader;
