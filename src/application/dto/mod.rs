/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod changelog_request;
mod changelog_response;
mod diff_settings;

pub use changelog_request::{ChangelogRequest, DetectRequest, PreviousSource};
pub use changelog_response::{ChangelogResponse, DetectResponse};
pub use diff_settings::{DiffSettings, DEFAULT_FILE_SUFFIX, DEFAULT_LOCATOR_PREFIX};
