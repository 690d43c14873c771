/// Use cases module containing application business logic orchestration
mod detect_changes;
mod generate_changelog;

pub use detect_changes::DetectChangesUseCase;
pub use generate_changelog::GenerateChangelogUseCase;
