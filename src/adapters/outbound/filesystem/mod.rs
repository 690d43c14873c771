/// Filesystem adapters for file I/O operations
mod file_writer;
mod github_output;
mod sbom_directory_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use github_output::{GitHubOutputWriter, DEFAULT_OUTPUT_KEY};
pub use sbom_directory_reader::SbomDirectoryReader;
