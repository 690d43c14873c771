use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum SBOM file size for security (100 MB)
/// This prevents DoS attacks via excessively large files
pub const MAX_SBOM_SIZE: u64 = 100 * 1024 * 1024;

/// Checks that an SBOM source file is safe to read and returns its size
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns `SbomError::SecurityError` if:
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than `max_size`
///
/// Returns `SbomError::FileReadError` if metadata cannot be read.
pub fn check_source_file(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SbomError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: "SBOM source is a symbolic link".to_string(),
            hint: "Copy the SBOM into the scan directory instead of linking it".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "SBOM is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                max_size
            ),
            hint: "Split the SBOM per image or raise the limit".to_string(),
        }
        .into());
    }

    Ok(metadata.len())
}

/// Rejects output paths that are existing symbolic links
///
/// # Errors
/// Returns `SbomError::FileWriteError` if the path is a symlink or its
/// metadata cannot be read.
pub fn check_output_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to read file metadata: {}", e),
            }
            .into())
        }
    };

    if metadata.is_symlink() {
        return Err(SbomError::FileWriteError {
            path: path.to_path_buf(),
            details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
        }
        .into());
    }

    Ok(())
}
