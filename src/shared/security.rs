use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum snapshot size accepted from disk (32 MB)
///
/// A multilevel export of a large machine rarely exceeds a few megabytes;
/// anything bigger is almost certainly not a BOM snapshot.
pub const MAX_SNAPSHOT_SIZE: u64 = 32 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Reads a regular file into a string after checking its type and size
///
/// # Arguments
/// * `path` - File to read
/// * `file_description` - Human readable name used in error messages (e.g. "BOM snapshot")
/// * `max_size` - Upper bound in bytes
///
/// # Errors
/// Returns an error if:
/// - The path is a symbolic link or not a regular file
/// - The file exceeds `max_size`
/// - The content cannot be read as UTF-8
pub fn read_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<String> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. Symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}
