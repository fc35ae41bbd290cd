use crate::utils::error::{RecompressError, Result};
use std::path::{Path, PathBuf};

/// Maps a file under `input_root` to its mirror under `output_root`, with the
/// extension replaced by `extension`.
///
/// `input_root/races/horseA.png` becomes `output_root/races/horseA.avif`.
/// Only the last extension is replaced, and a file without one gets
/// `extension` appended.
pub fn derive_output_path(
    input_root: &Path,
    output_root: &Path,
    file: &Path,
    extension: &str,
) -> Result<PathBuf> {
    let relative = file
        .strip_prefix(input_root)
        .map_err(|_| RecompressError::PathError {
            path: file.to_path_buf(),
            root: input_root.to_path_buf(),
        })?;

    if relative.as_os_str().is_empty() {
        return Err(RecompressError::PathError {
            path: file.to_path_buf(),
            root: input_root.to_path_buf(),
        });
    }

    let mut output = output_root.join(relative);
    output.set_extension(extension);
    Ok(output)
}
