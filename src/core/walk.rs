use crate::utils::error::{RecompressError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lazily yields every regular file under `dir`.
///
/// The traversal is iterative, so tree depth is bounded only by the
/// filesystem. Symlinks are not followed and are skipped along with any other
/// non-regular entry. A missing or unreadable root surfaces as the first item.
pub fn list_files(dir: &Path) -> impl Iterator<Item = Result<PathBuf>> {
    let root = dir.to_path_buf();

    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.depth() == 0 && !entry.file_type().is_dir() => {
                Some(Err(RecompressError::NotADirectoryError {
                    path: entry.into_path(),
                }))
            }
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(source) => Some(Err(RecompressError::EnumerationError {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.clone()),
                source,
            })),
        })
}
