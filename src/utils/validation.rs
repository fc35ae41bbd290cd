use crate::utils::error::{RecompressError, Result};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();

    if display.is_empty() {
        return Err(RecompressError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(RecompressError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(RecompressError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecompressError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RecompressError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Absolute form of `path` with `.` and `..` folded away. The longest
/// existing ancestor is canonicalized, so symlinked spellings of the same
/// directory resolve to the same path even when the leaf does not exist yet.
pub fn resolve_root(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    let mut existing = normalized.as_path();
    let mut missing = Vec::new();
    while let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) {
        missing.push(name.to_os_string());
        existing = parent;
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc, name| acc.join(name));
        }
    }

    normalized
}

/// Input and output roots must be neither equal nor nested, however they are
/// spelled.
pub fn validate_disjoint_roots(input: &Path, output: &Path) -> Result<()> {
    let resolved_input = resolve_root(input);
    let resolved_output = resolve_root(output);

    if resolved_input.starts_with(&resolved_output) || resolved_output.starts_with(&resolved_input)
    {
        return Err(RecompressError::InvalidConfigValueError {
            field: "output_dir".to_string(),
            value: output.display().to_string(),
            reason: format!(
                "Output directory {} must not overlap input directory {}",
                resolved_output.display(),
                resolved_input.display()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input_dir", Path::new("assets/images_")).is_ok());
        assert!(validate_path("input_dir", Path::new("")).is_err());
        assert!(validate_path("input_dir", Path::new("bad\0path")).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("quality", 80u8, 0, 100).is_ok());
        assert!(validate_range("quality", 0u8, 0, 100).is_ok());
        assert!(validate_range("quality", 101u8, 0, 100).is_err());
        assert!(validate_range("speed", 0u8, 1, 10).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("concurrency", 4, 1).is_ok());
        assert!(validate_positive_number("concurrency", 0, 1).is_err());
    }

    #[test]
    fn test_validate_disjoint_roots() {
        let images_ = Path::new("public/assets/images_/races");
        let images = Path::new("public/assets/images/races");

        assert!(validate_disjoint_roots(images_, images).is_ok());
        assert!(validate_disjoint_roots(images, images).is_err());
        assert!(validate_disjoint_roots(images, &images.join("avif")).is_err());
        assert!(validate_disjoint_roots(&images.join("src"), images).is_err());
        // Shared string prefix is not nesting.
        assert!(validate_disjoint_roots(Path::new("out"), Path::new("out2")).is_ok());
    }

    #[test]
    fn test_disjoint_roots_sees_through_dot_dot() {
        assert!(validate_disjoint_roots(Path::new("src"), Path::new("tests/../src")).is_err());
        assert!(validate_disjoint_roots(Path::new("./src"), Path::new("src")).is_err());
        assert!(validate_disjoint_roots(
            Path::new("no-such-root/images_"),
            Path::new("no-such-root/tmp/../images_/out")
        )
        .is_err());
        assert!(validate_disjoint_roots(
            Path::new("no-such-root/images_"),
            Path::new("no-such-root/tmp/../images")
        )
        .is_ok());
    }

    #[test]
    fn test_disjoint_roots_compares_absolute_and_relative() {
        let cwd = std::env::current_dir().unwrap();

        assert!(validate_disjoint_roots(Path::new("src"), &cwd.join("src")).is_err());
        assert!(validate_disjoint_roots(&cwd.join("src"), Path::new("src/out")).is_err());
        assert!(validate_disjoint_roots(Path::new("src"), &cwd.join("tests")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_disjoint_roots_follows_symlinks() {
        let temp = tempfile::TempDir::new().unwrap();
        let real = temp.path().join("images");
        std::fs::create_dir(&real).unwrap();
        let alias = temp.path().join("alias");
        std::os::unix::fs::symlink(&real, &alias).unwrap();

        assert!(validate_disjoint_roots(&real, &alias).is_err());
        assert!(validate_disjoint_roots(&real, &alias.join("not-yet-created")).is_err());
    }

    #[test]
    fn test_resolve_root_is_absolute() {
        let resolved = resolve_root(Path::new("no-such-root/a/../b"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("no-such-root/b"));
    }
}
