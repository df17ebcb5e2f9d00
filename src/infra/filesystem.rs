//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Remove a directory if present, then create it empty
pub fn recreate_dir(path: &Path) -> Result<(), FilesystemError> {
    remove_dir_all(path)?;
    create_dir_all(path)
}

/// Remove a single file
pub fn remove_file(path: &Path) -> Result<(), FilesystemError> {
    std::fs::remove_file(path).map_err(|e| FilesystemError::RemoveFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Copy a file by reading it fully and writing a fresh copy
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), FilesystemError> {
    let content = std::fs::read(src).map_err(|e| FilesystemError::ReadFile {
        path: src.to_path_buf(),
        error: e.to_string(),
    })?;
    std::fs::write(dst, content).map_err(|e| FilesystemError::WriteFile {
        path: dst.to_path_buf(),
        error: e.to_string(),
    })
}

/// Recursively copy `src` to `dst`, preserving the tree structure.
///
/// `dst` is the new directory itself, not its parent.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<(), FilesystemError> {
    let copy_err = |error: String| FilesystemError::CopyDir {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        error,
    };

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| copy_err(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| copy_err(e.to_string()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            create_dir_all(&target)?;
        } else if entry.file_type().is_symlink() {
            copy_symlink(entry.path(), &target).map_err(|e| copy_err(e.to_string()))?;
        } else {
            std::fs::copy(entry.path(), &target).map_err(|e| copy_err(e.to_string()))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> std::io::Result<()> {
    let points_to = std::fs::read_link(link)?;
    std::os::unix::fs::symlink(points_to, target)
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> std::io::Result<()> {
    std::fs::copy(link, target).map(|_| ())
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_preserves_structure() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("a/b")).unwrap();
        std::fs::write(src.join("top.c"), "int main;").unwrap();
        std::fs::write(src.join("a/b/deep.h"), "#pragma once").unwrap();
        std::fs::create_dir_all(src.join("empty")).unwrap();

        let dst = temp.path().join("dst");
        copy_dir(&src, &dst).unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("top.c")).unwrap(), "int main;");
        assert_eq!(
            std::fs::read_to_string(dst.join("a/b/deep.h")).unwrap(),
            "#pragma once"
        );
        assert!(dst.join("empty").is_dir());
    }

    #[test]
    fn test_copy_dir_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = copy_dir(&temp.path().join("missing"), &temp.path().join("dst"));
        assert!(matches!(result, Err(FilesystemError::CopyDir { .. })));
    }

    #[test]
    fn test_copy_file_missing_source_is_read_error() {
        let temp = TempDir::new().unwrap();
        let result = copy_file(&temp.path().join("nope"), &temp.path().join("out"));
        assert!(matches!(result, Err(FilesystemError::ReadFile { .. })));
    }

    #[test]
    fn test_recreate_dir_drops_old_content() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("out");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stale.ipk"), "old").unwrap();

        recreate_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }
}
