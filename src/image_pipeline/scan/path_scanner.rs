use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Recursive, read-only walk over every regular file below a root directory.
///
/// Symbolic links are followed. A link back to one of its own ancestors is
/// reported by the walk as a loop and skipped like any unreadable entry.
#[derive(Debug, Clone)]
pub struct PathScanner {
    root: PathBuf,
}

impl PathScanner {
    /// Fails with [`ConversionError::NotFound`] unless `root` is an existing directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ConversionError::NotFound(root.to_path_buf()));
        }
        let root = std::fs::canonicalize(root)
            .map_err(|_| ConversionError::NotFound(root.to_path_buf()))?;

        debug!("Scanning {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yields absolute file paths in a stable, name-sorted order.
    ///
    /// Every call starts a fresh walk. Entries that cannot be read are logged
    /// and left out.
    pub fn scan(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = PathScanner::new(dir.path().join("nope"));
        assert!(matches!(result, Err(ConversionError::NotFound(_))));
    }

    #[test]
    fn test_file_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("rock_normal_map.png");
        fs::write(&file, b"x").unwrap();

        let result = PathScanner::new(&file);
        assert!(matches!(result, Err(ConversionError::NotFound(_))));
    }

    #[test]
    fn test_walks_nested_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        fs::write(dir.path().join("top.png"), b"x").unwrap();
        fs::write(dir.path().join("a/b/c/deep.tga"), b"x").unwrap();
        fs::write(dir.path().join("a/mid.exr"), b"x").unwrap();

        let scanner = PathScanner::new(dir.path()).unwrap();
        let names: Vec<String> = scanner
            .scan()
            .map(|p| {
                assert!(p.is_absolute());
                p.file_name().unwrap().to_string_lossy().into_owned()
            })
            .collect();

        assert_eq!(names, vec!["deep.tga", "mid.exr", "top.png"]);
    }

    #[test]
    fn test_scan_is_restartable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.png"), b"x").unwrap();

        let scanner = PathScanner::new(dir.path()).unwrap();
        assert_eq!(scanner.scan().count(), 1);
        fs::write(dir.path().join("two.png"), b"x").unwrap();
        assert_eq!(scanner.scan().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/file.png"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/loop")).unwrap();

        let scanner = PathScanner::new(dir.path()).unwrap();
        assert_eq!(scanner.scan().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_yielded() {
        let dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let target = elsewhere.path().join("real.png");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("rock_normal_map.png")).unwrap();

        let scanner = PathScanner::new(dir.path()).unwrap();
        let paths: Vec<PathBuf> = scanner.scan().collect();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("rock_normal_map.png"));
    }
}
