//! Output naming and writing
//!
//! Converted files land next to their source as `<stem><suffix>.<ext>`, keeping
//! the source extension verbatim.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};

#[derive(Debug, Clone)]
pub struct OutputNamer {
    suffix: String,
}

impl OutputNamer {
    /// The suffix must be non-empty and free of path separators, otherwise the
    /// output could replace its own source or land in another directory.
    pub fn new(suffix: impl Into<String>) -> Result<Self> {
        let suffix = suffix.into();
        if suffix.is_empty() || suffix.contains(['/', '\\']) {
            return Err(ConversionError::InvalidSuffix(suffix));
        }
        Ok(Self { suffix })
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn output_path(&self, source: &Path) -> Result<PathBuf> {
        let (Some(stem), Some(ext)) = (source.file_stem(), source.extension()) else {
            return Err(ConversionError::UnsupportedFormat(source.display().to_string()));
        };

        let mut name = stem.to_os_string();
        name.push(&self.suffix);
        name.push(".");
        name.push(ext);

        Ok(source.with_file_name(name))
    }

    /// Writes `bytes` to `destination`, replacing any existing file.
    ///
    /// The bytes go to a temporary file in the same directory first and are
    /// renamed into place, so a failed write never leaves a partial output.
    /// The output takes the permission bits of `source`.
    pub fn write(&self, source: &Path, destination: &Path, bytes: &[u8]) -> Result<()> {
        let write_error =
            |e: std::io::Error| ConversionError::OutputWriteError(format!("{}: {}", destination.display(), e));

        let dir = match destination.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let permissions = fs::metadata(source).map_err(write_error)?.permissions();

        let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
        staged.write_all(bytes).map_err(write_error)?;
        staged.as_file().set_permissions(permissions).map_err(write_error)?;
        staged.as_file().sync_all().map_err(write_error)?;
        staged.persist(destination).map_err(|e| write_error(e.error))?;

        debug!("Wrote {} bytes to {}", bytes.len(), destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_suffix_goes_before_extension() {
        let namer = OutputNamer::new("_DX").unwrap();
        let output = namer.output_path(Path::new("/tex/rock_normal_map.png")).unwrap();
        assert_eq!(output, PathBuf::from("/tex/rock_normal_map_DX.png"));
    }

    #[test]
    fn test_extension_case_is_preserved() {
        let namer = OutputNamer::new("_GL").unwrap();
        let output = namer.output_path(Path::new("ROCK_NORMAL_MAP.TGA")).unwrap();
        assert_eq!(output, PathBuf::from("ROCK_NORMAL_MAP_GL.TGA"));

        let output = namer.output_path(Path::new("a/b.normal_map.jpeg")).unwrap();
        assert_eq!(output, PathBuf::from("a/b.normal_map_GL.jpeg"));
    }

    #[test]
    fn test_rejects_suffixes_that_escape_the_file_name() {
        assert!(matches!(OutputNamer::new(""), Err(ConversionError::InvalidSuffix(_))));
        assert!(matches!(OutputNamer::new("/x"), Err(ConversionError::InvalidSuffix(_))));
        assert!(matches!(OutputNamer::new("a\\b"), Err(ConversionError::InvalidSuffix(_))));
    }

    #[test]
    fn test_missing_extension_has_no_output() {
        let namer = OutputNamer::new("_DX").unwrap();
        assert!(matches!(
            namer.output_path(Path::new("rock_normal_map")),
            Err(ConversionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_write_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("rock_normal_map.png");
        let destination = dir.path().join("rock_normal_map_DX.png");
        fs::write(&source, b"source").unwrap();
        fs::write(&destination, b"stale and longer").unwrap();

        let namer = OutputNamer::new("_DX").unwrap();
        namer.write(&source, &destination, b"fresh").unwrap();

        assert_eq!(fs::read(&destination).unwrap(), b"fresh");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("rock_normal_map.png");
        fs::write(&source, b"source").unwrap();
        let destination = dir.path().join("gone/rock_normal_map_DX.png");

        let namer = OutputNamer::new("_DX").unwrap();
        let result = namer.write(&source, &destination, b"data");
        assert!(matches!(result, Err(ConversionError::OutputWriteError(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_takes_source_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let namer = OutputNamer::new("_DX").unwrap();

        for mode in [0o644, 0o640] {
            let source = dir.path().join("rock_normal_map.png");
            fs::write(&source, b"source").unwrap();
            fs::set_permissions(&source, fs::Permissions::from_mode(mode)).unwrap();

            let destination = dir.path().join("rock_normal_map_DX.png");
            namer.write(&source, &destination, b"data").unwrap();

            let written = fs::metadata(&destination).unwrap().permissions().mode() & 0o777;
            assert_eq!(written, mode);
        }
    }
}
