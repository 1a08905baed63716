use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{BlockswapError, BlockswapResult};

/// Make sure `root` exists and is a directory
fn ensure_dir(root: &Path) -> BlockswapResult<()> {
    if !root.exists() {
        return Err(BlockswapError::TargetDirMissing {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(BlockswapError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Strip a leading dot so `.cpp` and `cpp` mean the same thing
pub fn normalize_extension(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}

/// Recursively collect regular files under `root` with the given extension
///
/// The comparison is case-sensitive. Symlinks to files are included,
/// symlinked directories are not descended into. Results are sorted by path.
pub fn collect_files(root: impl AsRef<Path>, extension: &str) -> BlockswapResult<Vec<PathBuf>> {
    let root = root.as_ref();
    ensure_dir(root)?;

    let extension = normalize_extension(extension);
    debug!("Collecting *.{} files under {}", extension, root.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        // is_file() on the path follows file symlinks
        if !entry.path().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == extension);
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!("Found {} matching files", files.len());
    Ok(files)
}

/// Line ending convention of a text file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    /// Every `\n` in the file is preceded by `\r`
    Crlf,
}

impl LineEnding {
    /// Files mixing both conventions count as `Lf` and are matched as-is
    pub fn detect(content: &str) -> Self {
        let newlines = content.matches('\n').count();
        if newlines > 0 && content.matches("\r\n").count() == newlines {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Convert to `\n` line endings
    pub fn to_lf(self, content: &str) -> Cow<'_, str> {
        match self {
            Self::Lf => Cow::Borrowed(content),
            Self::Crlf => Cow::Owned(content.replace("\r\n", "\n")),
        }
    }

    /// Inverse of `to_lf`
    pub fn restore(self, content: &str) -> Cow<'_, str> {
        match self {
            Self::Lf => Cow::Borrowed(content),
            Self::Crlf => Cow::Owned(content.replace('\n', "\r\n")),
        }
    }
}

/// Read a file as UTF-8 text
///
/// Returns `Ok(None)` when the bytes are not valid UTF-8.
pub fn read_text(path: impl AsRef<Path>) -> BlockswapResult<Option<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| BlockswapError::io_error(e, Some(path)))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(Some(text)),
        Err(e) => {
            debug!(
                "{} is not valid UTF-8 (first bad byte at {})",
                path.display(),
                e.utf8_error().valid_up_to()
            );
            Ok(None)
        }
    }
}

/// Overwrite a file in place
pub fn write_text(path: impl AsRef<Path>, content: &str) -> BlockswapResult<()> {
    let path = path.as_ref();
    debug!("Writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content).map_err(|e| BlockswapError::io_error(e, Some(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_files_recursive_and_sorted() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.cpp"), "").unwrap();
        fs::write(dir.path().join("a.cpp"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("upper.CPP"), "").unwrap();
        fs::create_dir_all(dir.path().join("5_01_BlinnPhong")).unwrap();
        fs::write(dir.path().join("5_01_BlinnPhong").join("BlinnPhong.cpp"), "").unwrap();
        fs::create_dir_all(dir.path().join("dir.cpp")).unwrap();

        let files = collect_files(dir.path(), "cpp").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("5_01_BlinnPhong").join("BlinnPhong.cpp"),
                PathBuf::from("a.cpp"),
                PathBuf::from("b.cpp"),
            ]
        );
    }

    #[test]
    fn test_leading_dot_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.cpp"), "").unwrap();

        assert_eq!(collect_files(dir.path(), ".cpp").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("src");

        let result = collect_files(&missing, "cpp");
        assert!(matches!(result, Err(BlockswapError::TargetDirMissing { .. })));
    }

    #[test]
    fn test_root_is_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("src");
        fs::write(&file, "").unwrap();

        let result = collect_files(&file, "cpp");
        assert!(matches!(result, Err(BlockswapError::NotADirectory { .. })));
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.cpp");
        let bad = dir.path().join("bad.cpp");
        fs::write(&good, "// 注释\n").unwrap();
        // latin1 "é" followed by a stray 0xff
        fs::write(&bad, [0x2f, 0x2f, 0x20, 0xe9, 0xff, 0x0a]).unwrap();

        assert_eq!(read_text(&good).unwrap().as_deref(), Some("// 注释\n"));
        assert_eq!(read_text(&bad).unwrap(), None);
    }

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(LineEnding::detect("a\r\nb\r\n"), LineEnding::Crlf);
        assert_eq!(LineEnding::detect("a\nb\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("no newline"), LineEnding::Lf);
    }

    #[test]
    fn test_crlf_conversion_is_reversible() {
        let original = "int a;\r\n\r\n\tint b; \r\r\n}\r\n";
        let ending = LineEnding::detect(original);
        let lf = ending.to_lf(original);

        assert_eq!(lf, "int a;\n\n\tint b; \r\n}\n");
        assert_eq!(ending.restore(&lf), original);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_collected() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.txt");
        fs::write(&real, "").unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("link.cpp")).unwrap();

        let files = collect_files(dir.path(), "cpp").unwrap();
        assert_eq!(files, vec![dir.path().join("link.cpp")]);
    }
}
