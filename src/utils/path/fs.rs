//! Filesystem path helpers.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Write `contents` to `path` so that readers only ever see the old file or
/// the complete new one.
///
/// Missing parent directories are created. The data goes to a hidden sibling
/// first and is renamed over `path` once fully written; on failure the
/// sibling is removed and `path` is untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_sibling(path);
    if let Err(err) = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(())
}

/// `dir/name.ext` -> `dir/.name.ext.tmp`
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_write_atomic_creates_parents() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a/b/hotels.json");

        write_atomic(&target, b"[]").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"[]");
        assert!(!temp.path().join("a/b/.hotels.json.tmp").exists());
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("data.json");
        fs::write(&target, b"old").unwrap();

        write_atomic(&target, b"new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_temp_sibling() {
        assert_eq!(
            temp_sibling(Path::new("static/hotel.webp")),
            PathBuf::from("static/.hotel.webp.tmp")
        );
    }
}
