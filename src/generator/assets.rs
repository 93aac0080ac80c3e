//! Static directory publishing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;

use crate::config::section::STATIC_SITE_DIR;
use crate::log;

const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Collect all files from a directory recursively, sorted.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

/// Copy `static_dir` verbatim to `<output>/static`.
///
/// Returns the number of files copied. A missing static directory is not an
/// error: the site simply has no static files.
pub fn copy_static(static_dir: &Path, output: &Path) -> Result<usize> {
    if !static_dir.is_dir() {
        log!("warning"; "static directory `{}` not found, skipping", static_dir.display());
        return Ok(0);
    }

    let dest_root = output.join(STATIC_SITE_DIR);
    let files = collect_all_files(static_dir);
    for src in &files {
        let rel = src.strip_prefix(static_dir).with_context(|| {
            format!("`{}` is outside `{}`", src.display(), static_dir.display())
        })?;
        let dest = dest_root.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, &dest)
            .with_context(|| format!("failed to copy `{}`", src.display()))?;
    }
    Ok(files.len())
}
