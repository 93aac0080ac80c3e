//! Structure checker.
//!
//! Walks the expected directory/file manifest of a project and reports which
//! entries exist. Missing directories may be created; files never are.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::config::SiteConfig;
use crate::utils::path::to_site_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// One manifest entry and whether it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub path: PathBuf,
    /// Forward-slash path relative to the project root.
    pub display: String,
    pub exists: bool,
}

/// Result of one structure scan.
#[derive(Debug, Clone, Default)]
pub struct StructureReport {
    pub entries: Vec<Entry>,
}

impl StructureReport {
    fn count(&self, kind: EntryKind) -> (usize, usize) {
        let of_kind = self.entries.iter().filter(|e| e.kind == kind);
        let total = of_kind.clone().count();
        let found = of_kind.filter(|e| e.exists).count();
        (found, total)
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.exists)
    }

    pub fn missing_dirs(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Dir && !e.exists)
    }

    /// `dirs x/y, files x/y`
    pub fn summary(&self) -> String {
        let (dirs_found, dirs) = self.count(EntryKind::Dir);
        let (files_found, files) = self.count(EntryKind::File);
        format!("dirs {dirs_found}/{dirs}, files {files_found}/{files}")
    }

    pub fn print(&self) {
        for entry in &self.entries {
            let kind = match entry.kind {
                EntryKind::Dir => "dir ",
                EntryKind::File => "file",
            };
            if entry.exists {
                println!("{} {} {}", "✓".green(), kind.dimmed(), entry.display);
            } else {
                println!("{} {} {}", "✗".red(), kind.dimmed(), entry.display.red());
            }
        }
    }
}

/// Expected layout of a project.
pub fn manifest(config: &SiteConfig) -> Vec<(EntryKind, PathBuf)> {
    let paths = &config.paths;
    let assets = config
        .paths
        .site_path_to_file(&config.root, paths.assets_prefix());
    let data_dir = paths
        .data
        .parent()
        .map_or_else(|| config.root.clone(), Path::to_path_buf);

    let mut dirs = vec![
        paths.templates.clone(),
        paths.static_dir.clone(),
        paths.static_dir.join("css"),
        paths.static_dir.join("js"),
        assets,
        data_dir,
    ];
    dirs.extend(config.check.dirs.iter().map(|d| config.root_join(d)));

    let mut files = vec![
        paths.data.clone(),
        paths.templates.join("index.html"),
        paths.templates.join("hotel.html"),
        paths.static_dir.join("css/styles.css"),
        paths.static_dir.join("js/scripts.js"),
    ];
    files.extend(config.check.files.iter().map(|f| config.root_join(f)));

    let mut manifest: Vec<(EntryKind, PathBuf)> = Vec::with_capacity(dirs.len() + files.len());
    for entry in dirs
        .into_iter()
        .map(|d| (EntryKind::Dir, d))
        .chain(files.into_iter().map(|f| (EntryKind::File, f)))
    {
        if !manifest.contains(&entry) {
            manifest.push(entry);
        }
    }
    manifest
}

/// Check every manifest entry against the filesystem.
pub fn scan(config: &SiteConfig) -> StructureReport {
    let entries = manifest(config)
        .into_iter()
        .map(|(kind, path)| {
            let exists = match kind {
                EntryKind::Dir => path.is_dir(),
                EntryKind::File => path.is_file(),
            };
            let display = match kind {
                EntryKind::Dir => format!("{}/", to_site_path(&config.root_relative(&path))),
                EntryKind::File => to_site_path(&config.root_relative(&path)),
            };
            Entry {
                kind,
                path,
                display,
                exists,
            }
        })
        .collect();
    StructureReport { entries }
}

/// Create every missing directory of `report`. Returns how many were created.
pub fn create_missing_dirs(report: &StructureReport) -> Result<usize> {
    let mut created = 0;
    for entry in report.missing_dirs() {
        fs::create_dir_all(&entry.path)
            .with_context(|| format!("failed to create `{}`", entry.display))?;
        created += 1;
    }
    Ok(created)
}
