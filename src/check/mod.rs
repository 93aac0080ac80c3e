//! Read-only diagnostics over the project tree and the record store, plus
//! the path normalizer that rewrites the store.
//!
//! - [`structure`]: expected directories and files
//! - [`images`]: local image references that resolve to real files
//! - [`fix`]: canonical image paths, optional pruning

pub mod fix;
pub mod images;
pub mod structure;

use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::utils::path::is_remote_url;

/// File a local image reference is expected at.
///
/// A leading `/` is ignored. References starting with the assets prefix are
/// site paths; anything else is taken relative to the assets directory.
pub fn resolve_local(config: &SiteConfig, reference: &str) -> PathBuf {
    let prefix = config.paths.assets_prefix();
    let site_path = reference.trim().trim_start_matches('/');
    let under_prefix = site_path
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));

    if under_prefix {
        config.paths.site_path_to_file(&config.root, site_path)
    } else {
        config
            .paths
            .site_path_to_file(&config.root, &format!("{prefix}/{site_path}"))
    }
}

/// Whether a reference points at something that exists.
///
/// Remote URLs are assumed to exist; they are never fetched.
pub fn reference_exists(config: &SiteConfig, reference: &str) -> bool {
    is_remote_url(reference) || resolve_local(config, reference).is_file()
}
