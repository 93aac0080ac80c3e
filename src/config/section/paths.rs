//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! data = "data/hotels.json"
//! templates = "templates"
//! static = "static"
//! output = "dist"
//! assets_prefix = "static/images/hotels"
//! ```
//!
//! All paths are relative to the project root (the directory holding
//! `hotelsite.toml`). `assets_prefix` is a site path, not a filesystem path:
//! it is the prefix every local image reference in the store starts with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Site path under which the static directory is published.
pub const STATIC_SITE_DIR: &str = "static";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Hotel Record Store (JSON array).
    pub data: PathBuf,
    /// Tera template directory.
    pub templates: PathBuf,
    /// Static assets, published as `<output>/static`.
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    /// Generated site root.
    pub output: PathBuf,
    /// Canonical prefix for downloaded hotel images.
    pub assets_prefix: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data: "data/hotels.json".into(),
            templates: "templates".into(),
            static_dir: "static".into(),
            output: "dist".into(),
            assets_prefix: "static/images/hotels".into(),
        }
    }
}

impl PathsConfig {
    /// Assets prefix without surrounding slashes.
    pub fn assets_prefix(&self) -> &str {
        self.assets_prefix.trim_matches('/')
    }

    /// Resolve every filesystem path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        for path in [
            &mut self.data,
            &mut self.templates,
            &mut self.static_dir,
            &mut self.output,
        ] {
            *path = crate::utils::path::normalize_path(&root.join(&*path));
        }
    }

    /// Map a site path (`static/images/x.webp`) to the project file backing it.
    ///
    /// Paths under `static/` live in the configured static directory; anything
    /// else is taken relative to the project root.
    pub fn site_path_to_file(&self, root: &Path, site_path: &str) -> PathBuf {
        let site_path = site_path.trim_start_matches('/');
        match site_path
            .strip_prefix(STATIC_SITE_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
        {
            Some(rest) => self.static_dir.join(rest),
            None => root.join(site_path),
        }
    }

    /// Validate raw (not yet normalized) paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let prefix = self.assets_prefix();
        if prefix.is_empty() {
            diag.error("paths.assets_prefix", "must not be empty");
        } else if !prefix.starts_with(&format!("{STATIC_SITE_DIR}/")) {
            diag.error_with_hint(
                "paths.assets_prefix",
                format!("`{prefix}` is not published with the site"),
                "images must live under `static/`, e.g. static/images/hotels",
            );
        } else if prefix.split('/').any(|part| part == ".." || part.is_empty()) {
            diag.error("paths.assets_prefix", format!("`{prefix}` is not a clean relative path"));
        }

        if self.data.file_name().is_none() {
            diag.error("paths.data", "must point to a JSON file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.paths.data, PathBuf::from("data/hotels.json"));
        assert_eq!(config.paths.static_dir, PathBuf::from("static"));
        assert_eq!(config.paths.assets_prefix(), "static/images/hotels");
    }

    #[test]
    fn test_static_rename() {
        let config = test_parse_config("[paths]\nstatic = \"public\"\nassets_prefix = \"/static/img/\"");
        assert_eq!(config.paths.static_dir, PathBuf::from("public"));
        assert_eq!(config.paths.assets_prefix(), "static/img");
    }

    #[test]
    fn test_site_path_to_file() {
        let paths = PathsConfig {
            static_dir: PathBuf::from("/site/public"),
            ..PathsConfig::default()
        };
        let root = Path::new("/site");

        assert_eq!(
            paths.site_path_to_file(root, "static/images/hotels/a/hotel.webp"),
            PathBuf::from("/site/public/images/hotels/a/hotel.webp")
        );
        assert_eq!(
            paths.site_path_to_file(root, "/static/css/styles.css"),
            PathBuf::from("/site/public/css/styles.css")
        );
        assert_eq!(
            paths.site_path_to_file(root, "data/img/a.jpg"),
            PathBuf::from("/site/data/img/a.jpg")
        );
    }

    #[test]
    fn test_validate_prefix() {
        let mut diag = ConfigDiagnostics::new();
        let paths = PathsConfig {
            assets_prefix: "data/img".into(),
            ..PathsConfig::default()
        };
        paths.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);

        let mut diag = ConfigDiagnostics::new();
        PathsConfig::default().validate(&mut diag);
        assert!(diag.is_empty());
    }
}
