//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! base_url = "https://p4blo4p.github.io/hoteles-booking-web-pages"
//! ```
//!
//! The `BASE_URL` environment variable and `--base-url` override this value.

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::config::util::extract_url_path;
use crate::utils::path::is_remote_url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public URL the site is deployed under. Empty means root-relative output.
    pub base_url: String,
}

impl SiteSectionConfig {
    /// Base URL without trailing slash (`""` when unset).
    pub fn base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Path component of the base URL, used to prefix root-relative links
    /// for subdirectory deployments (`https://x.github.io/hoteles` -> `hoteles`).
    pub fn path_prefix(&self) -> String {
        extract_url_path(self.base_url()).unwrap_or_default()
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let base = self.base_url();
        if !base.is_empty() && !is_remote_url(base) {
            diag.error_with_hint(
                "site.base_url",
                format!("`{base}` is not an absolute http(s) URL"),
                "use e.g. https://user.github.io/project, or leave empty for root-relative links",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_base_url_trimmed() {
        let config = test_parse_config("[site]\nbase_url = \"https://x.github.io/hoteles/\"");
        assert_eq!(config.site.base_url(), "https://x.github.io/hoteles");
        assert_eq!(config.site.path_prefix(), "hoteles");
    }

    #[test]
    fn test_empty_base_url() {
        let config = test_parse_config("");
        assert_eq!(config.site.base_url(), "");
        assert_eq!(config.site.path_prefix(), "");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = test_parse_config("[site]\nbase_url = \"not a url\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
    }
}
