//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! clean_urls = true      # hotel/<slug>/index.html instead of hotel/<slug>.html
//! sitemap = true
//! robots = true
//!
//! [build.placeholders]   # legacy sample-image substitution, off when empty
//! primary = "https://images.unsplash.com/photo-1574680096145-d0b6c799f9b6"
//! secondary = ["https://images.unsplash.com/photo-1574227488958-009048826034"]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Nest detail pages as `hotel/<slug>/index.html`.
    pub clean_urls: bool,
    /// Emit `sitemap.xml` (needs a base URL).
    pub sitemap: bool,
    /// Emit `robots.txt` (needs a base URL).
    pub robots: bool,
    /// Remove the output directory before rendering (CLI only).
    #[serde(skip)]
    pub clean: bool,
    pub placeholders: PlaceholderConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            clean_urls: true,
            sitemap: true,
            robots: true,
            clean: false,
            placeholders: PlaceholderConfig::default(),
        }
    }
}

/// Sample image URLs baked into hand-written templates.
///
/// When a base URL is set, `src="<placeholder>"` occurrences in rendered
/// pages are replaced by the hotels' real local images.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Replaced by the primary `hotel` image.
    pub primary: String,
    /// Each feature/gallery image replaces the first of these still present.
    pub secondary: Vec<String>,
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.build.clean_urls);
        assert!(config.build.sitemap);
        assert!(config.build.robots);
        assert!(config.build.placeholders.primary.is_empty());
        assert!(config.build.placeholders.secondary.is_empty());
    }

    #[test]
    fn test_placeholders() {
        let config = test_parse_config(
            "[build.placeholders]\nprimary = \"https://a/1.jpg\"\nsecondary = [\"https://a/2.jpg\"]",
        );
        assert_eq!(config.build.placeholders.primary, "https://a/1.jpg");
        assert_eq!(config.build.placeholders.secondary.len(), 1);
    }

    #[test]
    fn test_flat_urls() {
        let config = test_parse_config("[build]\nclean_urls = false\nsitemap = false");
        assert!(!config.build.clean_urls);
        assert!(!config.build.sitemap);
        assert!(config.build.robots);
    }
}
