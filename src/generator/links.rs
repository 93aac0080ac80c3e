//! Page locations.
//!
//! Detail pages live under `hotel/<slug>`. With clean URLs the page is
//! `hotel/<slug>/index.html` and linked as `/hotel/<slug>/`; otherwise it is
//! `hotel/<slug>.html`. Links carry the base URL's path prefix so a site
//! deployed to `https://user.github.io/project` links to `/project/hotel/...`.

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::utils::path::route::join_url;

/// Where a page is written and how it is linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    /// Output path relative to the output directory.
    pub output: PathBuf,
    /// Root-relative URL including the path prefix.
    pub url: String,
    /// Absolute URL, or `url` when no base URL is set.
    pub permalink: String,
}

/// URL layout shared by every page of one build.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
    /// `/prefix` or empty.
    root: String,
    clean_urls: bool,
}

impl LinkBuilder {
    pub fn new(config: &SiteConfig) -> Self {
        Self::with(config.site.base_url(), &config.site.path_prefix(), config.build.clean_urls)
    }

    pub fn with(base_url: &str, path_prefix: &str, clean_urls: bool) -> Self {
        let prefix = path_prefix.trim_matches('/');
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            root: if prefix.is_empty() {
                String::new()
            } else {
                format!("/{prefix}")
            },
            clean_urls,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page(&self, output: PathBuf, site_path: &str) -> PageLinks {
        let url = join_url(&self.root, site_path);
        let permalink = if self.base_url.is_empty() {
            url.clone()
        } else {
            join_url(&self.base_url, site_path)
        };
        PageLinks {
            output,
            url,
            permalink,
        }
    }

    pub fn index(&self) -> PageLinks {
        self.page(PathBuf::from("index.html"), "")
    }

    pub fn hotel(&self, slug: &str) -> PageLinks {
        if self.clean_urls {
            self.page(
                Path::new("hotel").join(slug).join("index.html"),
                &format!("hotel/{slug}/"),
            )
        } else {
            self.page(
                Path::new("hotel").join(format!("{slug}.html")),
                &format!("hotel/{slug}.html"),
            )
        }
    }

    /// Absolute URL of a root-level document (`sitemap.xml`).
    pub fn absolute(&self, site_path: &str) -> String {
        join_url(&self.base_url, site_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_urls_without_base() {
        let links = LinkBuilder::with("", "", true);
        let page = links.hotel("hotel-test");
        assert_eq!(page.output, PathBuf::from("hotel/hotel-test/index.html"));
        assert_eq!(page.url, "/hotel/hotel-test/");
        assert_eq!(page.permalink, "/hotel/hotel-test/");
        assert_eq!(links.index().url, "/");
    }

    #[test]
    fn test_flat_urls_with_prefix() {
        let links = LinkBuilder::with("https://x.github.io/hoteles/", "hoteles", false);
        let page = links.hotel("sol");
        assert_eq!(page.output, PathBuf::from("hotel/sol.html"));
        assert_eq!(page.url, "/hoteles/hotel/sol.html");
        assert_eq!(page.permalink, "https://x.github.io/hoteles/hotel/sol.html");
        assert_eq!(links.index().permalink, "https://x.github.io/hoteles/");
        assert_eq!(links.absolute("sitemap.xml"), "https://x.github.io/hoteles/sitemap.xml");
    }
}
