//! `robots.txt` generation.

use std::path::Path;

use anyhow::{Context, Result};

use super::site::{HotelPage, SiteRenderer};
use super::sitemap::SITEMAP_FILE;
use crate::log;
use crate::utils::date::DateTimeUtc;
use crate::utils::path::write_atomic;

pub const ROBOTS_FILE: &str = "robots.txt";

/// Allow everything and point crawlers at the sitemap.
fn default_robots(sitemap_url: Option<&str>) -> String {
    let mut robots = String::from("User-agent: *\nAllow: /\n");
    if let Some(url) = sitemap_url {
        robots.push_str("\nSitemap: ");
        robots.push_str(url);
        robots.push('\n');
    }
    robots
}

/// Write `<output>/robots.txt`, from a `robots.txt` template if present.
pub fn build_robots(
    renderer: &SiteRenderer,
    pages: &[HotelPage],
    output: &Path,
    with_sitemap: bool,
) -> Result<()> {
    let links = renderer.links();
    let content = if renderer.has_template(ROBOTS_FILE) {
        let now = DateTimeUtc::now();
        let mut context = renderer.base_context(pages);
        context.insert("now", &now.to_rfc3339());
        context.insert("today", &now.to_date());
        renderer.render(ROBOTS_FILE, &context)?
    } else {
        let sitemap_url = with_sitemap.then(|| links.absolute(SITEMAP_FILE));
        default_robots(sitemap_url.as_deref())
    };

    let path = output.join(ROBOTS_FILE);
    write_atomic(&path, content.as_bytes())
        .with_context(|| format!("Failed to write robots.txt to {}", path.display()))?;

    log!("robots"; "{}", ROBOTS_FILE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_robots() {
        assert_eq!(
            default_robots(Some("https://x.github.io/h/sitemap.xml")),
            "User-agent: *\nAllow: /\n\nSitemap: https://x.github.io/h/sitemap.xml\n"
        );
        assert_eq!(default_robots(None), "User-agent: *\nAllow: /\n");
    }
}
