//! Sitemap generation.
//!
//! Lists the index and every detail page. A `sitemap.xml` template in the
//! template directory takes precedence over the built-in writer.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/hotel/sol/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};

use super::site::{HotelPage, SiteRenderer};
use crate::log;
use crate::utils::date::DateTimeUtc;
use crate::utils::path::write_atomic;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Write `<output>/sitemap.xml`.
pub fn build_sitemap(renderer: &SiteRenderer, pages: &[HotelPage], output: &Path) -> Result<()> {
    let now = DateTimeUtc::now();
    let xml = if renderer.has_template(SITEMAP_FILE) {
        let mut context = renderer.base_context(pages);
        context.insert("now", &now.to_rfc3339());
        context.insert("today", &now.to_date());
        renderer.render(SITEMAP_FILE, &context)?
    } else {
        Sitemap::build(renderer, pages, &now.to_date()).into_xml()
    };

    let path = output.join(SITEMAP_FILE);
    write_atomic(&path, xml.as_bytes())
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    log!("sitemap"; "{}", SITEMAP_FILE);
    Ok(())
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    fn build(renderer: &SiteRenderer, pages: &[HotelPage], today: &str) -> Self {
        let links = renderer.links();
        let urls = std::iter::once(links.index().permalink)
            .chain(pages.iter().map(|page| page.links.permalink.clone()))
            .map(|loc| UrlEntry {
                loc,
                lastmod: Some(today.to_owned()),
            })
            .collect();

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::generator::links::LinkBuilder;
    use crate::generator::site::tests::project;
    use crate::hotel::HotelRecord;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_xml_structure() {
        let sitemap = Sitemap {
            urls: vec![
                UrlEntry {
                    loc: "https://example.com/".to_string(),
                    lastmod: Some("2025-01-01".to_string()),
                },
                UrlEntry {
                    loc: "https://example.com/search?q=a&b=c".to_string(),
                    lastmod: None,
                },
            ],
        };
        let xml = sitemap.into_xml();

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines[1], format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        assert_eq!(lines.last().map(|l| l.trim()), Some("</urlset>"));
        assert!(xml.contains("<lastmod>2025-01-01</lastmod>"));
        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=c</loc>"));
        assert_eq!(xml.matches("<lastmod>").count(), 1);
    }

    fn renderer(root: &Path) -> (SiteRenderer, Vec<HotelPage>) {
        let config = test_config_at(root, "");
        let renderer = SiteRenderer::new(
            &config,
            LinkBuilder::with("https://x.github.io/hoteles", "hoteles", true),
        )
        .unwrap();
        let hotels: Vec<HotelRecord> =
            vec![serde_json::from_value(json!({"id": "sol", "nombre": "Sol"})).unwrap()];
        let pages = renderer.prepare(&hotels).unwrap();
        (renderer, pages)
    }

    #[test]
    fn test_builtin_sitemap_lists_every_page() {
        let temp = project();
        let (renderer, pages) = renderer(temp.path());

        let xml = Sitemap::build(&renderer, &pages, "2025-03-01").into_xml();
        assert!(xml.contains("<loc>https://x.github.io/hoteles/</loc>"));
        assert!(xml.contains("<loc>https://x.github.io/hoteles/hotel/sol/</loc>"));
        assert_eq!(xml.matches("<lastmod>2025-03-01</lastmod>").count(), 2);
    }

    #[test]
    fn test_sitemap_template_takes_precedence() {
        let temp = project();
        fs::write(
            temp.path().join("templates/sitemap.xml"),
            "{% for h in hoteles %}{{ base_url }}/hotel/{{ h.slug }}/ {{ today | length }}\n{% endfor %}",
        )
        .unwrap();
        let (renderer, pages) = renderer(temp.path());

        build_sitemap(&renderer, &pages, temp.path()).unwrap();
        assert_eq!(
            fs::read_to_string(temp.path().join(SITEMAP_FILE)).unwrap(),
            "https://x.github.io/hoteles/hotel/sol/ 10\n"
        );
    }
}
