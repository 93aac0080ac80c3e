//! Site Renderer.
//!
//! Renders `index.html` with the whole record collection and one detail page
//! per record with `hotel.html`, then publishes the static directory and the
//! crawler documents.
//!
//! Template contexts:
//!
//! | Variable   | index | detail | Content                                      |
//! |------------|-------|--------|----------------------------------------------|
//! | `hoteles`  | ✓     | ✓      | records, each with `slug`, `url`, `permalink` |
//! | `hotel`    |       | ✓      | the current record (same augmentation)       |
//! | `base_url` | ✓     | ✓      | base URL without trailing slash, may be `""` |
//! | `home_url` | ✓     | ✓      | root-relative link to the index              |

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tera::Tera;

use super::filters::AssetFilter;
use super::links::{LinkBuilder, PageLinks};
use super::placeholder::Placeholders;
use super::{assets, robots, sitemap};
use crate::config::SiteConfig;
use crate::hotel::HotelRecord;
use crate::utils::path::write_atomic;
use crate::{debug, log};

pub const INDEX_TEMPLATE: &str = "index.html";
pub const DETAIL_TEMPLATE: &str = "hotel.html";

/// One record prepared for rendering.
#[derive(Debug, Clone)]
pub struct HotelPage {
    pub links: PageLinks,
    /// Record fields plus `slug`, `url` and `permalink`.
    pub context: Value,
}

/// Tera environment plus the URL layout of one build.
pub struct SiteRenderer {
    tera: Tera,
    links: LinkBuilder,
    placeholders: Placeholders,
}

impl SiteRenderer {
    /// Load every template under the configured directory.
    ///
    /// Fails if the directory, `index.html` or `hotel.html` is missing.
    pub fn new(config: &SiteConfig, links: LinkBuilder) -> Result<Self> {
        let dir = &config.paths.templates;
        if !dir.is_dir() {
            bail!("template directory `{}` not found", dir.display());
        }

        let glob = format!("{}/**/*", dir.display());
        let mut tera = Tera::new(&glob)
            .with_context(|| format!("failed to load templates from `{}`", dir.display()))?;
        // Pages are rendered verbatim; templates opt into `| escape`
        tera.autoescape_on(vec![]);
        tera.register_filter("asset", AssetFilter::new(links.base_url()));

        let renderer = Self {
            tera,
            links,
            placeholders: Placeholders::new(&config.build.placeholders)
                .context("invalid placeholder URL")?,
        };
        for name in [INDEX_TEMPLATE, DETAIL_TEMPLATE] {
            if !renderer.has_template(name) {
                bail!("required template `{}` not found in `{}`", name, dir.display());
            }
        }
        Ok(renderer)
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Derive slugs and links. Two records with the same slug are an error.
    pub fn prepare(&self, hotels: &[HotelRecord]) -> Result<Vec<HotelPage>> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut pages = Vec::with_capacity(hotels.len());

        for (position, hotel) in hotels.iter().enumerate() {
            let slug = hotel.slug(position);
            if let Some(previous) = seen.insert(slug.clone(), hotel.label()) {
                bail!(
                    "hotels `{}` and `{}` both map to slug `{}`",
                    previous,
                    hotel.label(),
                    slug
                );
            }

            let links = self.links.hotel(&slug);
            let mut context = hotel.as_map().clone();
            context.insert("slug".into(), Value::String(slug));
            context.insert("url".into(), Value::String(links.url.clone()));
            context.insert("permalink".into(), Value::String(links.permalink.clone()));

            pages.push(HotelPage {
                links,
                context: Value::Object(context),
            });
        }
        Ok(pages)
    }

    /// Context shared by every page.
    pub fn base_context(&self, pages: &[HotelPage]) -> tera::Context {
        let hoteles: Vec<&Value> = pages.iter().map(|page| &page.context).collect();
        let mut context = tera::Context::new();
        context.insert("hoteles", &hoteles);
        context.insert("base_url", self.links.base_url());
        context.insert("home_url", &self.links.index().url);
        context
    }

    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(name, context)
            .with_context(|| format!("failed to render `{name}`"))
    }

    /// Render the index. Placeholders are filled from each record in order.
    pub fn render_index(&self, pages: &[HotelPage], hotels: &[HotelRecord]) -> Result<String> {
        let html = self.render(INDEX_TEMPLATE, &self.base_context(pages))?;
        Ok(self.substitute(html, hotels))
    }

    pub fn render_detail(
        &self,
        pages: &[HotelPage],
        page: &HotelPage,
        hotel: &HotelRecord,
    ) -> Result<String> {
        let mut context = self.base_context(pages);
        context.insert("hotel", &page.context);
        let html = self.render(DETAIL_TEMPLATE, &context)?;
        Ok(self.substitute(html, std::slice::from_ref(hotel)))
    }

    /// Legacy placeholder pass; a no-op without placeholders or a base URL.
    fn substitute(&self, html: String, hotels: &[HotelRecord]) -> String {
        let base_url = self.links.base_url();
        if self.placeholders.is_empty() || base_url.is_empty() {
            return html;
        }
        hotels
            .iter()
            .fold(html, |html, hotel| self.placeholders.apply(&html, hotel, base_url))
    }
}

/// Files produced by one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub assets: usize,
    pub sitemap: bool,
    pub robots: bool,
}

fn write_page(output: &Path, rel: &Path, html: &str) -> Result<()> {
    let path = output.join(rel);
    write_atomic(&path, html.as_bytes())
        .with_context(|| format!("failed to write `{}`", path.display()))
}

/// Render the whole site into the configured output directory.
pub fn render_site(config: &SiteConfig, hotels: &[HotelRecord]) -> Result<BuildReport> {
    let output: PathBuf = config.paths.output.clone();
    if config.build.clean && output.exists() {
        debug!("build"; "removing {}", output.display());
        fs::remove_dir_all(&output)
            .with_context(|| format!("failed to clean `{}`", output.display()))?;
    }

    let renderer = SiteRenderer::new(config, LinkBuilder::new(config))?;
    let pages = renderer.prepare(hotels)?;
    let mut report = BuildReport::default();

    let index = renderer.links().index();
    write_page(&output, &index.output, &renderer.render_index(&pages, hotels)?)?;
    report.pages += 1;

    for (page, hotel) in pages.iter().zip(hotels) {
        let html = renderer.render_detail(&pages, page, hotel)?;
        write_page(&output, &page.links.output, &html)?;
        debug!("build"; "{} -> {}", hotel.label(), page.links.url);
        report.pages += 1;
    }

    report.assets = assets::copy_static(&config.paths.static_dir, &output)?;

    let base_url = renderer.links().base_url();
    if (config.build.sitemap || config.build.robots) && base_url.is_empty() {
        log!("build"; "no base URL set, skipping sitemap.xml and robots.txt");
    } else {
        if config.build.sitemap {
            sitemap::build_sitemap(&renderer, &pages, &output)?;
            report.sitemap = true;
        }
        if config.build.robots {
            robots::build_robots(&renderer, &pages, &output, config.build.sitemap)?;
            report.robots = true;
        }
    }

    Ok(report)
}
