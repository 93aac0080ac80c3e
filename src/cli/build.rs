//! `hotelsite build`: render the static site.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::generator::render_site;
use crate::hotel::store;
use crate::log;
use crate::utils::plural_count;

pub fn build_site(config: &SiteConfig) -> Result<()> {
    let hotels = store::load(&config.paths.data)?;
    let report = render_site(config, &hotels)?;

    let mut extras = Vec::new();
    if report.sitemap {
        extras.push("sitemap.xml");
    }
    if report.robots {
        extras.push("robots.txt");
    }
    let extras = if extras.is_empty() {
        String::new()
    } else {
        format!(", {}", extras.join(", "))
    };

    log!(
        "done";
        "{}, {}{} -> {}",
        plural_count(report.pages, "page"),
        plural_count(report.assets, "static file"),
        extras,
        config.root_relative(&config.paths.output).display()
    );
    Ok(())
}
