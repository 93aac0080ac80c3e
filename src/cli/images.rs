//! `hotelsite images`: fetch, transcode and re-path every hotel image.

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::hotel::store;
use crate::image::{HttpFetcher, Pipeline};
use crate::log;
use crate::utils::plural_count;

/// Run the image pipeline and save the store once at the end.
pub fn run_images(config: &SiteConfig, only: &[String]) -> Result<()> {
    let data = &config.paths.data;
    let mut hotels = store::load(data)?;
    log!(
        "images";
        "{} in {}",
        plural_count(hotels.len(), "hotel"),
        config.root_relative(data).display()
    );

    let fetcher =
        HttpFetcher::new(config.images.timeout()).context("failed to set up image downloads")?;
    let summary = Pipeline::new(config, &fetcher).run(&mut hotels, only);

    store::save(data, &hotels)?;
    log!("done"; "{}", summary);
    Ok(())
}
