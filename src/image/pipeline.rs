//! Image pipeline over the record collection.
//!
//! Strictly sequential: record by record, reference by reference. Per-image
//! failures are logged and counted; they never abort the run.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use super::fetch::{Fetch, fetch_bytes};
use super::rewrite::{Outcome, rewrite};
use super::transcode::{self, TranscodeError};
use crate::config::SiteConfig;
use crate::hotel::{HotelRecord, ImageRef};
use crate::logger::ProgressLine;
use crate::utils::path::is_remote_url;
use crate::{debug, log};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub hotels: usize,
    pub converted: usize,
    /// Local references left as they were.
    pub kept: usize,
    pub failed: usize,
    pub thumbnails: usize,
}

impl Summary {
    fn add(&mut self, other: Self) {
        self.hotels += other.hotels;
        self.converted += other.converted;
        self.kept += other.kept;
        self.failed += other.failed;
        self.thumbnails += other.thumbnails;
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} converted, {} kept, {} failed",
            crate::utils::plural_count(self.hotels, "hotel"),
            self.converted,
            self.kept,
            self.failed
        )?;
        if self.thumbnails > 0 {
            write!(f, ", {} thumbnails", self.thumbnails)?;
        }
        Ok(())
    }
}

/// Fetch → transcode → rewrite, configured once per run.
pub struct Pipeline<'a> {
    config: &'a SiteConfig,
    fetcher: &'a dyn Fetch,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a SiteConfig, fetcher: &'a dyn Fetch) -> Self {
        Self { config, fetcher }
    }

    /// Process every record, or only those whose id/slug is in `only`.
    ///
    /// A record whose slug was already taken by an earlier record is skipped:
    /// both would write into the same directory.
    pub fn run(&self, hotels: &mut [HotelRecord], only: &[String]) -> Summary {
        let shared = shared_slugs(hotels);
        let selected: Vec<usize> = hotels
            .iter()
            .enumerate()
            .filter(|(pos, hotel)| only.is_empty() || only.iter().any(|key| hotel.matches(key, *pos)))
            .map(|(pos, _)| pos)
            .filter(|pos| {
                let skip = shared.contains(pos);
                if skip {
                    let hotel = &hotels[*pos];
                    log!(
                        "error";
                        "{}: slug `{}` is already used by another hotel, skipped",
                        hotel.label(),
                        hotel.slug(*pos)
                    );
                }
                !skip
            })
            .collect();

        for key in only {
            if !hotels.iter().enumerate().any(|(pos, h)| h.matches(key, pos)) {
                log!("warning"; "no hotel with id `{}`", key);
            }
        }

        let remote = selected
            .iter()
            .filter_map(|&pos| hotels[pos].images())
            .flat_map(|images| images.refs())
            .filter(|r| is_remote_url(&r.value))
            .count();

        let progress = ProgressLine::new(&[("hotels", selected.len()), ("images", remote)]);
        let mut summary = Summary::default();
        for pos in selected {
            summary.add(self.process_record(&mut hotels[pos], pos, Some(&progress)));
            progress.inc("hotels");
        }
        progress.finish();

        summary
    }

    /// Process one record in place. `position` is its 0-based store index.
    pub fn process_record(
        &self,
        hotel: &mut HotelRecord,
        position: usize,
        progress: Option<&ProgressLine>,
    ) -> Summary {
        let mut summary = Summary {
            hotels: 1,
            ..Summary::default()
        };

        let slug = hotel.slug(position);
        let Some(images) = hotel.images() else {
            debug!("images"; "{} ({}): no images", hotel.label(), slug);
            return summary;
        };
        debug!("images"; "{} ({})", hotel.label(), slug);

        let dir = self.config.hotel_assets_dir(&slug);
        let prefix = self.config.paths.assets_prefix();

        let mut outcomes = HashMap::new();
        for reference in images.refs() {
            if !is_remote_url(&reference.value) {
                summary.kept += 1;
                continue;
            }

            let stem = reference.key.file_stem();
            let outcome = match self.convert(&reference, &dir.join(format!("{stem}.webp"))) {
                Some(thumbnail) => {
                    summary.converted += 1;
                    summary.thumbnails += usize::from(thumbnail);
                    Outcome::Converted(format!("{prefix}/{slug}/{stem}.webp"))
                }
                None => {
                    summary.failed += 1;
                    Outcome::Failed
                }
            };
            outcomes.insert(reference.key, outcome);

            if let Some(progress) = progress {
                progress.inc("images");
            }
        }

        if !outcomes.is_empty() {
            hotel.set_images(rewrite(images, &outcomes));
        }
        summary
    }

    /// Download and write one image (plus its thumbnail when enabled).
    ///
    /// Returns `None` on failure, otherwise whether a thumbnail was written.
    fn convert(&self, reference: &ImageRef, dest: &Path) -> Option<bool> {
        let url = &reference.value;
        let bytes = fetch_bytes(self.fetcher, url)?;

        let images = &self.config.images;
        let max_width = reference.key.slot.max_width(images);
        let result = transcode::decode(&bytes)
            .and_then(|img| transcode::write_webp(&img, max_width, images, dest).map(|out| (img, out)));

        let (img, out) = match result {
            Ok(done) => done,
            Err(err) => {
                log_transcode_error(url, err);
                return None;
            }
        };
        debug!(
            "images";
            "{} -> {} ({}x{}, {} bytes)",
            url,
            self.config.root_relative(dest).display(),
            out.width,
            out.height,
            out.bytes
        );

        if !images.thumbnails {
            return Some(false);
        }
        let thumb = dest.with_file_name(format!("{}_thumb.webp", reference.key.file_stem()));
        match transcode::write_webp(&img, images.max_width_small, images, &thumb) {
            Ok(_) => Some(true),
            Err(err) => {
                log_transcode_error(url, err);
                Some(false)
            }
        }
    }
}

/// Positions of records whose slug repeats an earlier record's.
fn shared_slugs(hotels: &[HotelRecord]) -> HashSet<usize> {
    let mut seen = HashSet::new();
    hotels
        .iter()
        .enumerate()
        .filter(|(pos, hotel)| !seen.insert(hotel.slug(*pos)))
        .map(|(pos, _)| pos)
        .collect()
}

fn log_transcode_error(url: &str, err: TranscodeError) {
    log!("error"; "convert {}: {:#}", url, anyhow::Error::new(err));
}
