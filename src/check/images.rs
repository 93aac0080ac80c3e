//! Image checker: do local references resolve to files on disk?

use std::path::PathBuf;

use owo_colors::OwoColorize;

use super::resolve_local;
use crate::config::SiteConfig;
use crate::hotel::HotelRecord;
use crate::utils::path::is_remote_url;

/// A reference whose file is not where it should be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingImage {
    pub hotel: String,
    /// 1-based position of the image among the hotel's references.
    pub index: usize,
    /// Reference as written in the store.
    pub value: String,
    pub expected: PathBuf,
}

/// Counts for one hotel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelImages {
    pub hotel: String,
    pub existing: usize,
    /// Remote references; counted as existing, never verified.
    pub remote: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ImageReport {
    pub hotels: Vec<HotelImages>,
    pub missing: Vec<MissingImage>,
}

impl ImageReport {
    pub fn existing(&self) -> usize {
        self.hotels.iter().map(|h| h.existing + h.remote).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn print(&self, details: bool) {
        for hotel in &self.hotels {
            let status = if hotel.missing == 0 {
                "✓".green().to_string()
            } else {
                "✗".red().to_string()
            };
            let mut line = format!("{} existing, {} missing", hotel.existing, hotel.missing);
            if hotel.remote > 0 {
                line.push_str(&format!(", {} external URL", hotel.remote));
                line.push_str(crate::utils::plural_s(hotel.remote));
            }
            println!("{status} {} {}", hotel.hotel, line.dimmed());
        }

        if !details || self.missing.is_empty() {
            return;
        }
        println!();
        println!("{}", "missing images".red().bold());
        for missing in &self.missing {
            println!(
                "{} {} (image #{}): {}",
                "→".red(),
                missing.hotel,
                missing.index,
                missing.value
            );
            println!("  {} {}", "expected at".dimmed(), missing.expected.display());
        }
    }
}

/// Classify every image reference of every record.
pub fn scan(config: &SiteConfig, hotels: &[HotelRecord]) -> ImageReport {
    let mut report = ImageReport::default();

    for hotel in hotels {
        let mut counts = HotelImages {
            hotel: hotel.label(),
            ..HotelImages::default()
        };

        let refs = hotel.images().map(|set| set.refs()).unwrap_or_default();
        for (position, reference) in refs.into_iter().enumerate() {
            if is_remote_url(&reference.value) {
                counts.remote += 1;
                continue;
            }
            let expected = resolve_local(config, &reference.value);
            if expected.is_file() {
                counts.existing += 1;
            } else {
                counts.missing += 1;
                report.missing.push(MissingImage {
                    hotel: counts.hotel.clone(),
                    index: position + 1,
                    value: reference.value,
                    expected,
                });
            }
        }
        report.hotels.push(counts);
    }
    report
}
