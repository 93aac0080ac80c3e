//! Path normalizer for the record store.
//!
//! Local references get duplicate slashes collapsed and a leading `/`. Image
//! references are additionally moved under the canonical assets prefix:
//! `/<prefix>/<slug>/<file>`. Remote URLs are left alone.

use serde_json::Value;

use super::reference_exists;
use crate::config::SiteConfig;
use crate::hotel::HotelRecord;
use crate::utils::path::is_remote_url;
use crate::utils::path::route::{collapse_slashes, file_name};

/// What a fix pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixReport {
    /// Records with at least one changed value.
    pub changed: usize,
    /// Image references removed by `--prune`.
    pub pruned: usize,
}

/// Collapse `//` and force a leading `/`.
pub fn normalize_local(value: &str) -> String {
    let collapsed = collapse_slashes(value.trim());
    if collapsed.starts_with('/') {
        collapsed
    } else {
        format!("/{collapsed}")
    }
}

/// Canonical site path of a local image reference.
pub fn canonical_image(value: &str, prefix: &str, slug: &str) -> String {
    let normalized = normalize_local(value);
    let marker = format!("/{prefix}/");
    match normalized.find(&marker) {
        Some(start) => normalized[start..].to_owned(),
        None => format!("/{prefix}/{slug}/{}", file_name(&normalized)),
    }
}

/// Normalize a non-image reference in place. Returns whether it changed.
fn fix_plain(value: Option<&mut Value>) -> bool {
    let Some(Value::String(s)) = value else {
        return false;
    };
    if s.trim().is_empty() || is_remote_url(s) {
        return false;
    }
    let fixed = normalize_local(s);
    if fixed == *s {
        return false;
    }
    *s = fixed;
    true
}

/// Fix one record in place. Returns the number of pruned references.
pub fn fix_record(
    config: &SiteConfig,
    hotel: &mut HotelRecord,
    position: usize,
    prune: bool,
) -> usize {
    let prefix = config.paths.assets_prefix();
    let slug = hotel.slug(position);
    let label = hotel.label();
    let mut pruned = 0;

    if let Some(images) = hotel.images() {
        let fixed = images.map_refs(|reference| {
            let value = &reference.value;
            if is_remote_url(value) || value.trim().is_empty() {
                return Some(value.clone());
            }
            let canonical = canonical_image(value, prefix, &slug);
            if prune && !reference_exists(config, &canonical) {
                crate::debug!("fix"; "{}: pruning {}", label, value);
                pruned += 1;
                return None;
            }
            Some(canonical)
        });
        hotel.set_images(fixed);
    }

    fix_plain(hotel.get_mut("logo"));
    if let Some(Value::Array(amenities)) = hotel.get_mut("amenities") {
        for amenity in amenities {
            if let Value::Object(map) = amenity {
                fix_plain(map.get_mut("icon"));
            }
        }
    }
    pruned
}

/// Fix every record, counting those that changed.
pub fn fix_all(config: &SiteConfig, hotels: &mut [HotelRecord], prune: bool) -> FixReport {
    let mut report = FixReport::default();
    for (position, hotel) in hotels.iter_mut().enumerate() {
        let before = hotel.clone();
        report.pruned += fix_record(config, hotel, position, prune);
        if *hotel != before {
            crate::debug!("fix"; "{}", hotel.label());
            report.changed += 1;
        }
    }
    report
}
