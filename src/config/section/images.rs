//! `[images]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [images]
//! max_width_large = 1200   # primary hotel image
//! max_width_medium = 800   # feature and gallery images
//! max_width_small = 400    # thumbnails
//! quality = 85             # lossy WebP quality
//! timeout_secs = 30        # per-download timeout
//! thumbnails = false       # also write <name>_thumb.webp
//! ```

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Accepted WebP quality range.
pub const QUALITY_RANGE: RangeInclusive<u8> = 80..=90;

/// Sizing and encoding parameters handed to the transcoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub max_width_large: u32,
    pub max_width_medium: u32,
    pub max_width_small: u32,
    pub quality: u8,
    pub timeout_secs: u64,
    pub thumbnails: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_width_large: 1200,
            max_width_medium: 800,
            max_width_small: 400,
            quality: 85,
            timeout_secs: 30,
            thumbnails: false,
        }
    }
}

impl ImageConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !QUALITY_RANGE.contains(&self.quality) {
            diag.error(
                "images.quality",
                format!(
                    "{} is outside {}..={}",
                    self.quality,
                    QUALITY_RANGE.start(),
                    QUALITY_RANGE.end()
                ),
            );
        }

        if self.max_width_small == 0 || self.max_width_medium == 0 || self.max_width_large == 0 {
            diag.error("images.max_width_*", "widths must be greater than zero");
        } else if !(self.max_width_small <= self.max_width_medium
            && self.max_width_medium <= self.max_width_large)
        {
            diag.error_with_hint(
                "images.max_width_*",
                "widths are out of order",
                "expected max_width_small <= max_width_medium <= max_width_large",
            );
        }

        if self.timeout_secs == 0 {
            diag.error("images.timeout_secs", "must be greater than zero");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.images, ImageConfig::default());
        assert_eq!(config.images.timeout(), Duration::from_secs(30));

        let mut diag = ConfigDiagnostics::new();
        config.images.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_partial_override() {
        let config = test_parse_config("[images]\nquality = 90\nthumbnails = true");
        assert_eq!(config.images.quality, 90);
        assert!(config.images.thumbnails);
        assert_eq!(config.images.max_width_large, 1200);
    }

    #[test]
    fn test_quality_out_of_range() {
        let config = test_parse_config("[images]\nquality = 100");
        let mut diag = ConfigDiagnostics::new();
        config.images.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, "images.quality");
    }

    #[test]
    fn test_widths_out_of_order() {
        let config = test_parse_config("[images]\nmax_width_small = 900");
        let mut diag = ConfigDiagnostics::new();
        config.images.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
    }
}
