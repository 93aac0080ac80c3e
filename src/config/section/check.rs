//! `[check]` section configuration.
//!
//! Extends the built-in project manifest used by `hotelsite check structure`.
//!
//! # Example
//!
//! ```toml
//! [check]
//! dirs = ["static/icons"]
//! files = ["static/css/print.css"]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Extra manifest entries, relative to the project root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}
