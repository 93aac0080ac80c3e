//! Path and URL utilities.
//!
//! - [`fs`]: filesystem helpers (atomic writes, normalization)
//! - [`route`]: reference classification and asset-path normalization

pub mod fs;
pub mod route;

pub use fs::{normalize_path, write_atomic};
pub use route::{is_remote_url, to_site_path};
