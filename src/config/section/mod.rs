//! Configuration section definitions.
//!
//! Each module corresponds to a section in `hotelsite.toml`:
//!
//! | Module   | TOML Section | Purpose                                    |
//! |----------|--------------|--------------------------------------------|
//! | `site`   | `[site]`     | Public base URL                            |
//! | `paths`  | `[paths]`    | Data file, templates, static, output       |
//! | `images` | `[images]`   | Image widths, WebP quality, fetch timeout  |
//! | `build`  | `[build]`    | URL layout, sitemap/robots, placeholders   |
//! | `serve`  | `[serve]`    | Read-only web service                      |
//! | `check`  | `[check]`    | Extra structure-manifest entries           |

mod build;
mod check;
mod images;
mod paths;
mod serve;
mod site;

pub use build::{BuildSectionConfig, PlaceholderConfig};
pub use check::CheckConfig;
pub use images::ImageConfig;
pub use paths::{PathsConfig, STATIC_SITE_DIR};
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
