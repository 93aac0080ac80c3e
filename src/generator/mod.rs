//! Static site generation from the Hotel Record Store.
//!
//! - [`site`]: Tera environment, index and detail pages
//! - [`links`]: output paths and URLs derived from slugs
//! - [`filters`]: the `asset` template filter
//! - [`placeholder`]: legacy sample-image substitution
//! - [`assets`]: static directory copy
//! - [`sitemap`], [`robots`]: crawler documents

pub mod assets;
pub mod filters;
pub mod links;
pub mod placeholder;
pub mod robots;
pub mod site;
pub mod sitemap;

pub use site::{SiteRenderer, render_site};
