//! Image pipeline: download, convert to WebP, rewrite record paths.
//!
//! # Modules
//!
//! - [`fetch`]: blocking HTTP download behind the [`fetch::Fetch`] trait
//! - [`transcode`]: decode, flatten, downscale and encode lossy WebP
//! - [`rewrite`]: point a record's image fields at the converted files
//! - [`pipeline`]: drives the three over the record collection

pub mod fetch;
pub mod pipeline;
pub mod rewrite;
pub mod transcode;

pub use fetch::HttpFetcher;
pub use pipeline::Pipeline;
