//! Utility modules shared by the pipeline, renderer and checkers.

pub mod date;
pub mod mime;
pub mod path;
mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
