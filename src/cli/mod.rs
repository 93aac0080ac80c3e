//! Command-line interface module.

mod args;
pub mod build;
pub mod check;
pub mod fix;
pub mod images;
mod prompt;
pub mod serve;

pub use args::{BuildArgs, CheckTarget, Cli, Commands, FixArgs};
