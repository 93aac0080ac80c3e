//! hotelsite - static site generator and image pipeline for hotel listings.

mod check;
mod cli;
mod config;
mod generator;
mod hotel;
mod image;
mod logger;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    let success = match &cli.command {
        Commands::Images { only } => cli::images::run_images(&config, only).map(|()| true),
        Commands::Build { .. } => cli::build::build_site(&config).map(|()| true),
        Commands::Serve { .. } => cli::serve::serve_site(&config).map(|()| true),
        Commands::Check { target } => cli::check::run_check(&config, target),
        Commands::Fix { args } => cli::fix::fix_paths(&config, args).map(|()| true),
    }?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
