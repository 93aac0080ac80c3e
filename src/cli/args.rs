//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Hotel listing site generator with an image download and WebP pipeline
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: hotelsite.toml)
    #[arg(short = 'C', long, global = true, default_value = "hotelsite.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Download hotel images, convert them to WebP and rewrite the data file
    #[command(visible_alias = "i")]
    Images {
        /// Only process the hotels with these ids
        #[arg(long, value_name = "ID", num_args = 1..)]
        only: Vec<String>,
    },

    /// Render the static site
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve the listing, detail pages and JSON API straight from the data file
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Verify project structure or referenced images
    #[command(visible_alias = "c")]
    Check {
        #[command(subcommand)]
        target: CheckTarget,
    },

    /// Normalize image paths in the data file
    #[command(visible_alias = "f")]
    Fix {
        #[command(flatten)]
        args: FixArgs,
    },
}

/// What `check` verifies.
#[derive(Subcommand, Debug, Clone)]
pub enum CheckTarget {
    /// Expected directories and files exist
    Structure {
        /// Create missing directories without asking
        #[arg(long)]
        create: bool,
    },

    /// Local image references resolve to files on disk
    Images {
        /// List every missing image
        #[arg(short, long)]
        details: bool,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Public base URL of the deployed site.
    ///
    /// The path component is used as prefix for subdirectory deployments:
    ///   hotelsite build --base-url "https://p4blo4p.github.io/hoteles-booking-web-pages"
    #[arg(short = 'U', long = "base-url", env = "BASE_URL", value_hint = clap::ValueHint::Url)]
    pub base_url: Option<String>,

    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Enable robots.txt generation
    #[arg(short = 'R', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub robots: Option<bool>,
}

/// Fix command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct FixArgs {
    /// Drop references to images that do not exist on disk
    #[arg(short, long)]
    pub prune: bool,

    /// Report changes without writing the data file
    #[arg(short, long)]
    pub dry: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from([
            "hotelsite",
            "build",
            "--base-url",
            "https://x.github.io/hoteles",
            "--sitemap=false",
            "--clean",
        ]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(
            build_args.base_url.as_deref(),
            Some("https://x.github.io/hoteles")
        );
        assert_eq!(build_args.sitemap, Some(false));
        assert_eq!(build_args.robots, None);
        assert!(build_args.clean);
    }

    #[test]
    fn test_parse_check_and_globals() {
        let cli = Cli::parse_from(["hotelsite", "check", "images", "--details", "-v", "-C", "x.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert!(matches!(
            cli.command,
            Commands::Check {
                target: CheckTarget::Images { details: true }
            }
        ));
    }

    #[test]
    fn test_parse_images_only() {
        let cli = Cli::parse_from(["hotelsite", "images", "--only", "a", "b"]);
        let Commands::Images { only } = cli.command else {
            panic!("expected images");
        };
        assert_eq!(only, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
