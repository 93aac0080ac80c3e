//! Site configuration management for `hotelsite.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # One file per TOML section
//! ├── error.rs       # ConfigError, ConfigDiagnostics
//! ├── util.rs        # Config file discovery, URL helpers
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[site]`   | Public base URL                                |
//! | `[paths]`  | Data file, templates, static, output, prefix   |
//! | `[images]` | Widths, WebP quality, fetch timeout            |
//! | `[build]`  | URL layout, sitemap/robots, placeholders       |
//! | `[serve]`  | Read-only web service                          |
//! | `[check]`  | Extra structure-manifest entries               |
//!
//! Every section is optional. Without a config file the current directory is
//! the project root and all defaults apply.

mod error;
pub mod section;
pub(crate) mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{
    BuildSectionConfig, CheckConfig, ImageConfig, PathsConfig, PlaceholderConfig, ServeConfig,
    SiteSectionConfig,
};

use util::find_config_file;

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "hotelsite.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing hotelsite.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub images: ImageConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no file is found.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, root) = match find_config_file(&cli.config) {
            Some(path) => {
                let config = Self::from_path(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                (config, root)
            }
            None if cli.config.as_os_str() != CONFIG_FILE => {
                bail!(ConfigError::Io(
                    cli.config.clone(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
                ));
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                (Self::default(), cwd)
            }
        };

        config.finalize(&root, cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Resolve paths and apply command-line overrides.
    fn finalize(&mut self, root: &Path, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        self.root = crate::utils::path::normalize_path(root);
        self.paths.normalize(&self.root);
        self.apply_command_options(cli);
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Images { .. } | Commands::Check { .. } | Commands::Fix { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        // `--base-url` (or BASE_URL) wins over the file
        Self::update_option(&mut self.site.base_url, args.base_url.as_ref());
        Self::update_option(&mut self.build.sitemap, args.sitemap.as_ref());
        Self::update_option(&mut self.build.robots, args.robots.as_ref());
        self.build.clean = args.clean;
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.paths.validate(&mut diag);
        self.images.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    // ========================================================================
    // accessors
    // ========================================================================

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Directory that holds the downloaded images of one hotel.
    pub fn hotel_assets_dir(&self, slug: &str) -> PathBuf {
        self.paths
            .site_path_to_file(&self.root, self.paths.assets_prefix())
            .join(slug)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Config rooted at `root` with default paths resolved against it.
#[cfg(test)]
pub fn test_config_at(root: &Path, extra: &str) -> SiteConfig {
    let mut config = test_parse_config(extra);
    config.root = root.to_path_buf();
    config.paths.normalize(root);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) =
            SiteConfig::parse_with_ignored("[images]\nquality = 82\nsharpen = true\n[extra]\nx = 1")
                .unwrap();
        assert_eq!(config.images.quality, 82);
        assert_eq!(ignored.len(), 2);
        assert!(ignored.contains(&"images.sharpen".to_string()));
        assert!(ignored.contains(&"extra".to_string()));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SiteConfig::parse_with_ignored("[images\nquality = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_validate_collects_all_sections() {
        let config = test_parse_config(
            "[site]\nbase_url = \"nope\"\n[images]\nquality = 50\n[paths]\nassets_prefix = \"img\"",
        );
        let err = config.validate().unwrap_err();
        let ConfigError::Diagnostics(diag) = err.downcast::<ConfigError>().unwrap() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.errors().len(), 3);
    }

    #[test]
    fn test_build_args_override() {
        let mut config = test_parse_config("[site]\nbase_url = \"https://a.example\"\n[build]\nsitemap = true");
        let cli = Cli::parse_from([
            "hotelsite",
            "build",
            "--base-url",
            "https://b.example/hoteles",
            "--sitemap=false",
            "--clean",
        ]);
        config.apply_command_options(&cli);

        assert_eq!(config.site.base_url(), "https://b.example/hoteles");
        assert!(!config.build.sitemap);
        assert!(config.build.robots);
        assert!(config.build.clean);
    }

    #[test]
    fn test_serve_args_override() {
        let mut config = test_parse_config("[serve]\nport = 8000");
        let cli = Cli::parse_from(["hotelsite", "serve", "--port", "9000"]);
        config.apply_command_options(&cli);
        assert_eq!(config.serve.port, 9000);
    }

    #[test]
    fn test_paths_resolved_against_root() {
        let temp = TempDir::new().unwrap();
        let config = test_config_at(temp.path(), "[paths]\noutput = \"public\"");

        assert_eq!(config.paths.output, temp.path().join("public"));
        assert_eq!(config.paths.data, temp.path().join("data/hotels.json"));
        assert_eq!(
            config.hotel_assets_dir("hotel-test"),
            temp.path().join("static/images/hotels/hotel-test")
        );
        assert_eq!(
            config.root_relative(temp.path().join("dist/index.html")),
            PathBuf::from("dist/index.html")
        );
    }
}
