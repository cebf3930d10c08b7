//! Site configuration management for `peta.toml`.
//!
//! # Sections
//!
//! | Section            | Purpose                                     |
//! |--------------------|---------------------------------------------|
//! | `[base]`           | Site metadata (title, url)                  |
//! | `[build]`          | Paths, extensions, artifact settings        |
//! | `[build.resolve]`  | Snippet reference matching                  |
//! | `[build.recent]`   | `recent.json` size                          |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Notes"
//! url = "https://notes.example.com"
//!
//! [build]
//! content = "content"
//! output = "data"
//! chunk_size = 1000
//!
//! [build.resolve]
//! fuzzy = true
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod paths;

pub use error::ConfigError;
pub use paths::PathResolver;

pub use base::BaseConfig;
pub use build::{BuildConfig, RecentConfig, ResolveConfig};

use crate::cli::{Cli, Commands};
use crate::log;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing peta.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load `peta.toml` under the CLI root, falling back to defaults when the
    /// file does not exist, then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            log!("config"; "no {} found, using defaults", cli.config.display());
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf());
    }

    /// Path resolver for artifacts and URLs.
    pub fn paths(&self) -> PathResolver<'_> {
        PathResolver::new(
            &self.build.output,
            &self.build.path_prefix,
            self.base.url.as_deref(),
        )
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        if let Commands::Build { clean, pretty } = &cli.command {
            self.build.clean |= *clean;
            Self::update_option(&mut self.build.pretty, pretty.as_ref());
        }

        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before a build.
    pub fn validate(&self) -> Result<()> {
        if self.build.chunk_size == 0 {
            bail!(ConfigError::Validation(
                "[build.chunk_size] must be greater than 0".into()
            ));
        }

        if self.build.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "[build.extensions] must have at least one element".into()
            ));
        }

        if !self.build.content.is_dir() {
            bail!(ConfigError::Validation(format!(
                "content directory `{}` not found",
                self.build.content.display()
            )));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
