//! Peta - A content compiler for reStructuredText-flavoured sites.

mod build;
mod cli;
mod compiler;
mod config;
mod data;
mod logger;
mod model;
mod parser;
mod utils;

use anyhow::Result;
use build::{build_site, search_site};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Build { .. } => build_site(config).map(|_| ()),
        Commands::Search {
            query,
            category,
            limit,
        } => search_site(config, query, category.as_deref(), *limit),
    }
}

/// Load configuration and validate it for commands that compile content.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;
    if cli.is_build() {
        config.validate()?;
    }
    Ok(config)
}
