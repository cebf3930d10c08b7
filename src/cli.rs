//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// peta content compiler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: peta.toml)
    #[arg(short = 'C', long, default_value = "peta.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile the content tree and write all JSON artifacts
    Build {
        /// Clean output directory completely before writing
        #[arg(long)]
        clean: bool,

        /// Pretty-print JSON output
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        pretty: Option<bool>,
    },

    /// Query the search index written by a previous build
    Search {
        /// Search terms, matched case-insensitively
        query: String,

        /// Only return documents of this category (article, snippet, project, book)
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["peta", "--root", "site", "build", "--clean", "--pretty=false"])
            .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("peta.toml"));
        assert!(matches!(
            cli.command,
            Commands::Build {
                clean: true,
                pretty: Some(false)
            }
        ));
    }

    #[test]
    fn test_is_build() {
        assert!(Cli::try_parse_from(["peta", "build"]).unwrap().is_build());
        assert!(!Cli::try_parse_from(["peta", "search", "x"]).unwrap().is_build());
    }

    #[test]
    fn test_parse_bare_pretty_flag() {
        let cli = Cli::try_parse_from(["peta", "build", "--pretty"]).unwrap();
        assert!(matches!(cli.command, Commands::Build { pretty: Some(true), .. }));
    }

    #[test]
    fn test_parse_search() {
        let cli =
            Cli::try_parse_from(["peta", "-o", "out", "search", "fast fourier", "--category", "snippet"])
                .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        let Commands::Search {
            query,
            category,
            limit,
        } = cli.command
        else {
            panic!("expected search");
        };
        assert_eq!(query, "fast fourier");
        assert_eq!(category.as_deref(), Some("snippet"));
        assert_eq!(limit, 10);
        assert!(Cli::try_parse_from(["peta", "search"]).is_err());
    }
}
