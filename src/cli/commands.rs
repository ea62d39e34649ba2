//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ajar listings browser
#[derive(Parser, Debug)]
#[command(name = "ajar-listings")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, conflicts_with = "fixture")]
    pub base_url: Option<String>,

    /// Serve listings from a JSON fixture instead of the backend
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Page through the listings of a category
    Browse {
        /// Category to browse (omit for all listings)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Stop after this many pages (default: until exhausted)
        #[arg(long)]
        pages: Option<u32>,

        /// Records per page (overrides the config file)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Show one listing
    Show {
        /// Listing id
        id: u64,
    },

    /// Maintain a wishlist file
    Wishlist {
        /// Wishlist file
        #[arg(long, default_value = "wishlist.json")]
        file: PathBuf,

        #[command(subcommand)]
        action: WishlistAction,
    },

    /// Print the effective configuration
    Config,
}

/// Wishlist subcommands
#[derive(Subcommand, Debug)]
pub enum WishlistAction {
    /// Save a listing
    Add {
        /// Listing id
        id: u64,
    },
    /// Remove a listing
    Remove {
        /// Listing id
        id: u64,
    },
    /// List saved listings grouped by category
    List,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
