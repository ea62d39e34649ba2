//! CLI module
//!
//! Command-line interface for browsing listings.
//!
//! # Commands
//!
//! - `browse` - Page through a category
//! - `show` - Print one listing
//! - `wishlist` - Add, remove or list saved listings
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, WishlistAction};
pub use runner::Runner;
