//! CLI argument definitions.

use clap::Parser;

use crate::commands::Command;

/// Storefront CLI for catalog, cart, order and admin operations.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version = env!("STOREFRONT_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Storefront API base URL (defaults to the stored session's, then localhost)
    #[arg(long, env = "STOREFRONT_API", global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}
