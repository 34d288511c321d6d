//! CLI surface: argument parsing and output helpers.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "skr",
    version,
    about = "Route task descriptions to the most relevant agent skills under a bounded read budget"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root containing the skill directories
    #[arg(long, global = true, env = "SKR_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to a skr.toml configuration file
    #[arg(long, global = true, env = "SKR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
