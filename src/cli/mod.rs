//! CLI module for Lightkeeper
//!
//! Command-line interface definitions and handlers for the Lightkeeper
//! monitoring dashboard.
//!
//! # Commands
//!
//! - `pages` - Manage monitored pages (list, show, add, edit, toggle, remove)
//! - `run` - Trigger an audit for one page, or for every enabled page
//! - `trends` - Show a page's audit history as charts
//! - `dashboard` - Interactive page-list session
//! - `ping` - Check that the service is reachable
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # List monitored pages
//! lightkeeper pages list
//!
//! # Audit one page now
//! lightkeeper run 6710f0c2a1b2c3d4e5f60718
//!
//! # Point at another service instance
//! LIGHTKEEPER_API_URL=http://audits.internal:8000 lightkeeper trends 6710f0c2a1b2c3d4e5f60718
//! ```

pub mod chart;
pub mod completions;
pub mod config;
pub mod dashboard;
pub mod output;
pub mod pages;
pub mod ping;
pub mod run;
pub mod setup;
pub mod trends;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::model::DeviceType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lightkeeper - website performance monitoring
#[derive(Parser, Debug)]
#[command(
    name = "lightkeeper",
    version,
    about = "Monitor website performance with scheduled Lighthouse audits"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "lightkeeper.toml")]
    pub config: PathBuf,

    /// Override the service base URL
    #[arg(long, global = true, env = "LIGHTKEEPER_API_URL")]
    pub api_url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "LIGHTKEEPER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage monitored pages
    #[command(subcommand)]
    Pages(PagesCommands),
    /// Run an audit now
    Run(RunArgs),
    /// Show audit history charts for a page
    Trends(TrendsArgs),
    /// Interactive dashboard session
    Dashboard,
    /// Check that the service is reachable
    Ping,
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Subcommand, Debug)]
pub enum PagesCommands {
    /// List monitored pages
    List(PagesListArgs),
    /// Show one page
    Show(PagesShowArgs),
    /// Add a page to monitor
    Add(PagesAddArgs),
    /// Change a page's settings
    Edit(PagesEditArgs),
    /// Enable or disable scheduled audits for a page
    Toggle(PageIdArgs),
    /// Stop monitoring a page
    Remove(PagesRemoveArgs),
}

#[derive(Args, Debug)]
pub struct PagesListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PagesShowArgs {
    /// Page ID
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PagesAddArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// URL to audit (e.g., https://example.com/pricing)
    #[arg(short, long)]
    pub url: String,

    /// Environment tag
    #[arg(short, long, default_value = "prod")]
    pub env: String,

    /// Device profile (mobile, desktop)
    #[arg(short, long, default_value = "desktop")]
    pub device: DeviceType,

    /// Expected PSI score
    #[arg(short, long, default_value = "90")]
    pub benchmark: u32,

    /// Tolerated drop below the benchmark, in percent
    #[arg(short, long, default_value = "10")]
    pub threshold: u32,
}

#[derive(Args, Debug)]
pub struct PagesEditArgs {
    /// Page ID
    pub id: String,

    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub url: Option<String>,

    #[arg(short, long)]
    pub env: Option<String>,

    #[arg(short, long)]
    pub device: Option<DeviceType>,

    #[arg(short, long)]
    pub benchmark: Option<u32>,

    #[arg(short, long)]
    pub threshold: Option<u32>,
}

#[derive(Args, Debug)]
pub struct PageIdArgs {
    /// Page ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct PagesRemoveArgs {
    /// Page ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Page ID to audit
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub id: Option<String>,

    /// Audit every enabled page
    #[arg(long)]
    pub all: bool,

    /// With --all, only pages with this URL
    #[arg(long, conflicts_with = "id")]
    pub url: Option<String>,

    /// With --all, only pages with this device profile
    #[arg(long, conflicts_with = "id")]
    pub device: Option<DeviceType>,

    /// With --all, only pages in this environment
    #[arg(long, conflicts_with = "id")]
    pub env: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TrendsArgs {
    /// Page ID
    pub id: String,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Override chart height
    #[arg(long)]
    pub height: Option<usize>,

    /// Override chart width
    #[arg(long)]
    pub width: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "lightkeeper.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
