//! # Waypoint CLI
//!
//! Command-line interface for the Waypoint navigation layer.
//!
//! ## Commands
//!
//! - `waypoint pane` - Print the virtual drives/folders pane
//! - `waypoint resolve <path>` - Resolve a shortcut or virtual directory
//! - `waypoint browse` - Interactive TUI browser with breadcrumb navigation
//! - `waypoint status` - Show configuration and helper availability
//!
//! ## Example Usage
//!
//! ```bash
//! # Show drives and special folders as directory entries
//! waypoint pane
//!
//! # Where does this shortcut really point?
//! waypoint resolve "C:/Users/me/Desktop/projects.lnk"
//!
//! # Browse interactively; click the breadcrumb to jump to an ancestor
//! waypoint browse
//! ```

mod app;
mod commands;
mod tui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Waypoint - drive panes, shortcut resolution, breadcrumb navigation
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the virtual drives/folders pane
    Pane {
        /// Show the raw entry lines with masked metadata included
        #[arg(short, long)]
        raw: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Resolve a shortcut file or virtual directory to its real target
    Resolve {
        /// Path to resolve
        path: PathBuf,

        /// Treat the path as a directory that may contain a marker file
        /// (pre-navigation hook) instead of as a shortcut entry
        #[arg(short, long)]
        dir: bool,

        /// Do not follow shortcuts (prints the path unchanged)
        #[arg(short, long)]
        no_follow: bool,
    },

    /// Start the interactive TUI browser
    #[command(alias = "b")]
    Browse {
        /// Directory to start in (defaults to the current directory)
        path: Option<PathBuf>,
    },

    /// Show configuration and helper availability
    Status,
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => waypoint_core::Config::load_from(path)?,
        None => waypoint_core::Config::load()?,
    };

    // Execute command
    match cli.command {
        Commands::Pane { raw, output } => commands::pane::run(config, raw, output),
        Commands::Resolve {
            path,
            dir,
            no_follow,
        } => commands::resolve::run(config, &path, dir, no_follow),
        Commands::Browse { path } => tui::run(config, path),
        Commands::Status => commands::status::run(config),
    }
}
