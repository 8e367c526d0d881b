//! pagesmith CLI - assembles page fragments into a static site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pagesmith")]
#[command(about = "Wraps page fragments with shared partials into standalone HTML")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to pagesmith.toml config file
    #[arg(short, long, default_value = "pagesmith.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble every page and the root index
    Build {
        /// Content root (defaults to config or ".")
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Reference page supplying shared partials
        #[arg(long)]
        reference: Option<PathBuf>,
    },

    /// List the pages a build would assemble
    Pages {
        /// Content root (defaults to config or ".")
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Write a default config and partials directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Build { root, reference } => {
            commands::build::run(&cli.config, root, reference)?;
        }
        Commands::Pages { root } => {
            commands::pages::run(&cli.config, root)?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
    }

    Ok(())
}
