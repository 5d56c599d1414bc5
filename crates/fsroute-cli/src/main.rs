mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fsroute")]
#[command(version, about = "Inspect and resolve directory-derived routes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every routable pattern under a directory
    Routes {
        /// Routes directory
        dir: PathBuf,

        /// TOML file with [[rules]] (default: app-router conventions)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Resolve request paths against a directory
    Match {
        /// Routes directory
        dir: PathBuf,

        /// Request paths to resolve
        #[arg(required = true)]
        paths: Vec<String>,

        /// TOML file with [[rules]] (default: app-router conventions)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Rebuild the route tree whenever the directory changes
    Watch {
        /// Routes directory
        dir: PathBuf,

        /// TOML file with [[rules]] (default: app-router conventions)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Routes { dir, config } => {
            commands::routes::execute(&dir, config.as_deref())?;
        }
        Commands::Match { dir, paths, config } => {
            let unmatched = commands::resolve::execute(&dir, &paths, config.as_deref())?;
            if unmatched > 0 {
                std::process::exit(1);
            }
        }
        Commands::Watch { dir, config } => {
            commands::watch::execute(&dir, config.as_deref())?;
        }
    }

    Ok(())
}
