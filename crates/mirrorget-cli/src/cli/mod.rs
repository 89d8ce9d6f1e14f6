//! CLI for mirrorget.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mirrorget_core::config;
use std::path::PathBuf;

use commands::{run_fetch, run_resolve, run_staging_name, FetchArgs};

/// Top-level CLI for mirrorget.
#[derive(Debug, Parser)]
#[command(name = "mirrorget")]
#[command(about = "Mirror a list of URLs into a host/path directory tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every URL listed in a file (one per line).
    Fetch {
        /// File with one http/https URL per line.
        url_file: PathBuf,
        /// Root of the mirrored tree (default: current directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        /// Staging directory; must be on the same filesystem as the download dir.
        #[arg(long, value_name = "DIR")]
        staging_dir: Option<PathBuf>,
        /// Number of concurrent downloads (default from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Show where URLs would be stored, or why they are rejected. Downloads nothing.
    Resolve {
        /// URLs to check.
        #[arg(required = true)]
        urls: Vec<String>,
        /// Root of the mirrored tree (default: current directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
    },

    /// Print the staging file name used for a URL.
    StagingName {
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                url_file,
                download_dir,
                staging_dir,
                jobs,
            } => {
                let download_dir = match download_dir {
                    Some(d) => d,
                    None => std::env::current_dir()?,
                };
                let args = FetchArgs {
                    url_file,
                    download_dir,
                    staging_dir,
                    jobs,
                };
                run_fetch(&cfg, args).await?;
            }
            CliCommand::Resolve { urls, download_dir } => {
                let download_dir = match download_dir {
                    Some(d) => d,
                    None => std::env::current_dir()?,
                };
                run_resolve(&urls, &download_dir)?;
            }
            CliCommand::StagingName { url } => run_staging_name(&url),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
