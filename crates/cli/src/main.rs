mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pdx", version, about = "Structural import of markdown notes")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Run one import request and print its response
    Import(ImportArgs),

    /// Answer newline-delimited import requests from stdin using a worker pool
    Serve,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Request file (JSON); reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => {
            cmd::doctor::run(cli.config.as_deref());
            Ok(())
        }
        Commands::Import(args) => cmd::import::run(cli.config.as_deref(), &args),
        Commands::Serve => cmd::serve::run(cli.config.as_deref()),
    }
}
