//! startlog - Entry Point
//!
//! Loads configuration, installs logging and starts a host whose startup log
//! is replayed once composition has finished.

use clap::Parser;
use startlog::{RunOptions, run};

/// Command line interface for startlog
#[derive(Parser, Debug)]
#[command(name = "startlog")]
#[command(about = "Deferred startup logging replayed when the host starts")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Category for startup records that do not name one
    #[arg(long)]
    pub category: Option<String>,

    /// Keep running until Ctrl-C
    #[arg(long)]
    pub wait: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(RunOptions {
        config: cli.config,
        category: cli.category,
        wait: cli.wait,
    })
    .await?;
    Ok(())
}
