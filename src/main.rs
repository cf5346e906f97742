//! ClipReel
//!
//! Builds a highlight compilation from short clip pages.
//!
//! # Usage
//!
//! ```bash
//! clipreel compile --urls-file kova_clips.txt --final-name kova_highlights.mp4
//! clipreel inspect "https://www.youtube.com/clip/Ugkx..."
//! clipreel verify --input downloads/final_compilation.mp4 --duration 42.5
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use clipreel::cli::{commands, Cli, Commands};
use clipreel::utils::logging::{LogFormat, LoggingConfig, LoggingSystem};

/// Main entry point for the ClipReel CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: cli.log_level.parse()?,
        format: if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
    };
    LoggingSystem::new(logging).initialize()?;

    info!("Starting ClipReel v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Compile(args) => {
            info!("Executing compile command");
            commands::compile(args).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(args).await?;
        }
        Commands::Verify(args) => {
            info!("Executing verify command");
            commands::verify(args).await?;
        }
    }

    info!("ClipReel completed successfully");
    Ok(())
}
