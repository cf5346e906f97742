//! CLI module for ClipReel
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{CompileArgs, InspectArgs, VerifyArgs};

/// ClipReel
///
/// Turns a list of clip pages into one highlight compilation: each clip's
/// source video is downloaded, trimmed to the clip window and the segments
/// are joined in order.
#[derive(Parser, Debug)]
#[command(name = "clipreel")]
#[command(about = "ClipReel - Build a highlight compilation from clip pages")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info", global = true, env = "CLIPREEL_LOG_LEVEL")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download, trim and concatenate clips into one file
    Compile(args::CompileArgs),
    /// Show the metadata recovered from a clip page
    Inspect(args::InspectArgs),
    /// Check a written file against its expected duration
    Verify(args::VerifyArgs),
}
