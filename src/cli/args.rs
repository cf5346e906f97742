//! Command-line argument definitions

use clap::Args;
use std::path::PathBuf;

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Clip page URLs, processed in order
    pub urls: Vec<String>,

    /// File with one clip URL per line; appended after positional URLs
    #[arg(short = 'f', long, env = "CLIPREEL_URLS_FILE")]
    pub urls_file: Option<PathBuf>,

    /// Directory for downloads, segments and the compilation
    #[arg(short, long, env = "CLIPREEL_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name of the compilation
    #[arg(short = 'n', long, env = "CLIPREEL_FINAL_NAME")]
    pub final_name: Option<String>,

    /// Forward audio shift in seconds
    #[arg(long, env = "CLIPREEL_SYNC_OFFSET")]
    pub sync_offset: Option<f64>,

    /// Exact video stream resolution, e.g. 1080p
    #[arg(long, env = "CLIPREEL_RESOLUTION")]
    pub resolution: Option<String>,

    /// Container of the video stream to download
    #[arg(long, env = "CLIPREEL_CONTAINER")]
    pub container: Option<String>,

    /// Video codec used for encoding
    #[arg(long, env = "CLIPREEL_CODEC")]
    pub codec: Option<String>,

    /// Encoder thread count
    #[arg(long, env = "CLIPREEL_THREADS")]
    pub threads: Option<usize>,

    /// What to do with segment files afterwards (keep, delete)
    #[arg(long, env = "CLIPREEL_CLEANUP")]
    pub cleanup: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "CLIPREEL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Clip page URL
    pub clip_url: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// TOML config file
    #[arg(short, long, env = "CLIPREEL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// File to check
    #[arg(short, long)]
    pub input: PathBuf,

    /// Expected duration in seconds
    #[arg(short, long)]
    pub duration: f64,

    /// Allowed drift in seconds, on top of one frame
    #[arg(short, long, default_value_t = 0.1)]
    pub tolerance: f64,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// TOML config file
    #[arg(short, long, env = "CLIPREEL_CONFIG")]
    pub config: Option<PathBuf>,
}
