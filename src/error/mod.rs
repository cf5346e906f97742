//! Error handling module for ClipReel

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ClipReel operations.
///
/// Every variant aborts the current run. Per-clip extraction problems use
/// [`ExtractError`] instead so the run can skip the clip and continue.
#[derive(Error, Debug)]
pub enum ReelError {
    /// Required external tool is not installed
    #[error("Required tool not found on PATH: {tool}")]
    ToolNotFound { tool: String },

    /// No stream in the listing matched the requested filter
    #[error("No stream matching {query} for video {video_id}")]
    StreamNotFound { video_id: String, query: String },

    /// Stream listing or download failed
    #[error("Download failed for {video_id}: {message}")]
    Download { video_id: String, message: String },

    /// ffmpeg exited with a failure status
    #[error("ffmpeg failed ({operation}): {stderr}")]
    FfmpegFailed { operation: String, stderr: String },

    /// Trim window cannot be cut from the media
    #[error("Invalid time range: {message}")]
    InvalidTimeRange { message: String },

    /// Segments cannot be joined
    #[error("Concatenation failed: {message}")]
    Concat { message: String },

    /// Media probe error
    #[error("Failed to probe media file {}: {message}", path.display())]
    ProbeError { path: PathBuf, message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// FFmpeg library error
    #[cfg(feature = "libav")]
    #[error("FFmpeg error: {0}")]
    FFmpeg(#[from] ffmpeg_next::Error),
}

/// Result type alias for ClipReel operations
pub type ReelResult<T> = std::result::Result<T, ReelError>;

/// Why a clip page did not yield metadata.
///
/// The orchestrator logs these and moves on to the next clip.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Page answered with a non-success status
    #[error("Failed to fetch page {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Request never produced a response
    #[error("Failed to fetch page {url}: {message}")]
    Request { url: String, message: String },

    /// No `clipConfig` object in the page
    #[error("No clipConfig found in page")]
    MissingClipConfig,

    /// No `videoId` field in the page
    #[error("No videoId found in page")]
    MissingVideoId,

    /// `clipConfig` was present but unusable
    #[error("Malformed clipConfig: {message}")]
    MalformedClipConfig { message: String },
}

impl ReelError {
    /// Build a config error from anything printable
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Build an ffmpeg failure from captured stderr
    pub fn ffmpeg_failed(operation: impl Into<String>, stderr: &[u8]) -> Self {
        Self::FfmpegFailed {
            operation: operation.into(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}
