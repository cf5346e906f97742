//! ClipReel Library
//!
//! Builds a highlight compilation from short clip pages. For every clip the
//! source video id and time window are scraped from the page, the source's
//! video-only and audio-only streams are downloaded, trimmed with a small
//! audio sync offset and remuxed into a segment. The segments are then
//! concatenated, in input order, into one file.
//!
//! The stages sit behind the traits in [`ports`] and are wired together by
//! [`app::CompileInteractor`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::model::{
    CleanupPolicy, ClipMetadata, ClipReference, Compilation, MediaAsset, MediaInfo, RunReport,
    SegmentClip, TrimWindow, DEFAULT_SYNC_OFFSET,
};
pub use error::{ExtractError, ReelError, ReelResult};
