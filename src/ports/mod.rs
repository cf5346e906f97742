// Ports - Interface definitions (contracts)

use async_trait::async_trait;
use std::path::Path;

use crate::domain::model::*;
use crate::error::{ExtractError, ReelResult};

/// Port for recovering clip metadata from a clip page.
///
/// Page formats change without notice, so the scraping strategy sits behind
/// this trait and can be swapped without touching the pipeline.
#[async_trait]
pub trait ClipExtractor: Send + Sync {
    /// Extract source video id and trim window for a clip.
    ///
    /// An `Err` means "no metadata for this clip"; callers skip the clip.
    async fn extract(&self, clip: &ClipReference) -> Result<ClipMetadata, ExtractError>;
}

/// Port for downloading the untrimmed tracks of a source video
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Download a video-only and an audio-only stream into `output_dir`
    async fn fetch(&self, source_video_id: &str, output_dir: &Path) -> ReelResult<MediaAsset>;
}

/// Port for trimming, remuxing and joining segments
#[async_trait]
pub trait SegmentAssembler: Send + Sync {
    /// Cut `window` out of the asset, attach the audio and encode to `output_path`
    async fn trim_and_merge(
        &self,
        asset: &MediaAsset,
        window: &TrimWindow,
        output_path: &Path,
    ) -> ReelResult<SegmentClip>;

    /// Join segments in order into `output_path`.
    ///
    /// Returns `Ok(None)` without writing anything when `segments` is empty.
    async fn concatenate(
        &self,
        segments: &[SegmentClip],
        output_path: &Path,
    ) -> ReelResult<Option<Compilation>>;
}

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe media file and return its duration and first streams
    async fn probe_media(&self, file_path: &Path) -> ReelResult<MediaInfo>;
}
