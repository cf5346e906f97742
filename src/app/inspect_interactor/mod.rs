// Inspect interactor - Runs only the extraction stage for one clip

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::domain::model::*;
use crate::error::ExtractError;
use crate::ports::ClipExtractor;
use crate::utils::path::segment_file_name;

/// What a compile run would do with one clip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub clip_url: String,
    pub metadata: ClipMetadata,
    /// Video cut `[start, end)` in seconds
    pub video_range: TimeRange,
    /// Audio cut after the sync offset
    pub audio_range: TimeRange,
    /// File name the segment would get
    pub segment_file: String,
}

/// Interactor for clip page inspection
pub struct InspectInteractor {
    extractor: Arc<dyn ClipExtractor>,
    sync_offset: f64,
}

impl InspectInteractor {
    pub fn new(extractor: Arc<dyn ClipExtractor>, sync_offset: f64) -> Self {
        Self {
            extractor,
            sync_offset,
        }
    }

    /// Extract metadata for `clip` without downloading anything
    pub async fn execute(&self, clip: &ClipReference) -> Result<InspectReport, ExtractError> {
        info!("Inspecting clip page: {}", clip);
        let metadata = self.extractor.extract(clip).await?;
        let window = metadata.window();

        Ok(InspectReport {
            clip_url: clip.to_string(),
            video_range: window.video_range(),
            audio_range: window.audio_range(self.sync_offset),
            segment_file: segment_file_name(
                &metadata.source_video_id,
                metadata.start_time_seconds,
            ),
            metadata,
        })
    }
}

impl InspectReport {
    /// Human-readable summary
    pub fn summary(&self) -> String {
        use crate::utils::time::format_time;

        let mut out = String::new();
        out.push_str(&format!("Clip:         {}\n", self.clip_url));
        out.push_str(&format!("Source video: {}\n", self.metadata.source_video_id));
        out.push_str(&format!(
            "Start:        {} ({:.3}s)\n",
            format_time(self.metadata.start_time_seconds),
            self.metadata.start_time_seconds
        ));
        out.push_str(&format!(
            "End:          {} ({:.3}s)\n",
            format_time(self.metadata.end_time_seconds()),
            self.metadata.end_time_seconds()
        ));
        out.push_str(&format!("Duration:     {:.3}s\n", self.metadata.duration_seconds));
        out.push_str(&format!("Video cut:    {}\n", self.video_range));
        out.push_str(&format!("Audio cut:    {}\n", self.audio_range));
        out.push_str(&format!("Segment file: {}", self.segment_file));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedExtractor;

    #[async_trait]
    impl ClipExtractor for FixedExtractor {
        async fn extract(&self, _clip: &ClipReference) -> Result<ClipMetadata, ExtractError> {
            Ok(ClipMetadata::from_millis("abc123", 10_000, 15_000))
        }
    }

    #[tokio::test]
    async fn test_inspect_report() {
        let interactor = InspectInteractor::new(Arc::new(FixedExtractor), 0.25);
        let report = interactor
            .execute(&ClipReference::new("https://example.com/clip/x"))
            .await
            .unwrap();

        assert_eq!(report.segment_file, "clip_abc123_10.0.mp4");
        assert_eq!(report.video_range.end, 15.0);
        assert_eq!(report.audio_range.start, 10.25);

        let summary = report.summary();
        assert!(summary.contains("abc123"));
        assert!(summary.contains("00:10.000"));
        assert!(summary.contains("Duration:     5.000s"));
    }
}
