// Domain models - Core types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ReelError;

#[cfg(test)]
mod tests;

/// Audio is cut this far after the video start to line the tracks up.
///
/// The value was tuned by eye against downloaded streams, not measured from
/// the source. Different sources may need a different value, which is why
/// it is also exposed as `sync_offset` in the configuration.
pub const DEFAULT_SYNC_OFFSET: f64 = 0.25;

/// Clip page URL supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipReference(String);

impl ClipReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source video and time window recovered from a clip page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMetadata {
    pub source_video_id: String,
    pub start_time_seconds: f64,
    pub duration_seconds: f64,
}

impl ClipMetadata {
    /// Build metadata from millisecond offsets.
    ///
    /// `end_ms < start_ms` is accepted and yields a negative duration.
    pub fn from_millis(source_video_id: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        let start = start_ms as f64 / 1000.0;
        let end = end_ms as f64 / 1000.0;
        Self {
            source_video_id: source_video_id.into(),
            start_time_seconds: start,
            duration_seconds: end - start,
        }
    }

    /// End of the clip in seconds
    pub fn end_time_seconds(&self) -> f64 {
        self.start_time_seconds + self.duration_seconds
    }

    /// Trim window for this clip
    pub fn window(&self) -> TrimWindow {
        TrimWindow::new(self.start_time_seconds, self.duration_seconds)
    }
}

/// Half-open time range `[start, end)` in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s)", self.start, self.end)
    }
}

/// Start and duration of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimWindow {
    pub start: f64,
    pub duration: f64,
}

impl TrimWindow {
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// Range cut from the video track
    pub fn video_range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.start + self.duration,
        }
    }

    /// Range cut from the audio track, shifted forward by `sync_offset`.
    /// Its end matches the video end, so it is `sync_offset` shorter.
    pub fn audio_range(&self, sync_offset: f64) -> TimeRange {
        TimeRange {
            start: self.start + sync_offset,
            end: self.start + self.duration,
        }
    }
}

/// Untrimmed downloads for one source video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub source_video_id: String,
    pub title: Option<String>,
    pub video_path: PathBuf,
    pub audio_path: PathBuf,
}

/// Probed media file information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Container format name
    pub container: String,
    /// First video stream, if any
    pub video: Option<VideoStreamInfo>,
    /// First audio stream, if any
    pub audio: Option<AudioStreamInfo>,
    /// File size in bytes
    pub file_size: u64,
}

impl MediaInfo {
    /// Frame size of the first video stream
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.video.as_ref().map(|v| (v.width, v.height))
    }
}

/// Video stream information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStreamInfo {
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

/// Audio stream information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStreamInfo {
    pub codec: String,
    pub sample_rate: u32,
}

/// Trimmed, audio-merged segment written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentClip {
    pub path: PathBuf,
    pub source_video_id: String,
    pub window: TrimWindow,
    pub info: MediaInfo,
}

/// Final concatenated output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compilation {
    pub path: PathBuf,
    pub segment_count: usize,
    pub info: MediaInfo,
}

/// Vertical resolution label such as `1080p`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub height: u32,
}

impl Resolution {
    pub fn new(height: u32) -> Self {
        Self { height }
    }
}

impl FromStr for Resolution {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('p')
            .or_else(|| trimmed.strip_suffix('P'))
            .unwrap_or(trimmed);
        match digits.parse::<u32>() {
            Ok(height) if height > 0 => Ok(Self { height }),
            _ => Err(ReelError::config(format!(
                "Invalid resolution '{}'. Expected a label like 1080p",
                s
            ))),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.height)
    }
}

impl Serialize for Resolution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One downloadable stream from a video's stream listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamVariant {
    pub format_id: String,
    pub ext: String,
    pub height: Option<u32>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub has_video: bool,
    pub has_audio: bool,
}

impl StreamVariant {
    pub fn is_video_only(&self) -> bool {
        self.has_video && !self.has_audio
    }

    pub fn is_audio_only(&self) -> bool {
        self.has_audio && !self.has_video
    }
}

/// Track kind a stream query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    VideoOnly,
    AudioOnly,
}

/// Filter applied to a stream listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamQuery {
    pub kind: StreamKind,
    pub container: Option<String>,
    pub resolution: Option<Resolution>,
}

impl StreamQuery {
    /// Video-only stream in `container` at exactly `resolution`
    pub fn video(container: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            kind: StreamKind::VideoOnly,
            container: Some(container.into()),
            resolution: Some(resolution),
        }
    }

    /// Any audio-only stream
    pub fn audio() -> Self {
        Self {
            kind: StreamKind::AudioOnly,
            container: None,
            resolution: None,
        }
    }

    pub fn matches(&self, variant: &StreamVariant) -> bool {
        let kind_ok = match self.kind {
            StreamKind::VideoOnly => variant.is_video_only(),
            StreamKind::AudioOnly => variant.is_audio_only(),
        };
        let container_ok = self
            .container
            .as_ref()
            .map_or(true, |c| variant.ext.eq_ignore_ascii_case(c));
        let resolution_ok = self
            .resolution
            .map_or(true, |r| variant.height == Some(r.height));
        kind_ok && container_ok && resolution_ok
    }
}

impl fmt::Display for StreamQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StreamKind::VideoOnly => f.write_str("video-only")?,
            StreamKind::AudioOnly => f.write_str("audio-only")?,
        }
        if let Some(container) = &self.container {
            write!(f, " {}", container)?;
        }
        if let Some(resolution) = &self.resolution {
            write!(f, " {}", resolution)?;
        }
        Ok(())
    }
}

/// First variant in listing order that satisfies the query
pub fn select_stream<'a>(
    variants: &'a [StreamVariant],
    query: &StreamQuery,
) -> Option<&'a StreamVariant> {
    variants.iter().find(|v| query.matches(v))
}

/// What happens to per-clip segment files once the compilation is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupPolicy {
    /// Leave segment files next to the compilation
    #[default]
    Keep,
    /// Remove segment files after concatenation
    Delete,
}

impl FromStr for CleanupPolicy {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "delete" => Ok(Self::Delete),
            other => Err(ReelError::config(format!(
                "Invalid cleanup policy: {}. Valid policies: keep, delete",
                other
            ))),
        }
    }
}

/// Clip that was skipped during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedClip {
    pub url: String,
    pub reason: String,
}

/// Outcome of a compilation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Segment files written, in input order
    pub segments: Vec<PathBuf>,
    /// Clips that yielded no metadata
    pub skipped: Vec<SkippedClip>,
    /// Segments whose probed duration missed the window
    pub unverified: Vec<PathBuf>,
    /// Compilation path, absent when no segment was produced
    pub compilation: Option<PathBuf>,
}
