//! yt-dlp adapter for stream discovery and download

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::model::{
    select_stream, MediaAsset, Resolution, StreamQuery, StreamVariant,
};
use crate::error::{ReelError, ReelResult};
use crate::ports::MediaFetcher;

/// Output template handed to yt-dlp; the format id keeps the two tracks apart
const OUTPUT_TEMPLATE: &str = "%(title)s.f%(format_id)s.%(ext)s";

/// Downloads video-only and audio-only streams through the yt-dlp CLI
pub struct YtDlpFetcher {
    program: String,
    watch_base: String,
    video_container: String,
    target_resolution: Resolution,
}

impl YtDlpFetcher {
    pub fn new(
        program: impl Into<String>,
        watch_base: impl Into<String>,
        video_container: impl Into<String>,
        target_resolution: Resolution,
    ) -> Self {
        Self {
            program: program.into(),
            watch_base: watch_base.into(),
            video_container: video_container.into(),
            target_resolution,
        }
    }

    /// Watch page for a source video
    pub fn watch_url(&self, source_video_id: &str) -> String {
        format!("{}{}", self.watch_base, source_video_id)
    }

    /// Query used for the video track
    pub fn video_query(&self) -> StreamQuery {
        StreamQuery::video(self.video_container.clone(), self.target_resolution)
    }

    fn ensure_tool(&self) -> ReelResult<()> {
        which::which(&self.program)
            .map(|_| ())
            .map_err(|_| ReelError::ToolNotFound {
                tool: self.program.clone(),
            })
    }

    async fn run(&self, video_id: &str, args: &[String]) -> ReelResult<Vec<u8>> {
        debug!("Running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(ReelError::Download {
                video_id: video_id.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    async fn list_streams(&self, video_id: &str) -> ReelResult<(Option<String>, Vec<StreamVariant>)> {
        let args = vec![
            "-J".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            self.watch_url(video_id),
        ];
        let stdout = self.run(video_id, &args).await?;
        let json: serde_json::Value = serde_json::from_slice(&stdout)?;
        Ok(parse_stream_listing(&json))
    }

    async fn download(
        &self,
        video_id: &str,
        variant: &StreamVariant,
        output_dir: &Path,
    ) -> ReelResult<PathBuf> {
        let args = vec![
            "-f".to_string(),
            variant.format_id.clone(),
            "--no-playlist".to_string(),
            "-o".to_string(),
            output_dir.join(OUTPUT_TEMPLATE).to_string_lossy().to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            self.watch_url(video_id),
        ];
        let stdout = self.run(video_id, &args).await?;

        downloaded_path(&stdout).ok_or_else(|| ReelError::Download {
            video_id: video_id.to_string(),
            message: format!("yt-dlp reported no file for format {}", variant.format_id),
        })
    }
}

/// Last non-empty line printed by `--print after_move:filepath`
fn downloaded_path(stdout: &[u8]) -> Option<PathBuf> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

/// Title and stream variants, in listing order, from `yt-dlp -J` output.
///
/// A codec of `"none"` or a missing codec field means the track is absent.
pub fn parse_stream_listing(json: &serde_json::Value) -> (Option<String>, Vec<StreamVariant>) {
    let title = json
        .get("title")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let formats = match json.get("formats").and_then(|v| v.as_array()) {
        Some(f) => f,
        None => return (title, Vec::new()),
    };

    let variants = formats
        .iter()
        .filter_map(|f| {
            let format_id = f.get("format_id").and_then(|v| v.as_str())?.to_string();
            let ext = f
                .get("ext")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let height = f.get("height").and_then(|v| v.as_u64()).map(|v| v as u32);
            let vcodec = f
                .get("vcodec")
                .and_then(|v| v.as_str())
                .filter(|c| *c != "none")
                .map(str::to_string);
            let acodec = f
                .get("acodec")
                .and_then(|v| v.as_str())
                .filter(|c| *c != "none")
                .map(str::to_string);

            Some(StreamVariant {
                format_id,
                ext,
                height,
                has_video: vcodec.is_some(),
                has_audio: acodec.is_some(),
                vcodec,
                acodec,
            })
        })
        .collect();

    (title, variants)
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(&self, source_video_id: &str, output_dir: &Path) -> ReelResult<MediaAsset> {
        self.ensure_tool()?;

        let (title, variants) = self.list_streams(source_video_id).await?;
        info!(
            "Downloading video: {}",
            title.as_deref().unwrap_or(source_video_id)
        );

        let video_query = self.video_query();
        let audio_query = StreamQuery::audio();
        let video = select_stream(&variants, &video_query).ok_or_else(|| {
            ReelError::StreamNotFound {
                video_id: source_video_id.to_string(),
                query: video_query.to_string(),
            }
        })?;
        let audio = select_stream(&variants, &audio_query).ok_or_else(|| {
            ReelError::StreamNotFound {
                video_id: source_video_id.to_string(),
                query: audio_query.to_string(),
            }
        })?;

        let video_path = self.download(source_video_id, video, output_dir).await?;
        debug!("Video track saved to {}", video_path.display());
        let audio_path = self.download(source_video_id, audio, output_dir).await?;
        debug!("Audio track saved to {}", audio_path.display());

        Ok(MediaAsset {
            source_video_id: source_video_id.to_string(),
            title,
            video_path,
            audio_path,
        })
    }
}
