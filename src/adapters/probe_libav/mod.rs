// Probe LibAV adapter - Media file analysis using libav

use async_trait::async_trait;
use ffmpeg_next::media::Type;
use std::path::{Path, PathBuf};
use std::sync::Once;

use crate::domain::model::{AudioStreamInfo, MediaInfo, VideoStreamInfo};
use crate::error::{ReelError, ReelResult};
use crate::ports::ProbePort;

/// libav container durations are in microseconds
const AV_TIME_BASE: f64 = 1_000_000.0;

static INIT: Once = Once::new();

/// LibAV-based media probing adapter
pub struct ProbeLibavAdapter;

impl ProbeLibavAdapter {
    /// Create new LibAV probing adapter
    pub fn new() -> ReelResult<Self> {
        let mut result = Ok(());
        INIT.call_once(|| {
            result = ffmpeg_next::init();
        });
        result?;
        Ok(Self)
    }

    fn probe_blocking(path: &Path) -> ReelResult<MediaInfo> {
        if !path.exists() {
            return Err(ReelError::ProbeError {
                path: path.to_path_buf(),
                message: "file does not exist".to_string(),
            });
        }

        let file_size = std::fs::metadata(path)?.len();
        let input = ffmpeg_next::format::input(&path)?;

        let duration = if input.duration() > 0 {
            input.duration() as f64 / AV_TIME_BASE
        } else {
            0.0
        };
        let container = input.format().name().to_string();

        let video = match input.streams().best(Type::Video) {
            Some(stream) => {
                let params = stream.parameters();
                let codec = params.id().name().to_string();
                let decoder = ffmpeg_next::codec::context::Context::from_parameters(params)?
                    .decoder()
                    .video()?;
                let rate = stream.avg_frame_rate();
                let frame_rate = if rate.denominator() != 0 {
                    f64::from(rate)
                } else {
                    0.0
                };
                Some(VideoStreamInfo {
                    codec,
                    width: decoder.width(),
                    height: decoder.height(),
                    frame_rate,
                })
            }
            None => None,
        };

        let audio = match input.streams().best(Type::Audio) {
            Some(stream) => {
                let params = stream.parameters();
                let codec = params.id().name().to_string();
                let decoder = ffmpeg_next::codec::context::Context::from_parameters(params)?
                    .decoder()
                    .audio()?;
                Some(AudioStreamInfo {
                    codec,
                    sample_rate: decoder.rate(),
                })
            }
            None => None,
        };

        Ok(MediaInfo {
            duration,
            container,
            video,
            audio,
            file_size,
        })
    }
}

#[async_trait]
impl ProbePort for ProbeLibavAdapter {
    async fn probe_media(&self, file_path: &Path) -> ReelResult<MediaInfo> {
        let path: PathBuf = file_path.to_path_buf();
        let task_path = path.clone();
        tokio::task::spawn_blocking(move || Self::probe_blocking(&task_path))
            .await
            .map_err(|e| ReelError::ProbeError {
                path,
                message: e.to_string(),
            })?
    }
}
