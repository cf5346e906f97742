//! Trim, remux and concatenation engine built on the ffmpeg CLI

use serde::{Deserialize, Serialize};

use crate::adapters::toml_config::PipelineConfig;

pub mod command;
pub mod compose;
pub mod trim;

pub use command::FfmpegCommand;
pub use compose::ComposeLayout;
pub use trim::TrimPlan;

/// Encoder settings shared by segment and compilation encodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// Video codec
    pub video_codec: String,
    /// Audio codec
    pub audio_codec: String,
    /// Encoder thread count
    pub threads: usize,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            threads: num_cpus::get(),
        }
    }
}

impl EncodeSettings {
    /// Set the video codec
    pub fn with_video_codec(mut self, codec: impl Into<String>) -> Self {
        self.video_codec = codec.into();
        self
    }

    /// Set the audio codec
    pub fn with_audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.audio_codec = codec.into();
        self
    }

    /// Set the encoder thread count
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}

impl From<&PipelineConfig> for EncodeSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self::default()
            .with_video_codec(config.video_codec.clone())
            .with_audio_codec(config.audio_codec.clone())
            .with_threads(config.encoder_threads)
    }
}
