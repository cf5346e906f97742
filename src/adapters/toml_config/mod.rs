// TOML config adapter - Pipeline configuration stored in TOML files

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::model::{CleanupPolicy, Resolution, DEFAULT_SYNC_OFFSET};
use crate::error::{ReelError, ReelResult};
use crate::output::verifier::DEFAULT_TOLERANCE;

/// Config files looked up when none is given explicitly, in order
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["clipreel.toml", "config/clipreel.toml"];

/// Settings for a compilation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory for downloads, segments and the compilation
    pub output_dir: PathBuf,
    /// File name of the compilation inside `output_dir`
    pub final_name: String,
    /// Forward audio shift in seconds, see [`DEFAULT_SYNC_OFFSET`]
    pub sync_offset: f64,
    /// Container of the video-only stream to download
    pub video_container: String,
    /// Exact height of the video-only stream to download
    pub target_resolution: Resolution,
    pub video_codec: String,
    pub audio_codec: String,
    pub encoder_threads: usize,
    pub cleanup: CleanupPolicy,
    /// Allowed segment duration drift in seconds, on top of one frame
    pub verify_tolerance: f64,
    /// User-Agent sent when fetching clip pages
    pub user_agent: String,
    /// Prefix that turns a video id into a watch URL
    pub watch_base: String,
    pub ffmpeg_path: String,
    pub ytdlp_path: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            final_name: "final_compilation.mp4".to_string(),
            sync_offset: DEFAULT_SYNC_OFFSET,
            video_container: "mp4".to_string(),
            target_resolution: Resolution::new(1080),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            encoder_threads: num_cpus::get(),
            cleanup: CleanupPolicy::Keep,
            verify_tolerance: DEFAULT_TOLERANCE,
            user_agent: "Mozilla/5.0".to_string(),
            watch_base: "https://www.youtube.com/watch?v=".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            ytdlp_path: "yt-dlp".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> ReelResult<()> {
        if !self.sync_offset.is_finite() || self.sync_offset < 0.0 {
            return Err(ReelError::config(format!(
                "sync_offset must be a non-negative number of seconds, got {}",
                self.sync_offset
            )));
        }

        if !self.verify_tolerance.is_finite() || self.verify_tolerance < 0.0 {
            return Err(ReelError::config(format!(
                "verify_tolerance must be a non-negative number of seconds, got {}",
                self.verify_tolerance
            )));
        }

        for (key, value) in [
            ("final_name", &self.final_name),
            ("video_container", &self.video_container),
            ("video_codec", &self.video_codec),
            ("audio_codec", &self.audio_codec),
            ("watch_base", &self.watch_base),
            ("ffmpeg_path", &self.ffmpeg_path),
            ("ytdlp_path", &self.ytdlp_path),
        ] {
            if value.trim().is_empty() {
                return Err(ReelError::config(format!("{} cannot be empty", key)));
            }
        }

        if self.encoder_threads == 0 {
            return Err(ReelError::config("encoder_threads must be at least 1"));
        }

        Ok(())
    }

    /// Path of the compilation file
    pub fn final_path(&self) -> PathBuf {
        self.output_dir.join(&self.final_name)
    }
}

/// On-disk layout: settings live under a `[clipreel]` table
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    clipreel: PipelineConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> ReelResult<PipelineConfig> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| ReelError::config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(file.clipreel)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> ReelResult<PipelineConfig> {
        if !path.exists() {
            return Err(ReelError::config(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// First default config path that exists
    pub fn discover() -> Option<PathBuf> {
        DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .inspect(|p| debug!("Found config file: {}", p.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("downloads"));
        assert_eq!(config.final_name, "final_compilation.mp4");
        assert_eq!(config.sync_offset, 0.25);
        assert_eq!(config.target_resolution, Resolution::new(1080));
        assert_eq!(config.cleanup, CleanupPolicy::Keep);
        assert_eq!(config.verify_tolerance, 0.1);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.final_path(),
            PathBuf::from("downloads").join("final_compilation.mp4")
        );
    }

    #[test]
    fn test_parse_partial_file() {
        let config = TomlConfigAdapter::parse(
            r#"
            [clipreel]
            final_name = "highlights.mp4"
            sync_offset = 0.5
            target_resolution = "720p"
            cleanup = "delete"
            "#,
        )
        .unwrap();

        assert_eq!(config.final_name, "highlights.mp4");
        assert_eq!(config.sync_offset, 0.5);
        assert_eq!(config.target_resolution, Resolution::new(720));
        assert_eq!(config.cleanup, CleanupPolicy::Delete);
        assert_eq!(config.video_codec, "libx264");
    }

    #[test]
    fn test_parse_empty_file_gives_defaults() {
        let config = TomlConfigAdapter::parse("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_parse_rejects_bad_resolution() {
        let err = TomlConfigAdapter::parse("[clipreel]\ntarget_resolution = \"huge\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_validate_rejects_negative_offset() {
        let config = PipelineConfig {
            sync_offset: -0.1,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_codec() {
        let config = PipelineConfig {
            video_codec: "  ".to_string(),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_verify_tolerance() {
        let config =
            TomlConfigAdapter::parse("[clipreel]\nverify_tolerance = 0.5\nencoder_threads = 2\n")
                .unwrap();
        assert_eq!(config.verify_tolerance, 0.5);
        assert_eq!(config.encoder_threads, 2);
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let config = PipelineConfig {
            verify_tolerance: -0.5,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TomlConfigAdapter::load(&dir.path().join("nope.toml")).is_err());
    }
}
