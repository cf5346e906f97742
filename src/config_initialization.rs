//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::adapters::toml_config::{PipelineConfig, TomlConfigAdapter};
use crate::cli::args::CompileArgs;
use crate::domain::model::{CleanupPolicy, Resolution};
use crate::error::ReelResult;

/// Values given on the command line or through `CLIPREEL_*` variables.
///
/// clap already merges the environment into the arguments, so one struct
/// covers both layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub final_name: Option<String>,
    pub sync_offset: Option<f64>,
    pub resolution: Option<String>,
    pub container: Option<String>,
    pub codec: Option<String>,
    pub threads: Option<usize>,
    pub cleanup: Option<String>,
}

impl From<&CompileArgs> for ConfigOverrides {
    fn from(args: &CompileArgs) -> Self {
        Self {
            output_dir: args.output_dir.clone(),
            final_name: args.final_name.clone(),
            sync_offset: args.sync_offset,
            resolution: args.resolution.clone(),
            container: args.container.clone(),
            codec: args.codec.clone(),
            threads: args.threads,
            cleanup: args.cleanup.clone(),
        }
    }
}

impl ConfigOverrides {
    /// Apply every set value to `config`, returning how many were applied
    pub fn apply(&self, config: &mut PipelineConfig) -> ReelResult<usize> {
        let mut applied = 0;

        if let Some(dir) = &self.output_dir {
            debug!("Override: output_dir = {}", dir.display());
            config.output_dir = dir.clone();
            applied += 1;
        }
        if let Some(name) = &self.final_name {
            debug!("Override: final_name = {}", name);
            config.final_name = name.clone();
            applied += 1;
        }
        if let Some(offset) = self.sync_offset {
            debug!("Override: sync_offset = {}", offset);
            config.sync_offset = offset;
            applied += 1;
        }
        if let Some(resolution) = &self.resolution {
            config.target_resolution = resolution.parse::<Resolution>()?;
            debug!("Override: target_resolution = {}", config.target_resolution);
            applied += 1;
        }
        if let Some(container) = &self.container {
            debug!("Override: video_container = {}", container);
            config.video_container = container.clone();
            applied += 1;
        }
        if let Some(codec) = &self.codec {
            debug!("Override: video_codec = {}", codec);
            config.video_codec = codec.clone();
            applied += 1;
        }
        if let Some(threads) = self.threads {
            debug!("Override: encoder_threads = {}", threads);
            config.encoder_threads = threads;
            applied += 1;
        }
        if let Some(cleanup) = &self.cleanup {
            config.cleanup = cleanup.parse::<CleanupPolicy>()?;
            debug!("Override: cleanup = {:?}", config.cleanup);
            applied += 1;
        }

        Ok(applied)
    }
}

/// Resolve configuration with precedence: CLI > Env > File > Defaults.
///
/// An explicit `config_path` must exist; otherwise the default locations
/// are searched and silently skipped when absent.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> ReelResult<PipelineConfig> {
    let mut config = match config_path {
        Some(path) => TomlConfigAdapter::load(path)?,
        None => match TomlConfigAdapter::discover() {
            Some(path) => TomlConfigAdapter::load(&path)?,
            None => {
                debug!("No config file found, using defaults");
                PipelineConfig::default()
            }
        },
    };

    let applied = overrides.apply(&mut config)?;
    if applied > 0 {
        info!("Applied {} command-line/environment overrides", applied);
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipreel.toml");
        std::fs::write(
            &path,
            "[clipreel]\nfinal_name = \"from_file.mp4\"\nsync_offset = 0.4\nvideo_codec = \"libx265\"\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            final_name: Some("kova_highlights.mp4".to_string()),
            resolution: Some("720p".to_string()),
            ..ConfigOverrides::default()
        };
        let config = resolve_config(Some(&path), &overrides).unwrap();

        assert_eq!(config.final_name, "kova_highlights.mp4");
        assert_eq!(config.sync_offset, 0.4);
        assert_eq!(config.video_codec, "libx265");
        assert_eq!(config.target_resolution, Resolution::new(720));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(resolve_config(Some(&missing), &ConfigOverrides::default()).is_err());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = PipelineConfig::default();
        let overrides = ConfigOverrides {
            cleanup: Some("shred".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(overrides.apply(&mut config).is_err());
    }

    #[test]
    fn test_negative_offset_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = ConfigOverrides {
            sync_offset: Some(-1.0),
            ..ConfigOverrides::default()
        };
        assert!(resolve_config(Some(&path), &overrides).is_err());
    }

    #[test]
    fn test_apply_counts() {
        let mut config = PipelineConfig::default();
        let overrides = ConfigOverrides {
            output_dir: Some(PathBuf::from("out")),
            threads: Some(2),
            cleanup: Some("delete".to_string()),
            ..ConfigOverrides::default()
        };
        assert_eq!(overrides.apply(&mut config).unwrap(), 3);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.encoder_threads, 2);
        assert_eq!(config.cleanup, CleanupPolicy::Delete);
    }
}
