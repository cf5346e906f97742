use std::sync::Arc;

use crate::adapters::{FfmpegAssembler, PageScrapeExtractor, PipelineConfig, YtDlpFetcher};
use crate::app::{
    compile_interactor::CompileInteractor, inspect_interactor::InspectInteractor,
    verify_interactor::VerifyInteractor,
};
use crate::engine::EncodeSettings;
use crate::error::ReelResult;
use crate::output::ClipVerifier;
use crate::ports::{ClipExtractor, MediaFetcher, ProbePort, SegmentAssembler};

pub trait AppContainer: Send + Sync {
    fn compile_interactor(&self) -> Arc<CompileInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn verify_interactor(&self) -> Arc<VerifyInteractor>;
}

/// Probe backed by libav when the `libav` feature is enabled
#[cfg(feature = "libav")]
pub fn default_probe(_config: &PipelineConfig) -> ReelResult<Arc<dyn ProbePort>> {
    Ok(Arc::new(crate::adapters::ProbeLibavAdapter::new()?))
}

/// Probe backed by the ffprobe CLI
#[cfg(not(feature = "libav"))]
pub fn default_probe(config: &PipelineConfig) -> ReelResult<Arc<dyn ProbePort>> {
    Ok(Arc::new(crate::adapters::FfprobeAdapter::new(
        ffprobe_program(&config.ffmpeg_path),
    )))
}

/// `ffprobe` living next to the configured ffmpeg binary
#[cfg_attr(feature = "libav", allow(dead_code))]
fn ffprobe_program(ffmpeg_path: &str) -> String {
    match ffmpeg_path.rfind("ffmpeg") {
        Some(pos) => format!("{}ffprobe{}", &ffmpeg_path[..pos], &ffmpeg_path[pos + 6..]),
        None => "ffprobe".to_string(),
    }
}

pub struct DefaultAppContainer {
    compile_interactor: Arc<CompileInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
    verify_interactor: Arc<VerifyInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters from a validated configuration
    pub fn new(config: &PipelineConfig) -> ReelResult<Self> {
        let probe_port = default_probe(config)?;
        let extractor = Arc::new(PageScrapeExtractor::new(&config.user_agent)?);
        let fetcher = Arc::new(YtDlpFetcher::new(
            config.ytdlp_path.clone(),
            config.watch_base.clone(),
            config.video_container.clone(),
            config.target_resolution,
        ));
        let assembler = Arc::new(FfmpegAssembler::new(
            config.ffmpeg_path.clone(),
            EncodeSettings::from(config),
            config.sync_offset,
            Arc::clone(&probe_port),
        ));

        let compile_interactor = Arc::new(
            CompileInteractor::new(
                Arc::clone(&extractor) as Arc<dyn ClipExtractor>,
                fetcher as Arc<dyn MediaFetcher>,
                assembler as Arc<dyn SegmentAssembler>,
            )
            .with_cleanup(config.cleanup)
            .with_verifier(ClipVerifier::new(config.verify_tolerance)),
        );

        let inspect_interactor = Arc::new(InspectInteractor::new(
            extractor as Arc<dyn ClipExtractor>,
            config.sync_offset,
        ));

        let verify_interactor = Arc::new(VerifyInteractor::new(probe_port));

        Ok(Self {
            compile_interactor,
            inspect_interactor,
            verify_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn compile_interactor(&self) -> Arc<CompileInteractor> {
        Arc::clone(&self.compile_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn verify_interactor(&self) -> Arc<VerifyInteractor> {
        Arc::clone(&self.verify_interactor)
    }
}
