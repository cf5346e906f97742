//! FFmpeg execution adapter
//!
//! Trims and remuxes downloaded tracks into segments, then joins the
//! segments into the compilation.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::model::{Compilation, MediaAsset, SegmentClip, TrimWindow};
use crate::engine::{ComposeLayout, EncodeSettings, TrimPlan};
use crate::error::ReelResult;
use crate::ports::{ProbePort, SegmentAssembler};
use crate::utils::logging::StageTimer;

/// Segment assembler driving the ffmpeg CLI
pub struct FfmpegAssembler {
    program: String,
    settings: EncodeSettings,
    sync_offset: f64,
    probe: Arc<dyn ProbePort>,
}

impl FfmpegAssembler {
    pub fn new(
        program: impl Into<String>,
        settings: EncodeSettings,
        sync_offset: f64,
        probe: Arc<dyn ProbePort>,
    ) -> Self {
        Self {
            program: program.into(),
            settings,
            sync_offset,
            probe,
        }
    }
}

#[async_trait]
impl SegmentAssembler for FfmpegAssembler {
    async fn trim_and_merge(
        &self,
        asset: &MediaAsset,
        window: &TrimWindow,
        output_path: &Path,
    ) -> ReelResult<SegmentClip> {
        let plan = TrimPlan::new(window, self.sync_offset)?;
        debug!(
            "Trim plan for {}: video {} audio {}",
            asset.source_video_id, plan.video, plan.audio
        );

        let video_source = self.probe.probe_media(&asset.video_path).await?;
        let audio_source = self.probe.probe_media(&asset.audio_path).await?;
        plan.check_source(video_source.duration, audio_source.duration)?;

        let timer = StageTimer::start("trim_and_merge");
        plan.to_command(
            &self.program,
            &asset.video_path,
            &asset.audio_path,
            output_path,
            &self.settings,
        )
        .run("trim_and_merge")
        .await?;
        timer.complete();

        let info = self.probe.probe_media(output_path).await?;
        Ok(SegmentClip {
            path: output_path.to_path_buf(),
            source_video_id: asset.source_video_id.clone(),
            window: *window,
            info,
        })
    }

    async fn concatenate(
        &self,
        segments: &[SegmentClip],
        output_path: &Path,
    ) -> ReelResult<Option<Compilation>> {
        if segments.is_empty() {
            return Ok(None);
        }

        let layout = ComposeLayout::fit(segments)?;
        info!(
            "Concatenating {} segments onto a {}x{} canvas",
            segments.len(),
            layout.width,
            layout.height
        );

        let timer = StageTimer::start("concatenate");
        layout
            .to_command(&self.program, segments, output_path, &self.settings)
            .run("concatenate")
            .await?;
        timer.complete();

        let info = self.probe.probe_media(output_path).await?;
        Ok(Some(Compilation {
            path: output_path.to_path_buf(),
            segment_count: segments.len(),
            info,
        }))
    }
}
