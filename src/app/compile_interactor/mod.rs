// Compile interactor - Orchestrates the clip compilation use case

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::model::*;
use crate::error::ReelResult;
use crate::output::ClipVerifier;
use crate::ports::*;
use crate::utils::format_file_size;
use crate::utils::path::segment_path;

/// Interactor for the extract, fetch, trim and concatenate pipeline
pub struct CompileInteractor {
    extractor: Arc<dyn ClipExtractor>,
    fetcher: Arc<dyn MediaFetcher>,
    assembler: Arc<dyn SegmentAssembler>,
    verifier: ClipVerifier,
    cleanup: CleanupPolicy,
}

impl CompileInteractor {
    /// Create new compile interactor with injected ports
    pub fn new(
        extractor: Arc<dyn ClipExtractor>,
        fetcher: Arc<dyn MediaFetcher>,
        assembler: Arc<dyn SegmentAssembler>,
    ) -> Self {
        Self {
            extractor,
            fetcher,
            assembler,
            verifier: ClipVerifier::default(),
            cleanup: CleanupPolicy::default(),
        }
    }

    pub fn with_cleanup(mut self, cleanup: CleanupPolicy) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn with_verifier(mut self, verifier: ClipVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    /// Process `clips` in order and join the resulting segments into
    /// `output_dir/final_name`.
    ///
    /// Clips whose page yields no metadata are skipped. Any fetch, trim or
    /// concatenation failure aborts the run.
    pub async fn run(
        &self,
        clips: &[ClipReference],
        output_dir: &Path,
        final_name: &str,
    ) -> ReelResult<RunReport> {
        tokio::fs::create_dir_all(output_dir).await?;

        let mut report = RunReport::default();
        let mut segments: Vec<SegmentClip> = Vec::new();

        for (index, clip) in clips.iter().enumerate() {
            info!("Processing clip {}/{}: {}", index + 1, clips.len(), clip);

            let metadata = match self.extractor.extract(clip).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Skipping {}: {}", clip, e);
                    report.skipped.push(SkippedClip {
                        url: clip.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            info!(
                "Clip {} covers {:.3}s from {:.3}s of {}",
                clip,
                metadata.duration_seconds,
                metadata.start_time_seconds,
                metadata.source_video_id
            );

            let asset = self
                .fetcher
                .fetch(&metadata.source_video_id, output_dir)
                .await?;

            let output = segment_path(
                output_dir,
                &metadata.source_video_id,
                metadata.start_time_seconds,
            );
            let window = metadata.window();
            let segment = self
                .assembler
                .trim_and_merge(&asset, &window, &output)
                .await?;

            let check = self.verifier.check(&segment.info, window.duration);
            if !check.success {
                warn!(
                    "Segment {} failed verification: {}",
                    segment.path.display(),
                    check.error.as_deref().unwrap_or("unknown")
                );
                report.unverified.push(segment.path.clone());
            }

            info!("Segment written: {}", segment.path.display());
            report.segments.push(segment.path.clone());
            segments.push(segment);
        }

        if segments.is_empty() {
            info!("No segments produced; skipping concatenation");
            return Ok(report);
        }

        let final_path = output_dir.join(final_name);
        if let Some(compilation) = self.assembler.concatenate(&segments, &final_path).await? {
            info!(
                "Compilation saved to {} ({} segments, {:.3}s, {})",
                compilation.path.display(),
                compilation.segment_count,
                compilation.info.duration,
                format_file_size(compilation.info.file_size)
            );
            report.compilation = Some(compilation.path);
        }

        if self.cleanup == CleanupPolicy::Delete {
            remove_segments(&segments, report.compilation.as_deref()).await;
        }

        Ok(report)
    }
}

/// Delete segment files, never the compilation itself. Failures only warn.
async fn remove_segments(segments: &[SegmentClip], keep: Option<&Path>) {
    let mut removed: Vec<&PathBuf> = Vec::new();
    for segment in segments {
        if Some(segment.path.as_path()) == keep || removed.contains(&&segment.path) {
            continue;
        }
        match tokio::fs::remove_file(&segment.path).await {
            Ok(()) => removed.push(&segment.path),
            Err(e) => warn!("Failed to remove {}: {}", segment.path.display(), e),
        }
    }
}
