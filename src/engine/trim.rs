//! Trim-and-merge planning for one segment

use std::path::Path;

use crate::domain::model::{TimeRange, TrimWindow};
use crate::engine::{EncodeSettings, FfmpegCommand};
use crate::error::{ReelError, ReelResult};
use crate::utils::time::ffmpeg_seconds;

/// Container durations may round the last frame or packet away
const SOURCE_END_SLACK: f64 = 0.05;

/// Validated cut ranges for the video and audio tracks of one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimPlan {
    pub video: TimeRange,
    pub audio: TimeRange,
}

impl TrimPlan {
    /// Plan a trim of `window` with the audio shifted forward by `sync_offset`.
    ///
    /// Fails when either range is empty, which happens for non-positive
    /// durations and for windows no longer than the offset.
    pub fn new(window: &TrimWindow, sync_offset: f64) -> ReelResult<Self> {
        if !window.start.is_finite() || !window.duration.is_finite() || window.start < 0.0 {
            return Err(ReelError::InvalidTimeRange {
                message: format!(
                    "start {} and duration {} must be finite with start >= 0",
                    window.start, window.duration
                ),
            });
        }

        let video = window.video_range();
        if video.is_empty() {
            return Err(ReelError::InvalidTimeRange {
                message: format!("video range {} is empty", video),
            });
        }

        let audio = window.audio_range(sync_offset);
        if audio.is_empty() {
            return Err(ReelError::InvalidTimeRange {
                message: format!(
                    "audio range {} is empty; duration {:.3}s does not exceed the {:.3}s sync offset",
                    audio, window.duration, sync_offset
                ),
            });
        }

        Ok(Self { video, audio })
    }

    /// Check both ranges against the probed track lengths.
    ///
    /// A range must start inside its track and end no later than the track
    /// does. A non-positive length means the container reported none and
    /// that track is not checked.
    pub fn check_source(&self, video_length: f64, audio_length: f64) -> ReelResult<()> {
        check_range("video", &self.video, video_length)?;
        check_range("audio", &self.audio, audio_length)
    }

    /// ffmpeg invocation that cuts both tracks and muxes them into `output`.
    ///
    /// Input seeking with `-ss`/`-t` on each input makes the audio cut land
    /// at t = 0 of the output, so it plays `sync_offset` ahead of the source.
    pub fn to_command(
        &self,
        program: &str,
        video_path: &Path,
        audio_path: &Path,
        output: &Path,
        settings: &EncodeSettings,
    ) -> FfmpegCommand {
        FfmpegCommand::new(program, output)
            .input_with_args(
                video_path,
                [
                    "-ss".to_string(),
                    ffmpeg_seconds(self.video.start),
                    "-t".to_string(),
                    ffmpeg_seconds(self.video.duration()),
                ],
            )
            .input_with_args(
                audio_path,
                [
                    "-ss".to_string(),
                    ffmpeg_seconds(self.audio.start),
                    "-t".to_string(),
                    ffmpeg_seconds(self.audio.duration()),
                ],
            )
            .map("0:v:0")
            .map("1:a:0")
            .encode(settings)
    }
}

fn check_range(track: &str, range: &TimeRange, length: f64) -> ReelResult<()> {
    if length.is_nan() || length <= 0.0 {
        return Ok(());
    }
    if range.start >= length {
        return Err(ReelError::InvalidTimeRange {
            message: format!(
                "{} range {} starts past the end of the {:.3}s source",
                track, range, length
            ),
        });
    }
    if range.end > length + SOURCE_END_SLACK {
        return Err(ReelError::InvalidTimeRange {
            message: format!(
                "{} range {} runs past the end of the {:.3}s source",
                track, range, length
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_offsets_audio() {
        let plan = TrimPlan::new(&TrimWindow::new(10.0, 5.0), 0.25).unwrap();
        assert_eq!(plan.video.start, 10.0);
        assert_eq!(plan.video.end, 15.0);
        assert_eq!(plan.audio.start, 10.25);
        assert_eq!(plan.audio.end, 15.0);
    }

    #[test]
    fn test_plan_rejects_short_window() {
        let err = TrimPlan::new(&TrimWindow::new(10.0, 0.25), 0.25).unwrap_err();
        assert!(matches!(err, ReelError::InvalidTimeRange { .. }));
    }

    #[test]
    fn test_plan_rejects_negative_duration() {
        assert!(TrimPlan::new(&TrimWindow::new(10.0, -1.0), 0.25).is_err());
        assert!(TrimPlan::new(&TrimWindow::new(10.0, 0.0), 0.0).is_err());
    }

    #[test]
    fn test_plan_rejects_negative_start() {
        assert!(TrimPlan::new(&TrimWindow::new(-1.0, 5.0), 0.25).is_err());
    }

    #[test]
    fn test_source_check_accepts_window_inside() {
        let plan = TrimPlan::new(&TrimWindow::new(10.0, 5.0), 0.25).unwrap();
        assert!(plan.check_source(20.0, 20.0).is_ok());
        assert!(plan.check_source(15.0, 14.98).is_ok());
    }

    #[test]
    fn test_source_check_rejects_start_past_end() {
        let plan = TrimPlan::new(&TrimWindow::new(30.0, 5.0), 0.25).unwrap();
        let err = plan.check_source(20.0, 20.0).unwrap_err();
        assert!(matches!(err, ReelError::InvalidTimeRange { .. }));
        assert!(err.to_string().contains("starts past the end"));
    }

    #[test]
    fn test_source_check_rejects_end_past_end() {
        let plan = TrimPlan::new(&TrimWindow::new(18.0, 5.0), 0.25).unwrap();
        let err = plan.check_source(20.0, 30.0).unwrap_err();
        assert!(err.to_string().contains("video range"));

        let err = plan.check_source(30.0, 21.0).unwrap_err();
        assert!(err.to_string().contains("audio range"));
    }

    #[test]
    fn test_source_check_skips_unknown_length() {
        let plan = TrimPlan::new(&TrimWindow::new(30.0, 5.0), 0.25).unwrap();
        assert!(plan.check_source(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_zero_offset_keeps_tracks_aligned() {
        let plan = TrimPlan::new(&TrimWindow::new(2.0, 3.0), 0.0).unwrap();
        assert_eq!(plan.video, plan.audio);
    }

    #[test]
    fn test_command_args() {
        let plan = TrimPlan::new(&TrimWindow::new(10.0, 5.0), 0.25).unwrap();
        let settings = EncodeSettings::default().with_threads(2);
        let args = plan
            .to_command(
                "ffmpeg",
                Path::new("v.mp4"),
                Path::new("a.webm"),
                Path::new("clip.mp4"),
                &settings,
            )
            .build_args();

        assert_eq!(
            args,
            vec![
                "-y", "-v", "error", "-ss", "10.000", "-t", "5.000", "-i", "v.mp4", "-ss", "10.250",
                "-t", "4.750", "-i", "a.webm", "-map", "0:v:0", "-map", "1:a:0", "-c:v", "libx264",
                "-c:a", "aac", "-threads", "2", "clip.mp4"
            ]
        );
    }
}
