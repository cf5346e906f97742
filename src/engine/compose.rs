//! Compose-mode concatenation of segments with mixed frame sizes

use std::fmt::Write as _;
use std::path::Path;

use crate::domain::model::SegmentClip;
use crate::engine::{EncodeSettings, FfmpegCommand};
use crate::error::{ReelError, ReelResult};

/// Audio format every segment is converted to before joining
const AUDIO_FORMAT: &str = "sample_fmts=fltp:sample_rates=44100:channel_layouts=stereo";

/// Frame rate as an ffmpeg expression. Whole and NTSC (`N*1000/1001`)
/// rates are written exactly; anything else keeps six decimals.
fn fps_expr(rate: f64) -> String {
    if (rate - rate.round()).abs() < 1e-3 {
        return format!("{}", rate.round() as u64);
    }
    let ntsc = rate * 1001.0 / 1000.0;
    if (ntsc - ntsc.round()).abs() < 1e-2 {
        return format!("{}/1001", ntsc.round() as u64 * 1000);
    }
    format!("{:.6}", rate)
}

/// Output canvas for a compose concatenation.
///
/// Segments smaller than the canvas are centred on it with black padding
/// instead of being scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposeLayout {
    pub width: u32,
    pub height: u32,
    /// Highest segment frame rate, when any segment reports one
    pub frame_rate: Option<f64>,
}

impl ComposeLayout {
    /// Canvas large enough for every segment
    pub fn fit(segments: &[SegmentClip]) -> ReelResult<Self> {
        let mut width: u32 = 0;
        let mut height: u32 = 0;
        let mut frame_rate: Option<f64> = None;

        for segment in segments {
            let video = segment.info.video.as_ref().ok_or_else(|| ReelError::ProbeError {
                path: segment.path.clone(),
                message: "segment has no video stream".to_string(),
            })?;
            width = width.max(video.width);
            height = height.max(video.height);
            if video.frame_rate > 0.0 {
                frame_rate = Some(frame_rate.map_or(video.frame_rate, |r| r.max(video.frame_rate)));
            }
        }

        if width == 0 || height == 0 {
            return Err(ReelError::Concat {
                message: "no segment with a usable frame size".to_string(),
            });
        }

        Ok(Self {
            width,
            height,
            frame_rate,
        })
    }

    /// `-filter_complex` graph producing `[outv]` and `[outa]`
    pub fn filter_graph(&self, segments: &[SegmentClip]) -> String {
        let mut graph = String::new();

        for (i, segment) in segments.iter().enumerate() {
            let _ = write!(
                graph,
                "[{i}:v:0]pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setsar=1",
                i = i,
                w = self.width,
                h = self.height
            );
            if let Some(rate) = self.frame_rate {
                let _ = write!(graph, ",fps={}", fps_expr(rate));
            }
            let _ = write!(graph, "[v{}];", i);

            if segment.info.audio.is_some() {
                let _ = write!(graph, "[{}:a:0]aformat={}[a{}];", i, AUDIO_FORMAT, i);
            } else {
                // Silent stand-in so every concat slot has an audio pad
                let _ = write!(
                    graph,
                    "anullsrc=channel_layout=stereo:sample_rate=44100,atrim=duration={:.3},aformat={}[a{}];",
                    segment.info.duration, AUDIO_FORMAT, i
                );
            }
        }

        for i in 0..segments.len() {
            let _ = write!(graph, "[v{}][a{}]", i, i);
        }
        let _ = write!(graph, "concat=n={}:v=1:a=1[outv][outa]", segments.len());

        graph
    }

    /// ffmpeg invocation joining `segments` in order into `output`
    pub fn to_command(
        &self,
        program: &str,
        segments: &[SegmentClip],
        output: &Path,
        settings: &EncodeSettings,
    ) -> FfmpegCommand {
        let cmd = segments
            .iter()
            .fold(FfmpegCommand::new(program, output), |cmd, segment| {
                cmd.input(&segment.path)
            });

        cmd.filter_complex(self.filter_graph(segments))
            .map("[outv]")
            .map("[outa]")
            .encode(settings)
    }
}
