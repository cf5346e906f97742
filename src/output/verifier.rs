//! Output verification implementation

use std::path::Path;
use tracing::{info, warn};

use crate::domain::model::MediaInfo;
use crate::error::ReelResult;
use crate::output::VerificationResult;
use crate::ports::ProbePort;

/// Default allowed duration drift in seconds, before the one-frame allowance
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Checks written segments and compilations against their expected duration
#[derive(Debug, Clone, Copy)]
pub struct ClipVerifier {
    tolerance: f64,
}

impl Default for ClipVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl ClipVerifier {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// Allowed drift for a file: the tolerance plus one frame when the
    /// frame rate is known
    pub fn allowed_drift(&self, info: &MediaInfo) -> f64 {
        let frame = info
            .video
            .as_ref()
            .filter(|v| v.frame_rate > 0.0)
            .map_or(0.0, |v| 1.0 / v.frame_rate);
        self.tolerance + frame
    }

    /// Compare probed media to the expected duration
    pub fn check(&self, info: &MediaInfo, expected: f64) -> VerificationResult {
        let actual = info.duration;
        let drift = (actual - expected).abs();
        let accuracy = if expected > 0.0 {
            (1.0 - drift / expected).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let streams_present = info.video.is_some() && info.audio.is_some();
        let allowed = self.allowed_drift(info);

        let error = if drift > allowed {
            Some(format!(
                "duration {:.3}s differs from expected {:.3}s by more than {:.3}s",
                actual, expected, allowed
            ))
        } else if !streams_present {
            Some("output is missing a video or audio stream".to_string())
        } else {
            None
        };

        VerificationResult {
            success: error.is_none(),
            expected,
            actual,
            accuracy,
            streams_present,
            error,
        }
    }

    /// Probe `path` and check it
    pub async fn verify(
        &self,
        probe: &dyn ProbePort,
        path: &Path,
        expected: f64,
    ) -> ReelResult<VerificationResult> {
        info!("Verifying {} (expected {:.3}s)", path.display(), expected);
        let media_info = probe.probe_media(path).await?;
        let result = self.check(&media_info, expected);

        if result.success {
            info!("Verification passed ({:.1}% accurate)", result.accuracy * 100.0);
        } else {
            warn!(
                "Verification failed for {}: {}",
                path.display(),
                result.error.as_deref().unwrap_or("unknown")
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AudioStreamInfo, VideoStreamInfo};

    fn info(duration: f64, fps: f64, audio: bool) -> MediaInfo {
        MediaInfo {
            duration,
            container: "mp4".to_string(),
            video: Some(VideoStreamInfo {
                codec: "h264".to_string(),
                width: 1920,
                height: 1080,
                frame_rate: fps,
            }),
            audio: audio.then(|| AudioStreamInfo {
                codec: "aac".to_string(),
                sample_rate: 48000,
            }),
            file_size: 0,
        }
    }

    #[test]
    fn test_within_tolerance() {
        let result = ClipVerifier::default().check(&info(5.02, 30.0, true), 5.0);
        assert!(result.success);
        assert!(result.accuracy > 0.99);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_frame_allowance() {
        let verifier = ClipVerifier::default();
        // 0.1s plus one 25fps frame
        assert!((verifier.allowed_drift(&info(5.0, 25.0, true)) - 0.14).abs() < 1e-9);
        assert!(verifier.check(&info(5.13, 25.0, true), 5.0).success);
        assert!(!verifier.check(&info(5.2, 25.0, true), 5.0).success);
    }

    #[test]
    fn test_missing_audio_fails() {
        let result = ClipVerifier::default().check(&info(5.0, 30.0, false), 5.0);
        assert!(!result.success);
        assert!(!result.streams_present);
    }

    #[test]
    fn test_zero_expected_duration() {
        let result = ClipVerifier::new(0.5).check(&info(0.0, 0.0, true), 0.0);
        assert!(result.success);
        assert_eq!(result.accuracy, 1.0);
    }
}
