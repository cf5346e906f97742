//! Output verification module

use serde::{Deserialize, Serialize};

pub mod verifier;

pub use verifier::ClipVerifier;

/// Output verification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Verification passed
    pub success: bool,
    /// Expected duration in seconds
    pub expected: f64,
    /// Probed duration in seconds
    pub actual: f64,
    /// `1 - |actual - expected| / expected`, clamped to `[0, 1]`
    pub accuracy: f64,
    /// Both a video and an audio stream are present
    pub streams_present: bool,
    /// Reason the check failed
    pub error: Option<String>,
}
