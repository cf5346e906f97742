// Verify interactor - Checks a written file against its expected duration

use std::path::Path;
use std::sync::Arc;

use crate::error::{ReelError, ReelResult};
use crate::output::{ClipVerifier, VerificationResult};
use crate::ports::ProbePort;

/// Interactor for output verification use case
pub struct VerifyInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl VerifyInteractor {
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Probe `path` and compare its duration to `expected` within `tolerance`
    pub async fn execute(
        &self,
        path: &Path,
        expected: f64,
        tolerance: f64,
    ) -> ReelResult<VerificationResult> {
        if !path.exists() {
            return Err(ReelError::ProbeError {
                path: path.to_path_buf(),
                message: "file does not exist".to_string(),
            });
        }

        ClipVerifier::new(tolerance)
            .verify(self.probe_port.as_ref(), path, expected)
            .await
    }
}
