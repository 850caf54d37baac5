//! Pre-use gateway configuration

use edgate_api::ArtifactLocation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings fixed at the moment the engine starts loading
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GatewayConfig {
    /// Where the loader finds the engine artifact
    pub artifact: ArtifactLocation,
    /// Zero secret slots and engine scratch after every operation
    pub remove_private_key_traces: bool,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artifact location
    pub fn with_artifact(mut self, artifact: ArtifactLocation) -> Self {
        self.artifact = artifact;
        self
    }

    /// Enable or disable scrubbing of secret traces
    ///
    /// Only trusted, performance-sensitive environments should turn this
    /// off: secret slots and engine scratch are then left as the last
    /// operation wrote them.
    pub fn with_private_key_trace_removal(mut self, enabled: bool) -> Self {
        self.remove_private_key_traces = enabled;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            artifact: ArtifactLocation::default(),
            remove_private_key_traces: true,
        }
    }
}
