//! Artifact loading capability
//!
//! How an engine is obtained (compiled in, read from disk, fetched) is a
//! property of the host, not of the gateway. The gateway is handed a loader
//! at construction and calls it at most once.

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::Engine;
use crate::types::ArtifactLocation;

/// Brings an engine up from an artifact location
#[async_trait]
pub trait ArtifactLoader: Send + Sync {
    /// Load and initialize an engine
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineLoad`](crate::Error::EngineLoad) if the
    /// artifact cannot be obtained or instantiated.
    async fn load(&self, artifact: &ArtifactLocation) -> Result<Box<dyn Engine>>;
}
