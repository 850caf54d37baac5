//! Loader that instantiates the software engine in process

use async_trait::async_trait;
use edgate_api::{ArtifactLoader, ArtifactLocation, Engine, Result};
use edgate_params::DEFAULT_STATIC_MEMORY_SIZE;
use tracing::debug;

use crate::software::SoftwareEngine;

/// Brings up a [`SoftwareEngine`]
///
/// The software engine is compiled in, so the artifact location is only
/// recorded in the logs.
#[derive(Debug, Clone)]
pub struct SoftwareLoader {
    static_memory_size: usize,
}

impl SoftwareLoader {
    /// Loader producing engines with the default static region
    pub fn new() -> Self {
        Self {
            static_memory_size: DEFAULT_STATIC_MEMORY_SIZE,
        }
    }

    /// Set the static region size of engines this loader produces
    pub fn with_static_memory_size(mut self, size: usize) -> Self {
        self.static_memory_size = size;
        self
    }
}

impl Default for SoftwareLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactLoader for SoftwareLoader {
    async fn load(&self, artifact: &ArtifactLocation) -> Result<Box<dyn Engine>> {
        debug!(
            path = %artifact.path,
            dependencies_path = %artifact.dependencies_path,
            static_memory_size = self.static_memory_size,
            "instantiating software engine"
        );
        Ok(Box::new(SoftwareEngine::with_static_size(self.static_memory_size)))
    }
}
