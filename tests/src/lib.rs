//! Test doubles for the edgate gateway
//!
//! [`TestLoader`] wraps the software engine so tests can observe how often
//! the gateway loads and how many primitives it invokes, and can inject
//! slow loads, failures and malformed memory regions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use edgate_api::{ArtifactLoader, ArtifactLocation, Engine, Error, MemoryRegion, Result, Slot};
use edgate_engine::SoftwareEngine;
use edgate_params::DEFAULT_STATIC_MEMORY_SIZE;
use parking_lot::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Observations shared between a loader, its engines and the test
#[derive(Debug, Default)]
pub struct Counters {
    loads: AtomicUsize,
    primitive_calls: AtomicUsize,
    last_artifact: Mutex<Option<ArtifactLocation>>,
}

impl Counters {
    /// Number of times the loader ran
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of engine primitives invoked across all engines
    pub fn primitive_calls(&self) -> usize {
        self.primitive_calls.load(Ordering::SeqCst)
    }

    /// Artifact location handed to the most recent load
    pub fn last_artifact(&self) -> Option<ArtifactLocation> {
        self.last_artifact.lock().clone()
    }
}

/// Software engine that counts primitive calls
pub struct RecordingEngine {
    inner: SoftwareEngine,
    region: MemoryRegion,
    counters: Arc<Counters>,
}

impl RecordingEngine {
    fn record(&self) {
        self.counters.primitive_calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Engine for RecordingEngine {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn memory_region(&self) -> MemoryRegion {
        self.region
    }

    fn memory(&self) -> &[u8] {
        self.inner.memory()
    }

    fn memory_mut(&mut self) -> &mut [u8] {
        self.inner.memory_mut()
    }

    fn scratch_mut(&mut self) -> &mut [u8] {
        self.inner.scratch_mut()
    }

    fn public_key_derive(&mut self, out_public_key: Slot, private_key: Slot) {
        self.record();
        self.inner.public_key_derive(out_public_key, private_key)
    }

    fn create_keypair(&mut self, out_public_key: Slot, out_private_key: Slot, seed: Slot) {
        self.record();
        self.inner.create_keypair(out_public_key, out_private_key, seed)
    }

    fn sign(&mut self, out_signature: Slot, message: Slot, public_key: Slot, private_key: Slot) {
        self.record();
        self.inner.sign(out_signature, message, public_key, private_key)
    }

    fn verify(&mut self, signature: Slot, message: Slot, public_key: Slot) -> bool {
        self.record();
        self.inner.verify(signature, message, public_key)
    }

    fn add_scalar(&mut self, public_key: Option<Slot>, private_key: Option<Slot>, scalar: Slot) -> bool {
        self.record();
        self.inner.add_scalar(public_key, private_key, scalar)
    }

    fn key_exchange(&mut self, out_shared_secret: Slot, public_key: Slot, private_key: Slot) -> bool {
        self.record();
        self.inner.key_exchange(out_shared_secret, public_key, private_key)
    }

    fn sha512(&mut self, out_digest: Slot, message: Slot) {
        self.record();
        self.inner.sha512(out_digest, message)
    }
}

/// Configurable loader producing [`RecordingEngine`]s
#[derive(Clone)]
pub struct TestLoader {
    counters: Arc<Counters>,
    delay: Duration,
    static_memory_size: usize,
    region: Option<MemoryRegion>,
    failure: Option<String>,
}

impl TestLoader {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(Counters::default()),
            delay: Duration::ZERO,
            static_memory_size: DEFAULT_STATIC_MEMORY_SIZE,
            region: None,
            failure: None,
        }
    }

    /// Sleep this long before finishing each load
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_static_memory_size(mut self, size: usize) -> Self {
        self.static_memory_size = size;
        self
    }

    /// Report this region instead of the engine's real one
    pub fn with_region(mut self, region: MemoryRegion) -> Self {
        self.region = Some(region);
        self
    }

    /// Fail every load with `message`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }
}

impl Default for TestLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactLoader for TestLoader {
    async fn load(&self, artifact: &ArtifactLocation) -> Result<Box<dyn Engine>> {
        let attempt = self.counters.loads.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(attempt, path = %artifact.path, "test loader invoked");
        *self.counters.last_artifact.lock() = Some(artifact.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(Error::engine_load("test loader", message));
        }

        let inner = SoftwareEngine::with_static_size(self.static_memory_size);
        Ok(Box::new(RecordingEngine {
            region: self.region.unwrap_or_else(|| inner.memory_region()),
            inner,
            counters: Arc::clone(&self.counters),
        }))
    }
}

