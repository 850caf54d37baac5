//! Exactly-once engine bring-up
//!
//! The gateway moves through `Uninitialized -> Loading -> Ready`, or ends
//! in `Failed`. The first caller needing the engine installs one shared
//! load future; everyone arriving while it runs awaits a clone of that same
//! future. Once it resolves the outcome is cached, so a failed bring-up is
//! reported identically to every later caller and never retried.
//!
//! The shared future lives in the state itself rather than in any caller,
//! so cancelling every waiter does not lose the load: the next caller picks
//! up where the last one stopped polling.

use std::sync::Arc;

use edgate_api::{ArtifactLoader, Error, Result};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::{error, info};

use crate::config::GatewayConfig;
use crate::handle::EngineHandle;
use crate::layout::BufferLayout;

/// Everything a ready gateway operates on
pub(crate) struct Instance {
    pub engine_name: &'static str,
    pub engine: Mutex<EngineHandle>,
    pub layout: BufferLayout,
    pub remove_private_key_traces: bool,
}

type LoadFuture = Shared<BoxFuture<'static, Result<Arc<Instance>>>>;

enum State {
    Uninitialized(GatewayConfig),
    Loading(LoadFuture),
    Ready(Arc<Instance>),
    Failed(Error),
}

/// Observable phase of the gateway lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Nothing has requested the engine yet; configuration is mutable
    Uninitialized,
    /// Bring-up is in flight
    Loading,
    /// Operations may run
    Ready,
    /// Bring-up failed; every operation reports the cached error
    Failed,
}

pub(crate) struct Lifecycle {
    loader: Arc<dyn ArtifactLoader>,
    state: Mutex<State>,
}

impl Lifecycle {
    pub fn new(loader: Arc<dyn ArtifactLoader>, config: GatewayConfig) -> Self {
        Self {
            loader,
            state: Mutex::new(State::Uninitialized(config)),
        }
    }

    pub fn state(&self) -> LifecycleState {
        match &*self.state.lock() {
            State::Uninitialized(_) => LifecycleState::Uninitialized,
            State::Loading(_) => LifecycleState::Loading,
            State::Ready(_) => LifecycleState::Ready,
            State::Failed(_) => LifecycleState::Failed,
        }
    }

    /// Modify the configuration while nothing has started loading
    pub fn configure(&self, context: &'static str, update: impl FnOnce(&mut GatewayConfig)) -> Result<()> {
        match &mut *self.state.lock() {
            State::Uninitialized(config) => {
                update(config);
                Ok(())
            }
            _ => Err(Error::ConfigurationLocked { context }),
        }
    }

    /// Wait until the engine is ready, starting bring-up if needed
    pub async fn ready(&self) -> Result<Arc<Instance>> {
        let pending = {
            let mut state = self.state.lock();
            match &*state {
                State::Ready(instance) => return Ok(Arc::clone(instance)),
                State::Failed(error) => return Err(error.clone()),
                State::Loading(pending) => pending.clone(),
                State::Uninitialized(config) => {
                    info!(
                        path = %config.artifact.path,
                        dependencies_path = %config.artifact.dependencies_path,
                        "engine bring-up started"
                    );
                    let pending = bring_up(Arc::clone(&self.loader), config.clone())
                        .boxed()
                        .shared();
                    *state = State::Loading(pending.clone());
                    pending
                }
            }
        };

        let outcome = pending.await;
        self.settle(&outcome);
        outcome
    }

    /// Replace a finished load with its cached outcome
    fn settle(&self, outcome: &Result<Arc<Instance>>) {
        let mut state = self.state.lock();
        if !matches!(*state, State::Loading(_)) {
            return;
        }
        *state = match outcome {
            Ok(instance) => {
                info!(
                    engine = instance.engine_name,
                    message_capacity = instance.layout.message_capacity(),
                    "engine ready"
                );
                State::Ready(Arc::clone(instance))
            }
            Err(cause) => {
                error!(error = %cause, "engine bring-up failed");
                State::Failed(cause.clone())
            }
        };
    }
}

async fn bring_up(loader: Arc<dyn ArtifactLoader>, config: GatewayConfig) -> Result<Arc<Instance>> {
    let engine = loader.load(&config.artifact).await?;
    let handle = EngineHandle::new(engine);
    let region = handle.memory_region()?;
    let layout = BufferLayout::compute(region)?;

    Ok(Arc::new(Instance {
        engine_name: handle.name(),
        engine: Mutex::new(handle),
        layout,
        remove_private_key_traces: config.remove_private_key_traces,
    }))
}
