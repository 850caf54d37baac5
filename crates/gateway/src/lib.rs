//! Secure operation gateway over an Ed25519 engine
//!
//! The [`Gateway`] is the only way callers reach an engine. It brings the
//! engine up exactly once, validates every buffer before it touches engine
//! memory, maps each operation onto a single engine primitive and zeroes
//! every slot that held secret material once the primitive returns.
//!
//! Engines are supplied by an [`ArtifactLoader`](edgate_api::ArtifactLoader);
//! the gateway never names a concrete engine.

mod config;
mod gateway;
mod handle;
mod layout;
mod lifecycle;
mod session;

pub use config::GatewayConfig;
pub use gateway::{Gateway, KeyPair};
pub use layout::SlotKind;
pub use lifecycle::LifecycleState;
