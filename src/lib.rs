//! # edgate
//!
//! A secure operation gateway over an Ed25519 signature and key-exchange
//! engine.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! edgate = "0.3"
//! ```
//!
//! ## Features
//!
//! - `software-engine` (default): bundle the reference engine and its loader
//! - `serde`: serialize and deserialize [`GatewayConfig`](gateway::GatewayConfig)
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`edgate-api`]: Error types, the engine and loader traits, slot types
//! - [`edgate-params`]: Entity sizes and engine memory defaults
//! - [`edgate-common`]: Secret buffers and memory scrubbing
//! - [`edgate-gateway`]: The operation gateway
//! - [`edgate-engine`]: The reference software engine
//!
//! ## Example
//!
//! ```
//! use edgate::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let gateway = Gateway::new(SoftwareLoader::new());
//! let alice = gateway.generate_key_pair(&SecretBuffer::new([1u8; 32])).await?;
//! let bob = gateway.generate_key_pair(&SecretBuffer::new([2u8; 32])).await?;
//!
//! let mut ab = [0u8; 32];
//! let mut ba = [0u8; 32];
//! gateway.key_exchange(&mut ab, &bob.public_key, alice.private_key.as_slice()).await?;
//! gateway.key_exchange(&mut ba, &alice.public_key, bob.private_key.as_slice()).await?;
//! assert_eq!(ab, ba);
//! # Ok(())
//! # }
//! ```

// Core re-exports (always available)
pub use edgate_api as api;
pub use edgate_common as common;
pub use edgate_internal as internal;
pub use edgate_params as params;
pub use edgate_gateway as gateway;

// Feature-gated re-exports
#[cfg(feature = "software-engine")]
pub use edgate_engine as engine;

/// Common imports for edgate users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{ArtifactLoader, ArtifactLocation, Engine};

    // Re-export the gateway surface
    pub use crate::gateway::{Gateway, GatewayConfig, KeyPair, LifecycleState, SlotKind};

    // Re-export security types
    pub use crate::common::SecretBuffer;
    pub use zeroize::Zeroize;

    #[cfg(feature = "software-engine")]
    pub use crate::engine::SoftwareLoader;
}
