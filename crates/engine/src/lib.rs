//! Reference software engine for the edgate gateway
//!
//! [`SoftwareEngine`] implements the [`Engine`](edgate_api::Engine)
//! primitive interface on top of `curve25519-dalek` and `sha2`, and
//! [`SoftwareLoader`] hands one out through the
//! [`ArtifactLoader`](edgate_api::ArtifactLoader) seam.
//!
//! # Examples
//!
//! ```
//! use edgate_api::{Engine, Slot};
//! use edgate_engine::SoftwareEngine;
//!
//! let mut engine = SoftwareEngine::new();
//! let start = engine.memory_region().start;
//! let (seed, public_key, private_key) = (
//!     Slot::new(start, 32),
//!     Slot::new(start + 32, 32),
//!     Slot::new(start + 64, 64),
//! );
//! engine.memory_mut()[seed.range()].copy_from_slice(&[7u8; 32]);
//! engine.create_keypair(public_key, private_key, seed);
//! ```

pub mod loader;
pub mod operations;
pub mod software;

pub use loader::SoftwareLoader;
pub use software::SoftwareEngine;
