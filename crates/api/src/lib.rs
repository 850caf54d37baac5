//! Public API traits and types for the edgate gateway
//!
//! This crate provides the seams shared by every edgate component: the
//! error taxonomy, the primitive [`Engine`] interface a curve engine must
//! expose, the [`ArtifactLoader`] capability that brings an engine up, and
//! the small value types (`Slot`, `MemoryRegion`, `ArtifactLocation`) that
//! travel between them.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Expected, Result};
pub use types::*;

pub use traits::{ArtifactLoader, Engine};

// Re-export trait modules for direct access
pub use traits::{engine, loader};
