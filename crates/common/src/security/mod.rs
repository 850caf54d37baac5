//! Security primitives and memory safety utilities
//!
//! This module provides foundational security types and patterns used
//! throughout edgate to ensure proper handling of sensitive material.

pub mod memory;
pub mod secret;

// Re-export core security types
pub use secret::SecretBuffer;
