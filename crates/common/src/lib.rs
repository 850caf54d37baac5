//! Common implementations and shared functionality for the edgate gateway
//!
//! This crate provides the secret-holding types and memory-scrubbing
//! utilities used across edgate components.

pub mod security;

// Re-export core security types
pub use security::SecretBuffer;

// Re-export memory safety utilities
pub use security::memory::{barrier, is_zeroed, secure_zero};
