//! Constant values for the edgate gateway
//!
//! Entity sizes are contract invariants: every buffer crossing the gateway
//! is checked against them before any byte reaches engine memory.

#![no_std]

pub mod traditional;
pub mod utils;

pub use traditional::ed25519::*;
pub use utils::hash::SHA512_OUTPUT_SIZE;
