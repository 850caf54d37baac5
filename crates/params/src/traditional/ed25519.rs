//! Constants for Ed25519 key material and engine memory

use crate::utils::hash::SHA512_OUTPUT_SIZE;

/// Size of a key-pair seed in bytes
pub const ED25519_SEED_SIZE: usize = 32;

/// Size of a compressed public key in bytes
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;

/// Size of an expanded private key in bytes
///
/// The clamped scalar (32 bytes) followed by the nonce prefix (32 bytes),
/// both taken from SHA-512 of the seed.
pub const ED25519_PRIVATE_KEY_SIZE: usize = 64;

/// Size of a detached signature (R || S) in bytes
pub const ED25519_SIGNATURE_SIZE: usize = 64;

/// Size of a blinding scalar in bytes
pub const ED25519_SCALAR_SIZE: usize = 32;

/// Size of a key-exchange shared secret in bytes
pub const ED25519_SHARED_SECRET_SIZE: usize = 32;

/// Size of a digest produced by the engine's hash primitive
pub const ED25519_DIGEST_SIZE: usize = SHA512_OUTPUT_SIZE;

/// Total size of every fixed-width slot an engine must host
pub const FIXED_SLOTS_SIZE: usize = ED25519_SEED_SIZE
    + ED25519_PUBLIC_KEY_SIZE
    + ED25519_PRIVATE_KEY_SIZE
    + ED25519_SIGNATURE_SIZE
    + ED25519_SCALAR_SIZE
    + ED25519_SHARED_SECRET_SIZE;

/// Default size of the software engine's static region
pub const DEFAULT_STATIC_MEMORY_SIZE: usize = 16 * 1024;

/// Default size of the software engine's scratch region
pub const DEFAULT_SCRATCH_SIZE: usize = 512;

/// Bytes the software engine reserves ahead of its static region
pub const ENGINE_RESERVED_PREFIX: usize = 1024;
