//! Primitive interface of a curve engine
//!
//! An engine owns one contiguous memory arena. Every primitive reads its
//! inputs from, and writes its outputs to, [`Slot`]s inside that arena; no
//! primitive allocates on the caller's behalf or retains anything between
//! calls. Intermediate secrets an engine produces while computing land in its
//! scratch region, which callers are expected to scrub.
//!
//! Implementations are assumed correct and constant-time. They may assume
//! that every slot they receive lies inside the arena and has the length the
//! primitive documents; the gateway validates this before calling.

use crate::types::{MemoryRegion, Slot};

/// Black-box Ed25519 engine reached through fixed-slot primitives
pub trait Engine: Send {
    /// Returns the name of this engine
    fn name(&self) -> &'static str;

    /// Statically reserved region that slots are carved from
    fn memory_region(&self) -> MemoryRegion;

    /// The whole arena
    fn memory(&self) -> &[u8];

    /// The whole arena, mutably
    fn memory_mut(&mut self) -> &mut [u8];

    /// Scratch space where the engine leaves intermediate values
    fn scratch_mut(&mut self) -> &mut [u8];

    /// Compute the 32-byte public key for a 64-byte private key
    fn public_key_derive(&mut self, out_public_key: Slot, private_key: Slot);

    /// Expand a 32-byte seed into a 64-byte private key and its public key
    fn create_keypair(&mut self, out_public_key: Slot, out_private_key: Slot, seed: Slot);

    /// Produce a 64-byte detached signature over `message`
    fn sign(&mut self, out_signature: Slot, message: Slot, public_key: Slot, private_key: Slot);

    /// Check a signature; returns `true` only if it is valid
    fn verify(&mut self, signature: Slot, message: Slot, public_key: Slot) -> bool;

    /// Add a scalar to either or both halves of a key pair, in place
    ///
    /// `None` skips that half. Returns `false`, having written nothing, if
    /// the public key does not decode to a curve point.
    fn add_scalar(&mut self, public_key: Option<Slot>, private_key: Option<Slot>, scalar: Slot) -> bool;

    /// Compute a 32-byte shared secret from a public and a private key
    ///
    /// Returns `false`, having written nothing, if the public key does not
    /// decode to a curve point.
    fn key_exchange(&mut self, out_shared_secret: Slot, public_key: Slot, private_key: Slot) -> bool;

    /// Compute the 64-byte SHA-512 digest of `message`
    fn sha512(&mut self, out_digest: Slot, message: Slot);
}
