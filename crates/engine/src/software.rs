//! In-process engine backed by a heap arena

use edgate_api::{Engine, MemoryRegion, Slot};
use edgate_params::{
    DEFAULT_SCRATCH_SIZE, DEFAULT_STATIC_MEMORY_SIZE, ED25519_DIGEST_SIZE,
    ED25519_PRIVATE_KEY_SIZE, ED25519_PUBLIC_KEY_SIZE, ED25519_SHARED_SECRET_SIZE,
    ED25519_SIGNATURE_SIZE, ENGINE_RESERVED_PREFIX,
};
use zeroize::Zeroizing;

use crate::operations::{self, SCRATCH_REQUIRED};

/// Ed25519 engine computing in process
///
/// The arena is `ENGINE_RESERVED_PREFIX` bytes the engine keeps for itself
/// followed by the static region handed to the gateway. Scratch lives in a
/// separate allocation so primitives can borrow it alongside the arena.
pub struct SoftwareEngine {
    memory: Box<[u8]>,
    region: MemoryRegion,
    scratch: Box<[u8]>,
}

impl SoftwareEngine {
    /// Create an engine with the default static region size
    pub fn new() -> Self {
        Self::with_static_size(DEFAULT_STATIC_MEMORY_SIZE)
    }

    /// Create an engine whose static region is `size` bytes
    pub fn with_static_size(size: usize) -> Self {
        Self {
            memory: vec![0u8; ENGINE_RESERVED_PREFIX + size].into_boxed_slice(),
            region: MemoryRegion::new(ENGINE_RESERVED_PREFIX, size),
            scratch: vec![0u8; DEFAULT_SCRATCH_SIZE.max(SCRATCH_REQUIRED)].into_boxed_slice(),
        }
    }

    fn bytes(&self, slot: Slot) -> &[u8] {
        &self.memory[slot.range()]
    }

    fn write(&mut self, slot: Slot, bytes: &[u8]) {
        self.memory[slot.range()].copy_from_slice(&bytes[..slot.len()]);
    }
}

impl Default for SoftwareEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for SoftwareEngine {
    fn name(&self) -> &'static str {
        "software"
    }

    fn memory_region(&self) -> MemoryRegion {
        self.region
    }

    fn memory(&self) -> &[u8] {
        &self.memory
    }

    fn memory_mut(&mut self) -> &mut [u8] {
        &mut self.memory
    }

    fn scratch_mut(&mut self) -> &mut [u8] {
        &mut self.scratch
    }

    fn public_key_derive(&mut self, out_public_key: Slot, private_key: Slot) {
        let mut public_key = [0u8; ED25519_PUBLIC_KEY_SIZE];
        operations::derive_public_key(
            &mut public_key,
            &self.memory[private_key.range()],
            &mut self.scratch,
        );
        self.write(out_public_key, &public_key);
    }

    fn create_keypair(&mut self, out_public_key: Slot, out_private_key: Slot, seed: Slot) {
        let mut public_key = [0u8; ED25519_PUBLIC_KEY_SIZE];
        let mut private_key = Zeroizing::new([0u8; ED25519_PRIVATE_KEY_SIZE]);
        operations::create_keypair(
            &mut public_key,
            private_key.as_mut_slice(),
            &self.memory[seed.range()],
            &mut self.scratch,
        );
        self.write(out_public_key, &public_key);
        self.write(out_private_key, private_key.as_slice());
    }

    fn sign(&mut self, out_signature: Slot, message: Slot, public_key: Slot, private_key: Slot) {
        let mut signature = [0u8; ED25519_SIGNATURE_SIZE];
        operations::sign(
            &mut signature,
            &self.memory[message.range()],
            &self.memory[public_key.range()],
            &self.memory[private_key.range()],
            &mut self.scratch,
        );
        self.write(out_signature, &signature);
    }

    fn verify(&mut self, signature: Slot, message: Slot, public_key: Slot) -> bool {
        operations::verify(
            self.bytes(signature),
            self.bytes(message),
            self.bytes(public_key),
        )
    }

    fn add_scalar(&mut self, public_key: Option<Slot>, private_key: Option<Slot>, scalar: Slot) -> bool {
        let mut public_bytes = public_key.map(|slot| {
            let mut bytes = [0u8; ED25519_PUBLIC_KEY_SIZE];
            bytes.copy_from_slice(self.bytes(slot));
            bytes
        });
        let mut private_bytes = private_key.map(|slot| {
            let mut bytes = Zeroizing::new([0u8; ED25519_PRIVATE_KEY_SIZE]);
            bytes.copy_from_slice(self.bytes(slot));
            bytes
        });

        let applied = operations::add_scalar(
            public_bytes.as_mut().map(|bytes| &mut bytes[..]),
            private_bytes.as_mut().map(|bytes| &mut bytes[..]),
            &self.memory[scalar.range()],
            &mut self.scratch,
        );
        if !applied {
            return false;
        }

        if let (Some(slot), Some(bytes)) = (public_key, public_bytes) {
            self.write(slot, &bytes);
        }
        if let (Some(slot), Some(bytes)) = (private_key, private_bytes) {
            self.write(slot, bytes.as_slice());
        }
        true
    }

    fn key_exchange(&mut self, out_shared_secret: Slot, public_key: Slot, private_key: Slot) -> bool {
        let mut shared_secret = Zeroizing::new([0u8; ED25519_SHARED_SECRET_SIZE]);
        let exchanged = operations::key_exchange(
            shared_secret.as_mut_slice(),
            &self.memory[public_key.range()],
            &self.memory[private_key.range()],
            &mut self.scratch,
        );
        if exchanged {
            self.write(out_shared_secret, shared_secret.as_slice());
        }
        exchanged
    }

    fn sha512(&mut self, out_digest: Slot, message: Slot) {
        let mut digest = Zeroizing::new([0u8; ED25519_DIGEST_SIZE]);
        operations::sha512(digest.as_mut_slice(), self.bytes(message));
        self.write(out_digest, digest.as_slice());
    }
}
