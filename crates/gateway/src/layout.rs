//! Partitioning of the engine's static region into fixed slots

use edgate_api::error::validate;
use edgate_api::{Error, MemoryRegion, Result, Slot};
use edgate_params::{
    ED25519_PRIVATE_KEY_SIZE, ED25519_PUBLIC_KEY_SIZE, ED25519_SCALAR_SIZE, ED25519_SEED_SIZE,
    ED25519_SHARED_SECRET_SIZE, ED25519_SIGNATURE_SIZE, FIXED_SLOTS_SIZE,
};

/// Named slot inside the engine's static region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Seed,
    PublicKey,
    PrivateKey,
    Signature,
    Scalar,
    SharedSecret,
    /// Variable-length slot absorbing the rest of the region
    Message,
}

impl SlotKind {
    /// Every slot, in layout order
    pub const ALL: [SlotKind; 7] = [
        SlotKind::Seed,
        SlotKind::PublicKey,
        SlotKind::PrivateKey,
        SlotKind::Signature,
        SlotKind::Scalar,
        SlotKind::SharedSecret,
        SlotKind::Message,
    ];

    /// Width of the slot, or `None` for the message slot
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            SlotKind::Seed => Some(ED25519_SEED_SIZE),
            SlotKind::PublicKey => Some(ED25519_PUBLIC_KEY_SIZE),
            SlotKind::PrivateKey => Some(ED25519_PRIVATE_KEY_SIZE),
            SlotKind::Signature => Some(ED25519_SIGNATURE_SIZE),
            SlotKind::Scalar => Some(ED25519_SCALAR_SIZE),
            SlotKind::SharedSecret => Some(ED25519_SHARED_SECRET_SIZE),
            SlotKind::Message => None,
        }
    }
}

/// Fixed slot assignment for one engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BufferLayout {
    slots: [Slot; 7],
}

impl BufferLayout {
    /// Lay the slots out from the start of `region`
    ///
    /// Fails with [`Error::EngineCapacity`] if the fixed slots do not fit.
    pub fn compute(region: MemoryRegion) -> Result<Self> {
        if region.size < FIXED_SLOTS_SIZE {
            return Err(Error::EngineCapacity {
                required: FIXED_SLOTS_SIZE,
                available: region.size,
            });
        }

        let mut slots = [Slot::new(region.start, 0); 7];
        let mut cursor = region.start;
        for (slot, kind) in slots.iter_mut().zip(SlotKind::ALL) {
            let len = kind.fixed_size().unwrap_or(region.end() - cursor);
            *slot = Slot::new(cursor, len);
            cursor += len;
        }
        Ok(Self { slots })
    }

    pub fn slot(&self, kind: SlotKind) -> Slot {
        self.slots[kind as usize]
    }

    pub fn message_capacity(&self) -> usize {
        self.slot(SlotKind::Message).len()
    }

    /// Leading `len` bytes of the message slot
    pub fn message(&self, len: usize) -> Result<Slot> {
        let message = self.slot(SlotKind::Message);
        validate::max_length("message", len, message.len())?;
        message
            .prefix(len)
            .ok_or_else(|| Error::illegal_argument("message", "exceeds the message slot"))
    }
}
