//! Scoped engine access with guaranteed scrubbing
//!
//! A [`Session`] holds the engine lock for the synchronous part of one
//! operation. Slots registered as secret are zeroed, together with the
//! engine's scratch region, when the session is dropped. The drop runs on
//! success, on early return and while unwinding.

use edgate_api::{Engine, Slot};
use edgate_common::barrier;
use parking_lot::MutexGuard;

use crate::handle::EngineHandle;
use crate::layout::{BufferLayout, SlotKind};
use crate::lifecycle::Instance;

pub(crate) struct Session<'a> {
    handle: MutexGuard<'a, EngineHandle>,
    layout: &'a BufferLayout,
    scrub: bool,
    secrets: Vec<Slot>,
}

impl<'a> Session<'a> {
    /// Lock the engine for one operation
    pub fn open(instance: &'a Instance) -> Self {
        Self {
            handle: instance.engine.lock(),
            layout: &instance.layout,
            scrub: instance.remove_private_key_traces,
            secrets: Vec::with_capacity(2),
        }
    }

    pub fn slot(&self, kind: SlotKind) -> Slot {
        self.layout.slot(kind)
    }

    /// The slot for `kind`, registered for scrubbing
    ///
    /// Register before writing so that a failure during copy-in still
    /// leaves nothing behind.
    pub fn secret(&mut self, kind: SlotKind) -> Slot {
        let slot = self.layout.slot(kind);
        self.protect(slot)
    }

    /// Register an arbitrary slot for scrubbing
    pub fn protect(&mut self, slot: Slot) -> Slot {
        self.secrets.push(slot);
        slot
    }

    pub fn write(&mut self, slot: Slot, bytes: &[u8]) {
        self.handle.write(slot, bytes);
    }

    pub fn read(&self, slot: Slot, out: &mut [u8]) {
        self.handle.read(slot, out);
    }

    /// Run one primitive against the engine
    pub fn invoke<T>(&mut self, primitive: impl FnOnce(&mut dyn Engine) -> T) -> T {
        let engine = self.handle.engine_mut();
        barrier::with_barriers(|| primitive(engine))
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if !self.scrub {
            return;
        }
        for slot in self.secrets.drain(..) {
            self.handle.scrub(slot);
        }
        self.handle.scrub_scratch();
    }
}
