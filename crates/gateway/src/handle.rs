//! Owned handle to a loaded engine

use edgate_api::{Engine, Error, MemoryRegion, Result, Slot};
use edgate_common::{is_zeroed, secure_zero};

/// Exclusive owner of a loaded engine
///
/// All arena access from the gateway goes through this handle. Slots passed
/// in are assumed to come from a layout computed against the same engine.
pub(crate) struct EngineHandle {
    engine: Box<dyn Engine>,
}

impl EngineHandle {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self { engine }
    }

    pub fn name(&self) -> &'static str {
        self.engine.name()
    }

    /// The engine's static region, checked against its arena
    ///
    /// Fails with [`Error::EngineCapacity`] if the region reaches past the
    /// end of the arena.
    pub fn memory_region(&self) -> Result<MemoryRegion> {
        let region = self.engine.memory_region();
        let available = self.engine.memory().len();
        match region.start.checked_add(region.size) {
            Some(end) if end <= available => Ok(region),
            end => Err(Error::EngineCapacity {
                required: end.unwrap_or(usize::MAX),
                available,
            }),
        }
    }

    pub fn engine_mut(&mut self) -> &mut dyn Engine {
        self.engine.as_mut()
    }

    /// Copy `bytes` into `slot`; lengths must match
    pub fn write(&mut self, slot: Slot, bytes: &[u8]) {
        self.engine.memory_mut()[slot.range()].copy_from_slice(bytes);
    }

    /// Copy the contents of `slot` into `out`; lengths must match
    pub fn read(&self, slot: Slot, out: &mut [u8]) {
        out.copy_from_slice(&self.engine.memory()[slot.range()]);
    }

    pub fn scrub(&mut self, slot: Slot) {
        secure_zero(&mut self.engine.memory_mut()[slot.range()]);
    }

    pub fn scrub_scratch(&mut self) {
        secure_zero(self.engine.scratch_mut());
    }

    pub fn is_zeroed(&self, slot: Slot) -> bool {
        is_zeroed(&self.engine.memory()[slot.range()])
    }

    pub fn scratch_is_zeroed(&mut self) -> bool {
        is_zeroed(self.engine.scratch_mut())
    }
}
