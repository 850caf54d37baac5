//! Value types shared between the gateway and engines
//!
//! Engine memory is modelled as one owned arena addressed by offsets. A
//! [`Slot`] is a named, fixed view into that arena; a [`MemoryRegion`]
//! describes the statically reserved part of the arena that slots are carved
//! from.

use core::fmt;
use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-offset view into an engine's memory arena
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    offset: usize,
    len: usize,
}

impl Slot {
    /// Create a slot covering `len` bytes starting at `offset`
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Offset of the first byte inside the arena
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes covered by the slot
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the slot covers no bytes
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte covered by the slot
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Byte range of the slot, usable to index the arena
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// The leading `len` bytes of this slot
    ///
    /// Returns `None` if `len` exceeds the slot.
    pub const fn prefix(&self, len: usize) -> Option<Slot> {
        if len > self.len {
            return None;
        }
        Some(Slot { offset: self.offset, len })
    }

    /// Whether two slots share at least one byte
    pub const fn overlaps(&self, other: &Slot) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({:#x}..{:#x})", self.offset, self.end())
    }
}

/// Statically reserved scratch region of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    /// Offset of the region inside the engine arena
    pub start: usize,
    /// Size of the region in bytes
    pub size: usize,
}

impl MemoryRegion {
    /// Create a region descriptor
    pub const fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// One past the last byte of the region
    pub const fn end(&self) -> usize {
        self.start + self.size
    }
}

/// Where an engine artifact and its dependencies are found
///
/// Loaders interpret the two paths however suits them; the gateway only
/// stores them and hands them over when bring-up starts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArtifactLocation {
    /// Location of the engine artifact itself
    pub path: String,
    /// Location of resources the artifact depends on
    pub dependencies_path: String,
}

/// Default artifact directory
pub const DEFAULT_ARTIFACT_PATH: &str = "./dist/";

impl ArtifactLocation {
    /// Use the same location for the artifact and its dependencies
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            dependencies_path: path.clone(),
            path,
        }
    }

    /// Use distinct locations for the artifact and its dependencies
    pub fn with_dependencies(path: impl Into<String>, dependencies_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            dependencies_path: dependencies_path.into(),
        }
    }
}

impl Default for ArtifactLocation {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT_PATH)
    }
}
