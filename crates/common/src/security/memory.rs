//! Memory scrubbing patterns
//!
//! Helpers for overwriting buffers that held secret material and for
//! checking, without branching on the contents, that they are clear.

use edgate_internal::constant_time::ct_is_zero;
use zeroize::Zeroize;

/// Overwrite `data` with zeros
///
/// Uses volatile writes so the compiler cannot elide the store, followed by
/// a compiler fence so later reads of the same memory are not reordered
/// ahead of it.
pub fn secure_zero(data: &mut [u8]) {
    data.zeroize();
    barrier::compiler_fence_seq_cst();
}

/// Check in constant time that every byte of `data` is zero
pub fn is_zeroed(data: &[u8]) -> bool {
    ct_is_zero(data)
}

/// Memory barrier utilities
pub mod barrier {
    use core::sync::atomic::{compiler_fence, Ordering};

    /// Insert a compiler fence to prevent reordering
    #[inline(always)]
    pub fn compiler_fence_seq_cst() {
        compiler_fence(Ordering::SeqCst);
    }

    /// Execute a closure with memory barriers before and after
    #[inline(always)]
    pub fn with_barriers<T, F: FnOnce() -> T>(f: F) -> T {
        compiler_fence_seq_cst();
        let result = f();
        compiler_fence_seq_cst();
        result
    }
}
