//! Heap primitives over the host C allocator.
//!
//! Blocks come straight from `malloc`/`calloc`/`realloc`, so they are
//! interchangeable with C code linked into the same program. Nothing is
//! tracked, zeroed (except by [`aurora_alloc_zeroed`]) or poisoned, and size
//! zero is handed to the host unchanged.

use core::ffi::c_void;

/// Allocate an uninitialized block of at least `size` bytes.
///
/// Returns null on failure. For `size == 0` the result is whatever the host
/// `malloc(0)` returns.
///
/// # Safety
///
/// The returned block is uninitialized. Caller must release it with
/// [`aurora_free`] or resize it with [`aurora_realloc`], and nothing else.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_alloc(size: usize) -> *mut c_void {
    unsafe { libc::malloc(size) }
}

/// Allocate a block of at least `size` bytes with every byte set to zero.
///
/// # Safety
///
/// Same ownership contract as [`aurora_alloc`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_alloc_zeroed(size: usize) -> *mut c_void {
    unsafe { libc::calloc(1, size) }
}

/// Release a block. Null is a no-op.
///
/// # Safety
///
/// `ptr` must be null or a live block returned by this runtime's allocation
/// functions. Freeing twice is undefined.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_free(ptr: *mut c_void) {
    unsafe { libc::free(ptr) }
}

/// Resize a block to `size` bytes, preserving the first `min(old, size)`
/// bytes.
///
/// A null `ptr` behaves like [`aurora_alloc`]. On failure null is returned
/// and the original block is left untouched and still owned by the caller.
///
/// # Safety
///
/// `ptr` must be null or a live block returned by this runtime's allocation
/// functions. On success the old pointer must no longer be used.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_realloc(ptr: *mut c_void, size: usize) -> *mut c_void {
    unsafe { libc::realloc(ptr, size) }
}
