//! Borrowing of C string arguments passed by compiled call sites.

use core::ffi::{CStr, c_char};

/// Rendered in place of a null string argument in diagnostics.
pub(crate) const NULL_PLACEHOLDER: &[u8] = b"(null)";

/// Borrow a null-terminated argument, mapping the null sentinel to `None`.
///
/// # Safety
///
/// `ptr` must be null or point to a null-terminated byte sequence that stays
/// valid and unmodified for `'a`.
pub(crate) unsafe fn borrow<'a>(ptr: *const c_char) -> Option<&'a CStr> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) })
    }
}

/// Bytes of `s` without the terminator, or [`NULL_PLACEHOLDER`].
pub(crate) fn bytes_or_placeholder(s: Option<&CStr>) -> &[u8] {
    s.map_or(NULL_PLACEHOLDER, CStr::to_bytes)
}
