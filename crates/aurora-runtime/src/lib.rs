//! Aurora runtime library.
//!
//! Provides the native primitives that compiled Aurora programs call into:
//! - Line-oriented output (`aurora_println`, `aurora_print`)
//! - Heap allocation over the host C heap (`aurora_alloc`, `aurora_free`, `aurora_realloc`,
//!   `aurora_alloc_zeroed`)
//! - Abortive termination with a one-line diagnostic (`aurora_panic` and friends)
//!
//! The runtime holds no state and defines no entry point. The Aurora code
//! generator emits `main`; this library is linked next to it and never needs
//! an init or teardown call.

use core::ffi::{CStr, c_char};

/// Emit a `tracing` event when the `trace` feature is enabled; expands to
/// nothing otherwise.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "trace")]
        tracing::$level!($($arg)*);
    };
}

mod cstr;
pub mod error;
pub mod heap;
pub mod panic;
pub mod print;
pub mod stream;

pub use error::{RuntimeError, RuntimeResult};
pub use heap::{aurora_alloc, aurora_alloc_zeroed, aurora_free, aurora_realloc};
pub use panic::{
    PanicMessage, PanicReport, aurora_panic, aurora_panic_bounds_check, aurora_panic_msg,
    aurora_panic_unwrap_err, aurora_panic_unwrap_none,
};
pub use print::{Terminator, aurora_print, aurora_println, write_text};
pub use stream::{HostStream, StreamKind};

// =============================================================================
// Version
// =============================================================================

/// Runtime version, taken from the crate manifest.
pub const RUNTIME_VERSION: &str = env!("CARGO_PKG_VERSION");

static RUNTIME_VERSION_CSTR: &CStr =
    match CStr::from_bytes_with_nul(concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes()) {
        Ok(version) => version,
        Err(_) => panic!("crate version contains an interior nul"),
    };

/// Returns the runtime version as a static null-terminated string.
///
/// The pointer refers to read-only data in the runtime image and must not be
/// freed.
#[unsafe(no_mangle)]
pub extern "C" fn aurora_runtime_version() -> *const c_char {
    RUNTIME_VERSION_CSTR.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_version() {
        assert!(!RUNTIME_VERSION.is_empty());
    }

    #[test]
    fn test_runtime_version_symbol_matches_manifest() {
        let ptr = aurora_runtime_version();
        assert!(!ptr.is_null());
        let version = unsafe { CStr::from_ptr(ptr) };
        assert_eq!(version.to_bytes(), RUNTIME_VERSION.as_bytes());
    }

    #[test]
    fn test_runtime_version_is_static() {
        assert_eq!(aurora_runtime_version(), aurora_runtime_version());
    }
}
