//! Line-oriented output primitives.
//!
//! Both entry points are fire-and-forget: a null string writes nothing and a
//! failed write is dropped. Flushing is left to the host stream.

use core::ffi::{CStr, c_char};
use std::io::Write;

use crate::cstr;
use crate::error::{RuntimeError, RuntimeResult};
use crate::stream::HostStream;

/// What follows the text bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminator {
    None,
    /// A single `0x0A` byte.
    Newline,
}

impl Terminator {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            Terminator::None => b"",
            Terminator::Newline => b"\n",
        }
    }
}

/// Write `text` verbatim followed by `terminator`.
///
/// `None` stands for the null sentinel and writes nothing at all, terminator
/// included. No encoding is assumed.
pub fn write_text<W: Write>(
    out: &mut W,
    text: Option<&CStr>,
    terminator: Terminator,
) -> RuntimeResult<()> {
    let Some(text) = text else {
        return Ok(());
    };
    out.write_all(text.to_bytes())
        .and_then(|()| out.write_all(terminator.as_bytes()))
        .map_err(RuntimeError::Write)
}

/// # Safety
///
/// `text` must be null or point to a null-terminated byte sequence valid for
/// the duration of the call.
#[cfg_attr(not(feature = "trace"), allow(unused_variables))]
unsafe fn print_to_stdout(text: *const c_char, terminator: Terminator) {
    let text = unsafe { cstr::borrow(text) };
    if text.is_none() {
        trace_event!(trace, ?terminator, "null string passed to print; ignored");
        return;
    }
    let result = write_text(&mut HostStream::stdout(), text, terminator);
    if let Err(error) = result {
        trace_event!(debug, %error, "print to stdout failed");
    }
}

/// Write `text` followed by a newline to standard output.
///
/// Signature: `(text: *const c_char) -> void`
///
/// # Safety
///
/// `text` must be null or point to a null-terminated byte sequence valid for
/// the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_println(text: *const c_char) {
    unsafe { print_to_stdout(text, Terminator::Newline) }
}

/// Write `text` to standard output with no trailing separator.
///
/// Signature: `(text: *const c_char) -> void`
///
/// # Safety
///
/// Same contract as [`aurora_println`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_print(text: *const c_char) {
    unsafe { print_to_stdout(text, Terminator::None) }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serial_test::serial;

    use super::*;

    /// Accepts a fixed number of bytes, then reports a closed pipe.
    struct ClosedAfter {
        remaining: usize,
        written: Vec<u8>,
    }

    impl Write for ClosedAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.remaining);
            self.written.extend_from_slice(&buf[..n]);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_newline_terminator_appends_one_byte() {
        let mut out = Vec::new();
        write_text(&mut out, Some(c"hello"), Terminator::Newline).unwrap();
        assert_eq!(out, b"hello\n");
    }

    #[test]
    fn test_no_terminator_writes_bytes_only() {
        let mut out = Vec::new();
        write_text(&mut out, Some(c"ab"), Terminator::None).unwrap();
        write_text(&mut out, Some(c"cd"), Terminator::Newline).unwrap();
        assert_eq!(out, b"abcd\n");
    }

    #[test]
    fn test_null_text_writes_nothing() {
        let mut out = Vec::new();
        write_text(&mut out, None, Terminator::Newline).unwrap();
        write_text(&mut out, None, Terminator::None).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_string_still_gets_newline() {
        let mut out = Vec::new();
        write_text(&mut out, Some(c""), Terminator::Newline).unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_non_utf8_bytes_pass_through() {
        let raw = b"\xff\xfeok\0";
        let text = CStr::from_bytes_with_nul(raw).unwrap();
        let mut out = Vec::new();
        write_text(&mut out, Some(text), Terminator::None).unwrap();
        assert_eq!(out, b"\xff\xfeok");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut out = ClosedAfter {
            remaining: 3,
            written: Vec::new(),
        };
        let err = write_text(&mut out, Some(c"hello"), Terminator::Newline).unwrap_err();
        assert!(matches!(err, RuntimeError::Write(_)));
        assert_eq!(err.io_error().kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(out.written, b"hel");
    }

    #[test]
    #[serial]
    fn test_null_pointer_entries_return_normally() {
        unsafe {
            aurora_println(core::ptr::null());
            aurora_print(core::ptr::null());
        }
    }
}
