//! Abortive termination for unrecoverable conditions in Aurora code.
//!
//! Every entry point renders exactly one diagnostic line to standard error,
//!
//! ```text
//! Aurora panic at <file>:<line>: <message>
//! ```
//!
//! flushes the stream and calls the host `abort`. Exit hooks never run and
//! the process dies with a crash status (`SIGABRT` on unix). Null string
//! arguments are rendered as `(null)`.

use core::ffi::{c_char, c_int};
use core::fmt;
use std::io::{self, Write};

use crate::cstr;
use crate::error::{RuntimeError, RuntimeResult};
use crate::stream::HostStream;

const UNKNOWN_FILE: &[u8] = b"<unknown>";

/// The `<message>` part of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanicMessage<'a> {
    /// Caller-supplied bytes, written verbatim.
    Text(&'a [u8]),
    BoundsCheck { index: usize, len: usize },
    UnwrapNone,
    /// Error description of the failed `Result`.
    UnwrapErr(&'a [u8]),
}

impl PanicMessage<'_> {
    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match *self {
            PanicMessage::Text(text) => out.write_all(text),
            PanicMessage::BoundsCheck { index, len } => write!(
                out,
                "index out of bounds: the len is {len} but the index is {index}"
            ),
            PanicMessage::UnwrapNone => {
                out.write_all(b"called `Option::unwrap()` on a `None` value")
            }
            PanicMessage::UnwrapErr(err) => {
                out.write_all(b"called `Result::unwrap()` on an `Err` value: ")?;
                out.write_all(err)
            }
        }
    }
}

impl fmt::Display for PanicMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PanicMessage::Text(text) => write_lossy(f, text),
            PanicMessage::BoundsCheck { index, len } => write!(
                f,
                "index out of bounds: the len is {len} but the index is {index}"
            ),
            PanicMessage::UnwrapNone => f.write_str("called `Option::unwrap()` on a `None` value"),
            PanicMessage::UnwrapErr(err) => {
                f.write_str("called `Result::unwrap()` on an `Err` value: ")?;
                write_lossy(f, err)
            }
        }
    }
}

/// One panic diagnostic, borrowed from the caller's arguments.
///
/// Rendering never allocates, so a report can still be emitted after the
/// heap is exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanicReport<'a> {
    file: &'a [u8],
    line: c_int,
    message: PanicMessage<'a>,
}

impl<'a> PanicReport<'a> {
    pub fn new(file: &'a [u8], line: c_int, message: PanicMessage<'a>) -> Self {
        Self {
            file,
            line,
            message,
        }
    }

    pub fn file(&self) -> &'a [u8] {
        self.file
    }

    pub fn line(&self) -> c_int {
        self.line
    }

    pub fn message(&self) -> PanicMessage<'a> {
        self.message
    }

    /// Write the diagnostic line, newline included, then flush `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> RuntimeResult<()> {
        self.render(out).map_err(RuntimeError::Write)?;
        out.flush().map_err(RuntimeError::Flush)
    }

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"Aurora panic at ")?;
        out.write_all(self.file)?;
        write!(out, ":{}: ", self.line)?;
        self.message.write_to(out)?;
        out.write_all(b"\n")
    }

    /// Report to standard error and abort the process.
    pub fn raise(&self) -> ! {
        trace_event!(
            error,
            file = %Lossy(self.file),
            line = self.line,
            message = %self.message,
            "aurora panic"
        );
        // Termination must happen even if stderr is gone.
        let _ = self.write_to(&mut HostStream::stderr());
        unsafe { libc::abort() }
    }
}

/// Lossy text form of the diagnostic line, without the trailing newline.
impl fmt::Display for PanicReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Aurora panic at ")?;
        write_lossy(f, self.file)?;
        write!(f, ":{}: {}", self.line, self.message)
    }
}

fn write_lossy(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for chunk in bytes.utf8_chunks() {
        f.write_str(chunk.valid())?;
        if !chunk.invalid().is_empty() {
            f.write_str("\u{FFFD}")?;
        }
    }
    Ok(())
}

#[cfg(feature = "trace")]
struct Lossy<'a>(&'a [u8]);

#[cfg(feature = "trace")]
impl fmt::Display for Lossy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lossy(f, self.0)
    }
}

// =============================================================================
// Exported entry points
// =============================================================================

/// Report `message` at `file:line` and abort.
///
/// Signature: `(message: *const c_char, file: *const c_char, line: c_int) -> !`
///
/// # Safety
///
/// `message` and `file` must each be null or point to a null-terminated byte
/// sequence.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_panic(
    message: *const c_char,
    file: *const c_char,
    line: c_int,
) -> ! {
    let message = unsafe { cstr::borrow(message) };
    let file = unsafe { cstr::borrow(file) };
    PanicReport::new(
        cstr::bytes_or_placeholder(file),
        line,
        PanicMessage::Text(cstr::bytes_or_placeholder(message)),
    )
    .raise()
}

/// Abort with a message and no source location (`<unknown>:0`).
///
/// # Safety
///
/// `message` must be null or point to a null-terminated byte sequence.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_panic_msg(message: *const c_char) -> ! {
    let message = unsafe { cstr::borrow(message) };
    PanicReport::new(
        UNKNOWN_FILE,
        0,
        PanicMessage::Text(cstr::bytes_or_placeholder(message)),
    )
    .raise()
}

/// Abort on an out-of-range index.
///
/// Signature: `(index: usize, len: usize, file: *const c_char, line: c_int) -> !`
///
/// # Safety
///
/// `file` must be null or point to a null-terminated byte sequence.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_panic_bounds_check(
    index: usize,
    len: usize,
    file: *const c_char,
    line: c_int,
) -> ! {
    let file = unsafe { cstr::borrow(file) };
    PanicReport::new(
        cstr::bytes_or_placeholder(file),
        line,
        PanicMessage::BoundsCheck { index, len },
    )
    .raise()
}

/// Abort on unwrapping an empty optional.
///
/// # Safety
///
/// `file` must be null or point to a null-terminated byte sequence.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_panic_unwrap_none(file: *const c_char, line: c_int) -> ! {
    let file = unsafe { cstr::borrow(file) };
    PanicReport::new(
        cstr::bytes_or_placeholder(file),
        line,
        PanicMessage::UnwrapNone,
    )
    .raise()
}

/// Abort on unwrapping a failed result whose error renders as `err`.
///
/// # Safety
///
/// `err` and `file` must each be null or point to a null-terminated byte
/// sequence.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn aurora_panic_unwrap_err(
    err: *const c_char,
    file: *const c_char,
    line: c_int,
) -> ! {
    let err = unsafe { cstr::borrow(err) };
    let file = unsafe { cstr::borrow(file) };
    PanicReport::new(
        cstr::bytes_or_placeholder(file),
        line,
        PanicMessage::UnwrapErr(cstr::bytes_or_placeholder(err)),
    )
    .raise()
}
