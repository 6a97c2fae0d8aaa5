//! Host C stdio streams.
//!
//! Output goes through the C library's `stdout` / `stderr` objects rather than
//! Rust's own stdio so that buffering follows the host discipline (line
//! buffered on a terminal, fully buffered otherwise) and interleaves correctly
//! with anything else in the program that uses C stdio.

use std::io;

use derive_more::Display;

#[cfg(not(windows))]
#[allow(non_upper_case_globals)]
unsafe extern "C" {
    #[cfg_attr(target_vendor = "apple", link_name = "__stdoutp")]
    static stdout: *mut libc::FILE;
    #[cfg_attr(target_vendor = "apple", link_name = "__stderrp")]
    static stderr: *mut libc::FILE;
}

#[cfg(windows)]
unsafe extern "C" {
    fn __acrt_iob_func(index: libc::c_uint) -> *mut libc::FILE;
}

/// Which standard stream a [`HostStream`] refers to.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum StreamKind {
    #[display("stdout")]
    Stdout,
    #[display("stderr")]
    Stderr,
}

/// Handle to one of the host's standard C streams.
///
/// The handle is a plain value: the underlying `FILE*` is looked up on every
/// operation and no buffer or lock is held on the Rust side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostStream {
    kind: StreamKind,
}

impl HostStream {
    pub const fn stdout() -> Self {
        Self {
            kind: StreamKind::Stdout,
        }
    }

    pub const fn stderr() -> Self {
        Self {
            kind: StreamKind::Stderr,
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    #[cfg(not(windows))]
    fn file(&self) -> *mut libc::FILE {
        unsafe {
            match self.kind {
                StreamKind::Stdout => stdout,
                StreamKind::Stderr => stderr,
            }
        }
    }

    #[cfg(windows)]
    fn file(&self) -> *mut libc::FILE {
        let index = match self.kind {
            StreamKind::Stdout => 1,
            StreamKind::Stderr => 2,
        };
        unsafe { __acrt_iob_func(index) }
    }
}

impl io::Write for HostStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let written = unsafe { libc::fwrite(buf.as_ptr().cast(), 1, buf.len(), self.file()) };
        if written == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        if unsafe { libc::fflush(self.file()) } == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}
