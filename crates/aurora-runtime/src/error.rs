//! Error types for the safe Rust layer of the runtime.
//!
//! None of these cross the C ABI: the exported entry points are best-effort
//! and drop them at the boundary.

use std::io;

use derive_more::{Display, Error};

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Display, Debug, Error)]
pub enum RuntimeError {
    #[display("Write to host stream failed: {_0}")]
    Write(#[error(source)] io::Error),

    #[display("Flush of host stream failed: {_0}")]
    Flush(#[error(source)] io::Error),
}

impl RuntimeError {
    /// The underlying I/O error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            RuntimeError::Write(e) | RuntimeError::Flush(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_display_includes_cause() {
        let err = RuntimeError::Write(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "Write to host stream failed: pipe closed");
    }

    #[test]
    fn test_source_is_io_error() {
        let err = RuntimeError::Flush(io::Error::other("disk full"));
        let source = err.source().expect("flush error carries its cause");
        assert_eq!(source.to_string(), "disk full");
        assert_eq!(err.io_error().kind(), io::ErrorKind::Other);
    }
}
