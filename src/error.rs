use nom::error::{ErrorKind, ParseError};
use std::io;
use thiserror::Error;

/// Errors returned while reading a pcap file
///
/// `Eof` is the normal end of a capture: the source had no bytes left exactly at a record
/// boundary. Every other variant means the capture is corrupt, truncated, or unreadable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PcapError {
    /// No more data
    #[error("end of file")]
    Eof,
    /// The source ended in the middle of a header or a declared payload
    #[error("truncated capture: expected {expected} bytes, only {available} available")]
    UnexpectedEof { expected: usize, available: usize },

    /// The magic number does not identify a pcap file
    #[error("header not recognized (magic number 0x{0:08x})")]
    HeaderNotRecognized(u32),

    /// A record does not fit in the maximum buffer size
    #[error("buffer too small: record needs {needed} bytes, limit is {limit}")]
    BufferTooSmall { needed: usize, limit: usize },
    #[error("read error: {0:?}")]
    ReadError(io::ErrorKind),

    #[error("nom error: {0:?}")]
    NomError(ErrorKind),
}

impl From<io::Error> for PcapError {
    fn from(e: io::Error) -> Self {
        PcapError::ReadError(e.kind())
    }
}

impl<I> ParseError<I> for PcapError {
    fn from_error_kind(_input: I, kind: ErrorKind) -> Self {
        PcapError::NomError(kind)
    }
    fn append(_input: I, kind: ErrorKind, _other: Self) -> Self {
        PcapError::NomError(kind)
    }
}
