use crate::status::NtStatus;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("Failed to open directory {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Directory query failed with status {status}: {source}")]
    Query {
        status: NtStatus,
        source: std::io::Error,
    },
    #[error("Failed to allocate a {bytes} byte scan buffer")]
    Allocation { bytes: usize },
    #[error("Pattern is {units} UTF-16 units long, longer than a UNICODE_STRING can hold")]
    PatternTooLong { units: usize },
    #[error("Invalid scan buffer length {length}: {reason}")]
    InvalidBufferLength { length: usize, reason: &'static str },
    #[error("Malformed directory record: {0}")]
    MalformedRecord(&'static str),
    #[error("Native directory enumeration is only available on Windows")]
    Unsupported,
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
impl FinderError {
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FinderError::Open {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FinderError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn query(status: NtStatus) -> Self {
        FinderError::Query {
            status,
            source: status.to_io_error(),
        }
    }
    /// The NT status behind a failed query, if this error came from one.
    pub fn status(&self) -> Option<NtStatus> {
        match self {
            FinderError::Query { status, .. } => Some(*status),
            _ => None,
        }
    }
}
