//! NT status codes returned by the directory query and how they are interpreted.

use std::fmt;
use std::io;

/// A raw `NTSTATUS` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NtStatus(pub i32);

impl NtStatus {
    pub const SUCCESS: NtStatus = NtStatus(0);
    pub const BUFFER_OVERFLOW: NtStatus = NtStatus(0x8000_0005_u32 as i32);
    pub const NO_MORE_FILES: NtStatus = NtStatus(0x8000_0006_u32 as i32);
    pub const INFO_LENGTH_MISMATCH: NtStatus = NtStatus(0xC000_0004_u32 as i32);
    pub const INVALID_HANDLE: NtStatus = NtStatus(0xC000_0008_u32 as i32);
    pub const NO_SUCH_FILE: NtStatus = NtStatus(0xC000_000F_u32 as i32);
    pub const OBJECT_NAME_INVALID: NtStatus = NtStatus(0xC000_0033_u32 as i32);
    /// Reported instead of `NO_SUCH_FILE` when a volume root holds no entries
    /// at all (roots normally carry hidden system files).
    pub const FILE_NOT_FOUND_ON_ROOT: NtStatus = NtStatus(0xE003_1004_u32 as i32);

    /// Sorts a query status into one of the outcomes the scanner acts on.
    pub fn classify(self) -> StatusClass {
        match self {
            NtStatus::SUCCESS => StatusClass::Record,
            NtStatus::NO_MORE_FILES | NtStatus::NO_SUCH_FILE | NtStatus::FILE_NOT_FOUND_ON_ROOT => {
                StatusClass::Exhausted
            }
            _ => StatusClass::Failed,
        }
    }

    /// Translates the status into the equivalent Win32 error.
    #[cfg(windows)]
    pub fn to_io_error(self) -> io::Error {
        // SAFETY: RtlNtStatusToDosError only maps a value, it touches no memory.
        let code = unsafe { windows_sys::Win32::Foundation::RtlNtStatusToDosError(self.0) };
        io::Error::from_raw_os_error(code as i32)
    }

    /// Translates the status into an error carrying the raw code.
    #[cfg(not(windows))]
    pub fn to_io_error(self) -> io::Error {
        let kind = match self {
            NtStatus::INVALID_HANDLE => io::ErrorKind::InvalidInput,
            NtStatus::OBJECT_NAME_INVALID => io::ErrorKind::InvalidInput,
            NtStatus::INFO_LENGTH_MISMATCH => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, format!("NTSTATUS {self}"))
    }
}

impl fmt::Display for NtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0 as u32)
    }
}

/// Outcome of a single directory query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// A record was written to the scan buffer.
    Record,
    /// Nothing (more) matches the pattern. Not an error.
    Exhausted,
    /// Anything else.
    Failed,
}
