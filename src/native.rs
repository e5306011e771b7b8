//! Directory handles backed by the NT native API.

use crate::error::FinderError;
use crate::record::InformationClass;
use crate::scanner::{DirectorySource, QueryResult};
#[cfg(not(windows))]
use crate::status::NtStatus;

/// A directory opened for listing with backup semantics, shared for read,
/// write and delete.
#[derive(Debug)]
pub struct NativeDirectory {
    #[cfg(windows)]
    handle: Option<std::os::windows::io::OwnedHandle>,
    #[cfg(not(windows))]
    _private: (),
}

#[cfg(windows)]
mod sys {
    use super::*;
    use std::ffi::OsStr;
    use std::io;
    use std::os::windows::ffi::OsStrExt;
    use std::os::windows::io::{AsRawHandle, FromRawHandle, IntoRawHandle, OwnedHandle};
    use std::ptr;
    use windows_sys::Wdk::Storage::FileSystem::NtQueryDirectoryFile;
    use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE, UNICODE_STRING};
    use windows_sys::Win32::Storage::FileSystem::{
        CreateFileW, FILE_FLAG_BACKUP_SEMANTICS, FILE_LIST_DIRECTORY, FILE_SHARE_DELETE,
        FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
    };
    use windows_sys::Win32::System::IO::IO_STATUS_BLOCK;
    use crate::status::NtStatus;

    impl NativeDirectory {
        pub fn open(path: &str) -> Result<Self, FinderError> {
            let wide: Vec<u16> = OsStr::new(path).encode_wide().chain(Some(0)).collect();
            if wide[..wide.len() - 1].contains(&0) {
                return Err(FinderError::open(
                    path,
                    io::Error::new(io::ErrorKind::InvalidInput, "path contains an interior nul"),
                ));
            }

            // SAFETY: `wide` is nul-terminated and outlives the call.
            let handle = unsafe {
                CreateFileW(
                    wide.as_ptr(),
                    FILE_LIST_DIRECTORY,
                    FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
                    ptr::null(),
                    OPEN_EXISTING,
                    FILE_FLAG_BACKUP_SEMANTICS,
                    ptr::null_mut(),
                )
            };
            if handle.is_null() || handle == INVALID_HANDLE_VALUE {
                return Err(FinderError::open(path, io::Error::last_os_error()));
            }

            // SAFETY: CreateFileW returned a valid handle that nothing else owns.
            let handle = unsafe { OwnedHandle::from_raw_handle(handle as _) };
            Ok(Self {
                handle: Some(handle),
            })
        }
    }

    impl DirectorySource for NativeDirectory {
        fn query(
            &mut self,
            buffer: &mut [u8],
            class: InformationClass,
            pattern: &[u16],
            restart_scan: bool,
        ) -> QueryResult {
            let Some(handle) = self.handle.as_ref() else {
                return QueryResult::status(NtStatus::INVALID_HANDLE);
            };

            // The scanner bounds the pattern to a u16 byte length.
            let byte_len = (pattern.len() * size_of::<u16>()) as u16;
            let name = UNICODE_STRING {
                Length: byte_len,
                MaximumLength: byte_len,
                Buffer: pattern.as_ptr().cast_mut(),
            };
            let file_name: *const UNICODE_STRING = if pattern.is_empty() {
                ptr::null()
            } else {
                &name
            };

            // SAFETY: zeroed is a valid IO_STATUS_BLOCK.
            let mut status_block: IO_STATUS_BLOCK = unsafe { std::mem::zeroed() };
            // SAFETY: the handle is open for listing, the buffer and pattern
            // outlive this synchronous call, and the length matches the buffer.
            // File name matching here is always case-insensitive.
            let status = unsafe {
                NtQueryDirectoryFile(
                    handle.as_raw_handle() as HANDLE,
                    ptr::null_mut(),
                    None,
                    ptr::null(),
                    &mut status_block,
                    buffer.as_mut_ptr().cast(),
                    buffer.len() as u32,
                    class as i32,
                    1,
                    file_name,
                    u8::from(restart_scan),
                )
            };

            QueryResult {
                status: NtStatus(status),
                information: status_block.Information,
            }
        }

        fn close(&mut self) -> io::Result<()> {
            let Some(handle) = self.handle.take() else {
                return Ok(());
            };
            // SAFETY: ownership of the raw handle moved out of `handle`.
            if unsafe { CloseHandle(handle.into_raw_handle() as HANDLE) } == 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        }
    }
}

#[cfg(not(windows))]
impl NativeDirectory {
    pub fn open(_path: &str) -> Result<Self, FinderError> {
        Err(FinderError::Unsupported)
    }
}

#[cfg(not(windows))]
impl DirectorySource for NativeDirectory {
    fn query(&mut self, _buffer: &mut [u8], _class: InformationClass, _pattern: &[u16], _restart_scan: bool) -> QueryResult {
        QueryResult::status(NtStatus::INVALID_HANDLE)
    }
}
